use core::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Nesting depth of the timers currently running on the root, used to indent log lines.
pub static CALL_DEPTH: AtomicUsize = AtomicUsize::new(0);

/// Wall-clock timer for a labelled block.
///
/// Every rank measures; only the root logs. Nested timers are indented by depth.
pub struct Timer {
    label: String,
    timer: Instant,
    is_root: bool,
}

impl Timer {
    #[inline(always)]
    pub fn new(label: &str, is_root: bool) -> Self {
        if is_root {
            let depth = CALL_DEPTH.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("{:indent$}* {} started", "", label, indent = 2 * depth);
        }
        Self {
            label: label.to_string(),
            timer: Instant::now(),
            is_root,
        }
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Stop the timer and return the time since [`Timer::new`].
    #[inline(always)]
    pub fn stop(self) -> Duration {
        let duration = self.timer.elapsed();
        if self.is_root {
            let depth = CALL_DEPTH.fetch_sub(1, Ordering::Relaxed);
            log::info!(
                "{:indent$}* {} finished in {:?}",
                "",
                self.label,
                duration,
                indent = 2 * depth
            );
        }
        duration
    }

    #[inline(always)]
    pub fn print(&self, msg: &str) {
        if self.is_root {
            let depth = CALL_DEPTH.load(Ordering::Relaxed) + 1;
            log::info!("{:indent$}* {}", "", msg, indent = 2 * depth);
        }
    }
}
