use std::fmt;

#[macro_export]
macro_rules! root_println {
    ($comm: expr, $($arg:tt)*) => {
        if $comm.is_root() {
            println!($($arg)*);
        }
    };
}

/// Message kinds exchanged once per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Tag {
    Finish = 1,
    Vector = 2,
    StepSize = 3,
}

impl Tag {
    #[inline]
    pub fn id(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Finish => write!(f, "FINISH"),
            Tag::Vector => write!(f, "VECTOR"),
            Tag::StepSize => write!(f, "STEP_SIZE"),
        }
    }
}
