use std::{
    cell::RefCell,
    collections::VecDeque,
    sync::{
        mpsc::{self, RecvTimeoutError},
        Arc, Barrier,
    },
    time::{Duration, Instant},
};

use crate::{CommError, CommResult, SolverComm, Tag};

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Vector(Vec<f64>),
    Flag(bool),
    Scalar(f64),
}

type Message = (Tag, Payload);

/// In-process message passing: each rank is meant to live on its own thread with private
/// memory, and ranks only interact through one-directional mailboxes.
///
/// Every ordered pair of distinct ranks gets a dedicated channel, so a receive from a given
/// source only waits on that source and reports [`CommError::Disconnected`] once the source
/// has been dropped. Messages from the right source but with another tag are parked until
/// asked for.
///
/// Without a timeout a receive blocks until the message arrives or the peer hangs up. The
/// barrier has no such escape: a rank that never arrives blocks the others forever.
#[derive(Debug)]
pub struct ChannelCommunicator {
    world_size: usize,
    world_rank: usize,
    senders: Vec<Option<mpsc::Sender<Message>>>,   // indexed by destination
    receivers: Vec<Option<mpsc::Receiver<Message>>>, // indexed by source
    pending: RefCell<Vec<VecDeque<Message>>>,        // indexed by source
    barrier: Arc<Barrier>,
    timeout: Option<Duration>,
}

impl ChannelCommunicator {
    /// Create a fully connected world; element `i` of the result is rank `i`.
    #[inline]
    pub fn world(world_size: usize) -> Vec<Self> {
        Self::world_with_timeout(world_size, None)
    }

    /// Same as [`ChannelCommunicator::world`], but every receive gives up after `timeout`.
    pub fn world_with_timeout(world_size: usize, timeout: Option<Duration>) -> Vec<Self> {
        let barrier = Arc::new(Barrier::new(world_size.max(1)));
        let mut senders = (0..world_size)
            .map(|_| (0..world_size).map(|_| None).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let mut receivers = (0..world_size)
            .map(|_| (0..world_size).map(|_| None).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        for source in 0..world_size {
            for dest in 0..world_size {
                if source != dest {
                    let (tx, rx) = mpsc::channel();
                    senders[source][dest] = Some(tx);
                    receivers[dest][source] = Some(rx);
                }
            }
        }

        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(world_rank, (senders, receivers))| Self {
                world_size,
                world_rank,
                senders,
                receivers,
                pending: RefCell::new((0..world_size).map(|_| VecDeque::new()).collect()),
                barrier: barrier.clone(),
                timeout,
            })
            .collect()
    }

    #[inline]
    fn check_peer(&self, rank: usize) -> CommResult<()> {
        if rank >= self.world_size {
            return Err(CommError::RankOutOfRange {
                rank,
                size: self.world_size,
            });
        }
        if rank == self.world_rank {
            return Err(CommError::SelfMessage { rank });
        }
        Ok(())
    }

    fn post(&self, dest: usize, tag: Tag, payload: Payload) -> CommResult<()> {
        self.check_peer(dest)?;
        log::trace!("rank {} -> {}: {}", self.world_rank, dest, tag);
        self.senders[dest]
            .as_ref()
            .ok_or(CommError::SelfMessage { rank: dest })?
            .send((tag, payload))
            .map_err(|_| CommError::Disconnected { peer: dest })
    }

    fn take(&self, source: usize, tag: Tag) -> CommResult<Payload> {
        self.check_peer(source)?;
        let receiver = self.receivers[source]
            .as_ref()
            .ok_or(CommError::SelfMessage { rank: source })?;

        {
            let mut pending = self.pending.borrow_mut();
            let parked = pending[source].iter().position(|(t, _)| *t == tag);
            if let Some((_, payload)) = parked.and_then(|pos| pending[source].remove(pos)) {
                return Ok(payload);
            }
        }

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        loop {
            let (received, payload) = match deadline {
                None => receiver
                    .recv()
                    .map_err(|_| CommError::Disconnected { peer: source })?,
                Some(deadline) => receiver
                    .recv_timeout(deadline.saturating_duration_since(Instant::now()))
                    .map_err(|e| match e {
                        RecvTimeoutError::Timeout => CommError::Timeout { peer: source, tag },
                        RecvTimeoutError::Disconnected => CommError::Disconnected { peer: source },
                    })?,
            };
            log::trace!("rank {} <- {}: {}", self.world_rank, source, received);

            if received == tag {
                return Ok(payload);
            }
            self.pending.borrow_mut()[source].push_back((received, payload));
        }
    }
}

impl SolverComm for ChannelCommunicator {
    #[inline]
    fn world_size(&self) -> usize {
        self.world_size
    }

    #[inline]
    fn world_rank(&self) -> usize {
        self.world_rank
    }

    fn send_vec(&self, dest: usize, tag: Tag, data: &[f64]) -> CommResult<()> {
        self.post(dest, tag, Payload::Vector(data.to_vec()))
    }

    fn recv_vec(&self, source: usize, tag: Tag, len: usize) -> CommResult<Vec<f64>> {
        match self.take(source, tag)? {
            Payload::Vector(data) if data.len() == len => Ok(data),
            Payload::Vector(data) => Err(CommError::LengthMismatch {
                expected: len,
                actual: data.len(),
            }),
            _ => Err(CommError::UnexpectedPayload { peer: source, tag }),
        }
    }

    fn send_flag(&self, dest: usize, tag: Tag, flag: bool) -> CommResult<()> {
        self.post(dest, tag, Payload::Flag(flag))
    }

    fn recv_flag(&self, source: usize, tag: Tag) -> CommResult<bool> {
        match self.take(source, tag)? {
            Payload::Flag(flag) => Ok(flag),
            _ => Err(CommError::UnexpectedPayload { peer: source, tag }),
        }
    }

    fn send_f64(&self, dest: usize, tag: Tag, value: f64) -> CommResult<()> {
        self.post(dest, tag, Payload::Scalar(value))
    }

    fn recv_f64(&self, source: usize, tag: Tag) -> CommResult<f64> {
        match self.take(source, tag)? {
            Payload::Scalar(value) => Ok(value),
            _ => Err(CommError::UnexpectedPayload { peer: source, tag }),
        }
    }

    #[inline]
    fn barrier(&self) -> CommResult<()> {
        self.barrier.wait();
        Ok(())
    }
}
