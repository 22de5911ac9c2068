use thiserror::Error;

use crate::Tag;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommError {
    #[error("peer {peer} hung up before sending")]
    Disconnected { peer: usize },

    #[error("peer {peer} sent a payload of the wrong kind under tag {tag}")]
    UnexpectedPayload { peer: usize, tag: Tag },

    #[error("expected a buffer of {expected} values, received {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("rank {rank} out of range for world size {size}")]
    RankOutOfRange { rank: usize, size: usize },

    #[error("rank {rank} cannot message itself")]
    SelfMessage { rank: usize },

    #[error("timed out waiting for {tag} from peer {peer}")]
    Timeout { peer: usize, tag: Tag },

    #[error("MPI environment is already initialized")]
    AlreadyInitialized,
}

pub type CommResult<T> = std::result::Result<T, CommError>;
