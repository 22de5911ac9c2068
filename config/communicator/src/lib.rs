//! Point-to-point messaging between solver workers.
//!
//! A worker only ever needs three kinds of payload: the iterate (a fixed-length `f64` buffer),
//! the finish flag and the step size. Each travels under its own [`Tag`] and is received with
//! MPI matching semantics: a receive names the source rank and the tag, and messages from the
//! same source with the same tag are never reordered.

mod common;
pub use common::*;

mod errors;
pub use errors::{CommError, CommResult};

mod traits;
pub use traits::SolverComm;

mod channel_communicator;
pub use channel_communicator::ChannelCommunicator;

#[cfg(feature = "mpi")]
mod mpi_communicator;
#[cfg(feature = "mpi")]
pub use mpi_communicator::MPICommunicator;
