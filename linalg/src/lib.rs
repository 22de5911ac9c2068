//! Dense linear algebra containers used by the Richardson solver.
//!
//! Nothing in this crate is aware of workers or threads. Partitioning only
//! describes which contiguous block of rows a worker owns; the caller decides
//! how the blocks are computed and merged.

mod errors;
pub use errors::{LinalgError, LinalgResult};

mod matrix;
pub use matrix::Matrix;

mod partition;
pub use partition::{partitions, Partition};

mod vector;
pub use vector::Vector;

#[cfg(test)]
mod tests;
