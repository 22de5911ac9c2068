use itertools::Itertools;

use crate::{LinalgError, LinalgResult, Partition};

/// Dense vector of `f64` with a fixed size.
///
/// Arithmetic is exposed as named operations returning new values. The only
/// in-place operation is [`Vector::concatenate`], which the merge step uses to
/// reassemble per-worker blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl From<Vec<f64>> for Vector {
    #[inline]
    fn from(data: Vec<f64>) -> Self {
        Self { data }
    }
}

impl Vector {
    /// A zero vector of length `size`.
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size],
        }
    }

    #[inline]
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            data: vec![value; size],
        }
    }

    /// Benchmark right-hand side: every entry is `len + 1`.
    ///
    /// Paired with [`crate::Matrix::fill`] the exact solution is the all-ones vector.
    pub fn fill(&mut self) {
        let value = (self.len() + 1) as f64;
        self.data.iter_mut().for_each(|v| *v = value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    pub fn get(&self, index: usize) -> LinalgResult<f64> {
        self.data
            .get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: f64) -> LinalgResult<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(LinalgError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    #[inline]
    fn check_same_size(&self, other: &Self) -> LinalgResult<()> {
        if self.len() != other.len() {
            return Err(LinalgError::SizeMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> LinalgResult<Self> {
        self.check_same_size(other)?;
        Ok(self
            .data
            .iter()
            .zip_eq(other.data.iter())
            .map(|(a, b)| a + b)
            .collect::<Vec<_>>()
            .into())
    }

    pub fn subtract(&self, other: &Self) -> LinalgResult<Self> {
        self.check_same_size(other)?;
        Ok(self
            .data
            .iter()
            .zip_eq(other.data.iter())
            .map(|(a, b)| a - b)
            .collect::<Vec<_>>()
            .into())
    }

    pub fn dot(&self, other: &Self) -> LinalgResult<f64> {
        self.check_same_size(other)?;
        Ok(dot_slices(&self.data, &other.data))
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        self.data
            .iter()
            .map(|v| v * factor)
            .collect::<Vec<_>>()
            .into()
    }

    /// Append `other` to the end of this vector.
    #[inline]
    pub fn concatenate(&mut self, other: &Self) {
        self.data.extend_from_slice(&other.data);
    }

    /// Copy of the elements in `start..end`.
    pub fn slice_range(&self, start: usize, end: usize) -> LinalgResult<Self> {
        if start > end || end > self.len() {
            return Err(LinalgError::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(self.data[start..end].to_vec().into())
    }

    /// The contiguous block owned by `worker` out of `count` workers.
    pub fn slice_for(&self, worker: usize, count: usize) -> LinalgResult<Self> {
        let partition = Partition::new(self.len(), worker, count)?;
        self.slice_range(partition.start, partition.end)
    }
}

/// Row-times-vector kernel shared by [`Vector::dot`] and the matrix product.
/// Callers guarantee equal lengths.
#[inline]
pub(crate) fn dot_slices(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip_eq(b.iter()).map(|(x, y)| x * y).sum()
}
