use crate::{vector::dot_slices, LinalgError, LinalgResult, Partition, Vector};

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// A zero matrix of shape `rows x columns`.
    #[inline]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    /// Build from row-major data; `data.len()` must equal `rows * columns`.
    pub fn from_row_major(rows: usize, columns: usize, data: Vec<f64>) -> LinalgResult<Self> {
        if data.len() != rows * columns {
            return Err(LinalgError::SizeMismatch {
                left: data.len(),
                right: rows * columns,
            });
        }
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// The `n x n` benchmark matrix, see [`Matrix::fill`].
    pub fn benchmark(n: usize) -> Self {
        let mut matrix = Self::new(n, n);
        matrix.fill();
        matrix
    }

    /// 2 on the diagonal, 1 everywhere else.
    ///
    /// For a square matrix this is `I + J` (J all ones): symmetric positive definite with
    /// eigenvalues 1 and n + 1, so simple iteration converges for `0 < tau < 2 / (n + 1)`.
    pub fn fill(&mut self) {
        let columns = self.columns;
        self.data
            .chunks_mut(columns.max(1))
            .enumerate()
            .for_each(|(i, row)| {
                row.iter_mut()
                    .enumerate()
                    .for_each(|(j, v)| *v = if i == j { 2.0 } else { 1.0 })
            });
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> LinalgResult<usize> {
        if row >= self.rows {
            return Err(LinalgError::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        if column >= self.columns {
            return Err(LinalgError::IndexOutOfBounds {
                index: column,
                len: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> LinalgResult<f64> {
        let offset = self.offset(row, column)?;
        Ok(self.data[offset])
    }

    #[inline]
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> LinalgResult<()> {
        let offset = self.offset(row, column)?;
        self.data[offset] = value;
        Ok(())
    }

    #[inline]
    pub fn row(&self, row: usize) -> LinalgResult<&[f64]> {
        if row >= self.rows {
            return Err(LinalgError::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        Ok(&self.data[row * self.columns..(row + 1) * self.columns])
    }

    /// Matrix-vector product; entry i is the dot product of row i with `vector`.
    pub fn multiply(&self, vector: &Vector) -> LinalgResult<Vector> {
        if vector.len() != self.columns {
            return Err(LinalgError::SizeMismatch {
                left: self.columns,
                right: vector.len(),
            });
        }
        if self.columns == 0 {
            return Ok(Vector::new(self.rows));
        }

        Ok(self
            .data
            .chunks(self.columns)
            .map(|row| dot_slices(row, vector.as_slice()))
            .collect::<Vec<_>>()
            .into())
    }

    /// Copy of rows `start..end`, all columns.
    pub fn slice_rows(&self, start: usize, end: usize) -> LinalgResult<Self> {
        if start > end || end > self.rows {
            return Err(LinalgError::InvalidRange {
                start,
                end,
                len: self.rows,
            });
        }
        Ok(Self {
            rows: end - start,
            columns: self.columns,
            data: self.data[start * self.columns..end * self.columns].to_vec(),
        })
    }

    /// The row block owned by `worker` out of `count` workers.
    pub fn slice_for(&self, worker: usize, count: usize) -> LinalgResult<Self> {
        let partition = Partition::new(self.rows, worker, count)?;
        self.slice_rows(partition.start, partition.end)
    }
}
