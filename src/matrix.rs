use num_traits::{PrimInt, Unsigned};

use crate::error::Error;

/// Working copy of the costs, owned by a single solve.
///
/// Stored row-major with `rows <= cols`. Inputs that are taller than wide are
/// transposed on load; `transposed` records that so the pairs can be swapped
/// back when the assignment is extracted.
#[derive(Debug, Clone)]
pub(crate) struct CostMatrix<U> {
    rows: usize,
    cols: usize,
    data: Vec<U>,
    transposed: bool,
}

impl<U> CostMatrix<U>
where
    U: PrimInt + Unsigned,
{
    /// Builds the working matrix from a `rows x cols` source read through
    /// `get(row, col)`. Dimensions must already be validated as non-zero.
    pub(crate) fn load<F>(rows: usize, cols: usize, get: F) -> Result<Self, Error>
    where
        F: Fn(usize, usize) -> U,
    {
        let transposed = rows > cols;
        let (n, m) = if transposed { (cols, rows) } else { (rows, cols) };

        let mut data = Vec::new();
        data.try_reserve_exact(n * m)?;
        for i in 0..n {
            for j in 0..m {
                data.push(if transposed { get(j, i) } else { get(i, j) });
            }
        }

        Ok(Self {
            rows: n,
            cols: m,
            data,
            transposed,
        })
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn is_transposed(&self) -> bool {
        self.transposed
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> U {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn is_zero(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_zero()
    }

    #[inline]
    pub(crate) fn row(&self, row: usize) -> &[U] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [U] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Subtracts each row's minimum from every cell of that row.
    pub(crate) fn reduce_rows(&mut self) {
        for i in 0..self.rows {
            let row = self.row_mut(i);
            let min = row.iter().copied().min().unwrap_or_else(U::zero);
            if min.is_zero() {
                continue;
            }
            row.iter_mut().for_each(|v| *v = *v - min);
        }
    }

    /// Subtracts each column's minimum from every cell of that column.
    ///
    /// Only valid on a square matrix: with more columns than rows some
    /// columns stay unassigned, and lowering them would skew the optimum.
    pub(crate) fn reduce_columns(&mut self) {
        debug_assert_eq!(self.rows, self.cols);
        for j in 0..self.cols {
            let min = (0..self.rows)
                .map(|i| self.get(i, j))
                .min()
                .unwrap_or_else(U::zero);
            if min.is_zero() {
                continue;
            }
            for i in 0..self.rows {
                let v = &mut self.data[i * self.cols + j];
                *v = *v - min;
            }
        }
    }

    pub(crate) fn is_square(&self) -> bool {
        self.rows == self.cols
    }
}
