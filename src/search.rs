use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};

use num_traits::{PrimInt, Unsigned};
use tracing::trace;

use crate::error::Error;
use crate::marks::{Coverage, Marks};
use crate::matrix::CostMatrix;
use crate::zeros::ZeroIndex;

/// Mutable state of one solve: the reduced costs, the current matching and
/// the bookkeeping used to grow it one augmenting path at a time.
#[derive(Debug)]
pub(crate) struct Search<'a, U> {
    costs: CostMatrix<U>,
    marks: Marks,
    coverage: Coverage,
    zeros: ZeroIndex,
    cancel: Option<&'a AtomicBool>,
    pub(crate) adjustments: usize,
}

impl<'a, U> Search<'a, U>
where
    U: PrimInt + Unsigned + Debug,
{
    /// Allocates every auxiliary buffer up front. `costs` must already be
    /// reduced.
    pub(crate) fn new(costs: CostMatrix<U>, cancel: Option<&'a AtomicBool>) -> Result<Self, Error> {
        let (rows, cols) = (costs.rows(), costs.cols());
        Ok(Self {
            marks: Marks::new(rows, cols)?,
            coverage: Coverage::new(rows, cols)?,
            zeros: ZeroIndex::with_capacity(rows * cols)?,
            costs,
            cancel,
            adjustments: 0,
        })
    }

    #[cfg(test)]
    pub(crate) fn costs(&self) -> &CostMatrix<U> {
        &self.costs
    }

    pub(crate) fn marks(&self) -> &Marks {
        &self.marks
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), Error> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Stars an initial set of independent zeros and returns their count.
    pub(crate) fn mark_initial(&mut self) -> usize {
        self.marks.star_initial_zeros(&self.costs, &mut self.coverage);
        self.coverage.recount(&self.marks)
    }

    /// Starts an augmenting-path search: every row is uncovered, so the index
    /// holds all zeros of the uncovered columns.
    pub(crate) fn begin_path(&mut self) {
        self.seed_zeros();
    }

    /// Primes indexed zeros until one lies in a row without a star and
    /// returns it. `None` means the index ran dry and the duals need
    /// adjusting before the search can go on.
    pub(crate) fn next_path_end(&mut self) -> Option<(usize, usize)> {
        while let Some(pos) = self.zeros.any() {
            if let Some(end) = self.prime_zero(pos) {
                return Some(end);
            }
        }
        None
    }

    /// Flips the path ending at `(row, col)` and re-derives the column
    /// covers. Returns the new star count.
    pub(crate) fn augment(&mut self, row: usize, col: usize) -> usize {
        self.marks.augment(row, col);
        self.coverage.recount(&self.marks)
    }

    // index every zero lying in an uncovered row and an uncovered column
    fn seed_zeros(&mut self) {
        self.zeros.clear();
        let cols = self.costs.cols();
        for row in 0..self.costs.rows() {
            if self.coverage.is_row_covered(row) {
                continue;
            }
            for (col, v) in self.costs.row(row).iter().enumerate() {
                if v.is_zero() && !self.coverage.is_col_covered(col) {
                    self.zeros.set(row * cols + col);
                }
            }
        }
    }

    fn prime_zero(&mut self, pos: usize) -> Option<(usize, usize)> {
        let cols = self.costs.cols();
        let (row, col) = (pos / cols, pos % cols);
        self.marks.prime(row, col);

        let Some(star_col) = self.marks.star_in_row(row) else {
            return Some((row, col));
        };

        self.coverage.cover_row(row);
        self.coverage.uncover_col(star_col);

        // the row is covered now, drop all of its zeros
        for (j, v) in self.costs.row(row).iter().enumerate() {
            if v.is_zero() {
                self.zeros.unset(row * cols + j);
            }
        }

        // the star's column is open again
        for i in 0..self.costs.rows() {
            if self.costs.is_zero(i, star_col) && !self.coverage.is_row_covered(i) {
                self.zeros.set(i * cols + star_col);
            }
        }

        None
    }

    fn uncovered_min(&self) -> Option<U> {
        let (costs, coverage) = (&self.costs, &self.coverage);
        (0..costs.rows())
            .filter(|&row| !coverage.is_row_covered(row))
            .flat_map(move |row| {
                costs
                    .row(row)
                    .iter()
                    .enumerate()
                    .filter(move |&(col, _)| !coverage.is_col_covered(col))
                    .map(|(_, &v)| v)
            })
            .min()
    }

    /// Lowers the uncovered region by its minimum and raises the doubly
    /// covered cells by the same amount, exposing at least one new uncovered
    /// zero, then indexes the new zeros. The raise saturates at
    /// `U::max_value()`. Row covers and primes of the running search are kept.
    pub(crate) fn adjust_duals(&mut self) {
        // while the matching is incomplete some row and some column are open
        let Some(delta) = self.uncovered_min() else {
            debug_assert!(false, "no uncovered cell left to adjust");
            return;
        };
        debug_assert!(!delta.is_zero());
        trace!(?delta, adjustment = self.adjustments, "adjusting duals");
        self.adjustments += 1;

        let coverage = &self.coverage;
        for row in 0..self.costs.rows() {
            let row_covered = coverage.is_row_covered(row);
            for (col, v) in self.costs.row_mut(row).iter_mut().enumerate() {
                match (row_covered, coverage.is_col_covered(col)) {
                    (true, true) => *v = v.checked_add(&delta).unwrap_or_else(U::max_value),
                    (false, false) => *v = *v - delta,
                    _ => {}
                }
            }
        }

        self.seed_zeros();
    }
}
