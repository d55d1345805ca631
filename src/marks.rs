use num_traits::{PrimInt, Unsigned};

use crate::error::Error;
use crate::matrix::CostMatrix;
use crate::try_filled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Mark {
    #[default]
    Unmarked,
    Star,
    Prime,
}

/// Covered rows and columns of the working matrix.
#[derive(Debug)]
pub(crate) struct Coverage {
    rows: Vec<bool>,
    cols: Vec<bool>,
}

impl Coverage {
    pub(crate) fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        Ok(Self {
            rows: try_filled(rows, false)?,
            cols: try_filled(cols, false)?,
        })
    }

    #[inline]
    pub(crate) fn is_row_covered(&self, row: usize) -> bool {
        self.rows[row]
    }

    #[inline]
    pub(crate) fn is_col_covered(&self, col: usize) -> bool {
        self.cols[col]
    }

    pub(crate) fn cover_row(&mut self, row: usize) {
        self.rows[row] = true;
    }

    pub(crate) fn cover_col(&mut self, col: usize) {
        self.cols[col] = true;
    }

    pub(crate) fn uncover_col(&mut self, col: usize) {
        self.cols[col] = false;
    }

    /// Uncovers every row and covers exactly the columns holding a star.
    /// Returns the number of covered columns, which is the star count.
    pub(crate) fn recount(&mut self, marks: &Marks) -> usize {
        self.rows.fill(false);
        let mut count = 0;
        for (col, covered) in self.cols.iter_mut().enumerate() {
            *covered = marks.star_in_col(col).is_some();
            count += usize::from(*covered);
        }
        count
    }
}

/// Per-cell marks plus the lookups the path search needs: the star of each
/// row and column and the prime of each row.
///
/// A row or column never holds more than one star. Primes only exist between
/// the start of an augmenting-path search and the [`Marks::augment`] that ends
/// it.
#[derive(Debug)]
pub(crate) struct Marks {
    cols: usize,
    cells: Vec<Mark>,
    row_star: Vec<Option<usize>>,
    col_star: Vec<Option<usize>>,
    row_prime: Vec<Option<usize>>,
}

impl Marks {
    pub(crate) fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        Ok(Self {
            cols,
            cells: try_filled(rows * cols, Mark::Unmarked)?,
            row_star: try_filled(rows, None)?,
            col_star: try_filled(cols, None)?,
            row_prime: try_filled(rows, None)?,
        })
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> Mark {
        self.cells[row * self.cols + col]
    }

    /// Column of the star in `row`, if any.
    #[inline]
    pub(crate) fn star_in_row(&self, row: usize) -> Option<usize> {
        self.row_star[row]
    }

    /// Row of the star in `col`, if any.
    #[inline]
    pub(crate) fn star_in_col(&self, col: usize) -> Option<usize> {
        self.col_star[col]
    }

    pub(crate) fn star(&mut self, row: usize, col: usize) {
        debug_assert!(self.row_star[row].is_none() && self.col_star[col].is_none());
        self.cells[row * self.cols + col] = Mark::Star;
        self.row_star[row] = Some(col);
        self.col_star[col] = Some(row);
        if self.row_prime[row] == Some(col) {
            self.row_prime[row] = None;
        }
    }

    fn unstar(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = Mark::Unmarked;
        self.row_star[row] = None;
        self.col_star[col] = None;
    }

    pub(crate) fn prime(&mut self, row: usize, col: usize) {
        debug_assert!(self.row_prime[row].is_none());
        self.cells[row * self.cols + col] = Mark::Prime;
        self.row_prime[row] = Some(col);
    }

    /// Greedy initial matching: in each row, stars the first zero whose column
    /// has no star yet and covers that column.
    pub(crate) fn star_initial_zeros<U>(&mut self, costs: &CostMatrix<U>, coverage: &mut Coverage)
    where
        U: PrimInt + Unsigned,
    {
        for row in 0..costs.rows() {
            let found = costs
                .row(row)
                .iter()
                .enumerate()
                .find(|&(col, v)| v.is_zero() && !coverage.is_col_covered(col))
                .map(|(col, _)| col);

            if let Some(col) = found {
                self.star(row, col);
                coverage.cover_col(col);
            }
        }
    }

    /// Flips the alternating chain ending at the prime `(row, col)`, whose
    /// row has no star: every prime on the chain becomes a star and every
    /// star it displaces is unmarked. Clears the remaining primes afterwards.
    pub(crate) fn augment(&mut self, row: usize, col: usize) {
        debug_assert_eq!(self.get(row, col), Mark::Prime);
        debug_assert!(self.row_star[row].is_none());

        let mut next = Some((row, col));
        while let Some((row, col)) = next {
            let displaced = self.col_star[col];
            if let Some(star_row) = displaced {
                self.unstar(star_row, col);
            }
            self.star(row, col);

            // the displaced star's row was covered by its prime during the search
            next = displaced.and_then(|star_row| self.row_prime[star_row].map(|c| (star_row, c)));
        }

        self.clear_primes();
    }

    fn clear_primes(&mut self) {
        for row in 0..self.row_prime.len() {
            if let Some(col) = self.row_prime[row].take() {
                let cell = &mut self.cells[row * self.cols + col];
                if *cell == Mark::Prime {
                    *cell = Mark::Unmarked;
                }
            }
        }
    }

    /// Starred cells in row order.
    pub(crate) fn stars(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_star
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|col| (row, col)))
    }
}
