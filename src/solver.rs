use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use nalgebra::{Dim, Matrix, RawStorage, Scalar};
use num_traits::{Bounded, PrimInt, Unsigned};
use tracing::{debug, trace};

use crate::assignment::Assignment;
use crate::cost::Cost;
use crate::error::{Error, InputError};
use crate::matrix::CostMatrix;
use crate::search::Search;

/// Whether the solver looks for the cheapest or the most valuable pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    #[default]
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Reduced,
    Marked,
    Searching,
    Adjusting,
    Complete,
}

/// Configurable entry point.
///
/// ```
/// use lsap::{Objective, Solver};
///
/// let profits = vec![vec![3u32, 1], vec![2, 2]];
/// let assignment = Solver::new()
///     .with_objective(Objective::Maximize)
///     .solve_rows(&profits)
///     .unwrap();
/// assert_eq!(assignment.total_cost_rows(&profits), Some(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    objective: Objective,
    cancel: Option<Arc<AtomicBool>>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Aborts a running solve with [`Error::Cancelled`] once `flag` is set.
    /// The flag is polled before every dual adjustment and every augmentation.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn solve<T, R, C, S>(&self, costs: &Matrix<T, R, C, S>) -> Result<Assignment, Error>
    where
        T: Cost + Scalar,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        let (rows, cols) = costs.shape();
        if rows == 0 || cols == 0 {
            return Err(InputError::ZeroDimension { rows, cols }.into());
        }

        let objective = self.objective;
        let working = CostMatrix::load(rows, cols, |i, j| to_working(costs[(i, j)], objective))?;
        self.run(working)
    }

    pub fn solve_rows<T, Row>(&self, rows: &[Row]) -> Result<Assignment, Error>
    where
        T: Cost,
        Row: AsRef<[T]>,
    {
        let cols = check_rows(rows)?;

        let objective = self.objective;
        let working = CostMatrix::load(rows.len(), cols, |i, j| {
            to_working(rows[i].as_ref()[j], objective)
        })?;
        self.run(working)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(rows = costs.rows(), cols = costs.cols(), transposed = costs.is_transposed())
    )]
    fn run<U>(&self, mut costs: CostMatrix<U>) -> Result<Assignment, Error>
    where
        U: PrimInt + Unsigned + Debug,
    {
        debug!(objective = ?self.objective, "solving");
        let mut state = State::Init;

        // subtract minimum value from each respective row, then column
        costs.reduce_rows();
        if costs.is_square() {
            costs.reduce_columns();
        }
        advance(&mut state, State::Reduced);

        let rows = costs.rows();
        let transposed = costs.is_transposed();
        let mut search = Search::new(costs, self.cancel.as_deref())?;

        let mut stars = search.mark_initial();
        advance(&mut state, State::Marked);

        let mut augmentations = 0;
        while stars < rows {
            advance(&mut state, State::Searching);
            search.check_cancelled()?;
            search.begin_path();

            let (row, col) = loop {
                if let Some(end) = search.next_path_end() {
                    break end;
                }
                advance(&mut state, State::Adjusting);
                search.check_cancelled()?;
                search.adjust_duals();
                advance(&mut state, State::Searching);
            };

            stars = search.augment(row, col);
            augmentations += 1;
        }
        advance(&mut state, State::Complete);

        debug!(
            augmentations,
            adjustments = search.adjustments,
            "solved"
        );

        let pairs = search
            .marks()
            .stars()
            .map(|(row, col)| if transposed { (col, row) } else { (row, col) })
            .collect();
        Ok(Assignment::new(pairs))
    }
}

/// Solves the minimum-cost assignment for `costs`.
///
/// Returns `min(rows, cols)` pairs, each row and column used at most once.
///
/// ```
/// let costs = nalgebra::Matrix3::new(
///     4u32, 1, 3,
///     2, 0, 5,
///     3, 2, 2,
/// );
/// let assignment = lsap::solve(&costs).unwrap();
/// assert_eq!(assignment.as_slice(), &[(0, 1), (1, 0), (2, 2)]);
/// ```
pub fn solve<T, R, C, S>(costs: &Matrix<T, R, C, S>) -> Result<Assignment, Error>
where
    T: Cost + Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    Solver::default().solve(costs)
}

/// Solves the minimum-cost assignment for costs given as a slice of rows.
pub fn solve_rows<T, Row>(rows: &[Row]) -> Result<Assignment, Error>
where
    T: Cost,
    Row: AsRef<[T]>,
{
    Solver::default().solve_rows(rows)
}

fn to_working<T: Cost>(value: T, objective: Objective) -> T::Unsigned {
    let value = value.to_unsigned();
    match objective {
        Objective::Minimize => value,
        Objective::Maximize => <T::Unsigned as Bounded>::max_value() - value,
    }
}

// returns the column count of a non-empty rectangular row set
fn check_rows<T, Row: AsRef<[T]>>(rows: &[Row]) -> Result<usize, InputError> {
    let Some(first) = rows.first() else {
        return Err(InputError::Empty);
    };

    let expected = first.as_ref().len();
    if expected == 0 {
        return Err(InputError::ZeroDimension {
            rows: rows.len(),
            cols: 0,
        });
    }

    match rows
        .iter()
        .enumerate()
        .find(|&(_, row)| row.as_ref().len() != expected)
    {
        Some((row, r)) => Err(InputError::Ragged {
            row,
            len: r.as_ref().len(),
            expected,
        }),
        None => Ok(expected),
    }
}

fn advance(state: &mut State, next: State) {
    if *state != next {
        trace!(from = ?*state, to = ?next, "state");
        *state = next;
    }
}
