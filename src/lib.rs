//! O(n³) Hungarian (Kuhn-Munkres) algorithm for rectangular assignment
//! problems over integer costs.
//!
//! Given an `n x m` matrix, [`solve`] picks `min(n, m)` cells, no two sharing
//! a row or a column, with the smallest possible total. Any primitive integer
//! type works as a cost; signed costs are shifted into the unsigned type of the
//! same width before solving, which does not change the optimal pairing.
//!
//! ```
//! #[rustfmt::skip]
//! let costs = nalgebra::DMatrix::from_row_slice(2, 3, &[
//!     7u32, 3, 1,
//!     2,    8, 1,
//! ]);
//! let assignment = lsap::solve(&costs).unwrap();
//! assert_eq!(assignment.as_slice(), &[(0, 2), (1, 0)]);
//! assert_eq!(assignment.total_cost(&costs), Some(3));
//! ```
//!
//! Known limitation: raising doubly covered cells during dual adjustment
//! saturates at the maximum of the working type, so inputs whose reduced
//! costs approach that maximum can come back sub-optimal instead of wrapping.

use std::collections::TryReserveError;

mod assignment;
mod cost;
mod error;
mod marks;
mod matrix;
mod search;
mod solver;
mod zeros;

pub use assignment::Assignment;
pub use cost::Cost;
pub use error::{Error, InputError};
pub use solver::{solve, solve_rows, Objective, Solver};

fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, value);
    Ok(buf)
}
