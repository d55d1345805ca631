use nalgebra::{Dim, Matrix, RawStorage, Scalar};
use num_traits::{CheckedAdd, Zero};

/// The optimal `(row, col)` pairs of a solve, in the caller's orientation.
///
/// Holds exactly `min(rows, cols)` pairs. Pairs are ordered by the index of
/// the shorter dimension: by row for wide or square inputs, by column for
/// tall ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pairs: Vec<(usize, usize)>,
}

impl Assignment {
    pub(crate) fn new(pairs: Vec<(usize, usize)>) -> Self {
        Self { pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.pairs
    }

    /// Column matched to `row`, if the row is part of the assignment.
    pub fn column_for(&self, row: usize) -> Option<usize> {
        self.pairs.iter().find(|&&(r, _)| r == row).map(|&(_, c)| c)
    }

    /// Row matched to `col`, if the column is part of the assignment.
    pub fn row_for(&self, col: usize) -> Option<usize> {
        self.pairs.iter().find(|&&(_, c)| c == col).map(|&(r, _)| r)
    }

    /// Sums the selected entries of `costs`, or `None` if the sum overflows
    /// `T` or a pair lies outside the matrix.
    pub fn total_cost<T, R, C, S>(&self, costs: &Matrix<T, R, C, S>) -> Option<T>
    where
        T: Scalar + Copy + CheckedAdd + Zero,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        self.pairs
            .iter()
            .try_fold(T::zero(), |acc, &pair| acc.checked_add(costs.get(pair)?))
    }

    /// Like [`Assignment::total_cost`], for costs given as rows.
    pub fn total_cost_rows<T, Row>(&self, rows: &[Row]) -> Option<T>
    where
        T: Copy + CheckedAdd + Zero,
        Row: AsRef<[T]>,
    {
        self.pairs.iter().try_fold(T::zero(), |acc, &(r, c)| {
            acc.checked_add(rows.get(r)?.as_ref().get(c)?)
        })
    }
}

impl IntoIterator for Assignment {
    type Item = (usize, usize);
    type IntoIter = std::vec::IntoIter<(usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (usize, usize);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (usize, usize)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter().copied()
    }
}

#[cfg(test)]
mod test {
    use nalgebra::Matrix2x3;

    use super::*;

    #[test]
    fn lookups() {
        let assignment = Assignment::new(vec![(0, 2), (1, 0)]);
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.column_for(0), Some(2));
        assert_eq!(assignment.column_for(2), None);
        assert_eq!(assignment.row_for(0), Some(1));
        assert_eq!(assignment.row_for(1), None);
        assert_eq!((&assignment).into_iter().count(), 2);
    }

    #[test]
    fn total_cost_on_matrix() {
        #[rustfmt::skip]
        let costs = Matrix2x3::from_row_slice(&[
            1u32, 2, 3,
            4,    5, 6,
        ]);
        let assignment = Assignment::new(vec![(0, 2), (1, 0)]);
        assert_eq!(assignment.total_cost(&costs), Some(7));
    }

    #[test]
    fn total_cost_reports_overflow() {
        let costs = vec![vec![u8::MAX, 0], vec![0, 1]];
        let assignment = Assignment::new(vec![(0, 0), (1, 1)]);
        assert_eq!(assignment.total_cost_rows(&costs), None);
        let assignment = Assignment::new(vec![(0, 1), (1, 0)]);
        assert_eq!(assignment.total_cost_rows(&costs), Some(0));
    }

    #[test]
    fn total_cost_out_of_bounds() {
        let costs = vec![vec![1i32, 2]];
        let assignment = Assignment::new(vec![(0, 5)]);
        assert_eq!(assignment.total_cost_rows(&costs), None);
    }
}
