//! Dense pairwise cost matrix.
//!
//! Costs are non-negative integers (metres for distance matrices) and are
//! looked up with direction: `cost(a, b)` need not equal `cost(b, a)`.

use crate::InvalidInput;

/// A validated `n x n` matrix of travel costs stored in row-major order.
///
/// Construction guarantees at least two points and one entry per point in
/// every row, so any index below [`CostMatrix::size`] is a valid lookup.
///
/// # Examples
///
/// ```
/// use waymark_core::CostMatrix;
///
/// # fn main() -> Result<(), waymark_core::InvalidInput> {
/// let matrix = CostMatrix::new(vec![vec![0, 5], vec![7, 0]])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.cost(0, 1), 5);
/// assert_eq!(matrix.cost(1, 0), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<u64>>", into = "Vec<Vec<u64>>")
)]
pub struct CostMatrix {
    costs: Vec<u64>,
    size: usize,
}

impl CostMatrix {
    /// Validates `rows` and builds a matrix from them.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::TooFewPoints`] for fewer than two rows and
    /// [`InvalidInput::RaggedRow`] when a row length differs from the row
    /// count.
    pub fn new(rows: Vec<Vec<u64>>) -> Result<Self, InvalidInput> {
        let size = rows.len();
        if size < 2 {
            return Err(InvalidInput::TooFewPoints { size });
        }
        let mut costs = Vec::with_capacity(size.saturating_mul(size));
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != size {
                return Err(InvalidInput::RaggedRow {
                    row,
                    expected: size,
                    found: entries.len(),
                });
            }
            costs.extend(entries);
        }
        Ok(Self { costs, size })
    }

    /// Number of points covered by the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether `index` addresses a point in the matrix.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index < self.size
    }

    /// Cost of travelling from `from` to `to`, or `None` when either index is
    /// out of range.
    #[must_use]
    pub fn try_cost(&self, from: usize, to: usize) -> Option<u64> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        self.costs.get(from * self.size + to).copied()
    }

    /// Cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is not below [`CostMatrix::size`].
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "out-of-range lookups are a caller bug and documented to panic"
    )]
    pub fn cost(&self, from: usize, to: usize) -> u64 {
        assert!(
            self.contains(from) && self.contains(to),
            "cost lookup ({from}, {to}) outside {size}x{size} matrix",
            size = self.size
        );
        self.costs[from * self.size + to]
    }

    /// Iterate over the rows in origin order.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.costs.chunks_exact(self.size)
    }
}

impl TryFrom<Vec<Vec<u64>>> for CostMatrix {
    type Error = InvalidInput;

    fn try_from(rows: Vec<Vec<u64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<u64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.rows().map(<[u64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn asymmetric() -> CostMatrix {
        CostMatrix::new(vec![vec![0, 1, 2], vec![3, 0, 4], vec![5, 6, 0]])
            .expect("valid 3x3 matrix")
    }

    #[rstest]
    #[case(Vec::new(), 0)]
    #[case(vec![vec![0]], 1)]
    fn rejects_fewer_than_two_points(#[case] rows: Vec<Vec<u64>>, #[case] size: usize) {
        let err = CostMatrix::new(rows).expect_err("too few points");
        assert_eq!(err, InvalidInput::TooFewPoints { size });
    }

    #[rstest]
    fn rejects_ragged_rows() {
        let err = CostMatrix::new(vec![vec![0, 1, 2], vec![1, 0], vec![2, 1, 0]])
            .expect_err("second row is short");
        assert_eq!(
            err,
            InvalidInput::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[rstest]
    fn rejects_wide_rectangular_matrix() {
        let err = CostMatrix::new(vec![vec![0, 1, 2], vec![1, 0, 2]])
            .expect_err("2x3 is not square");
        assert!(matches!(err, InvalidInput::RaggedRow { row: 0, .. }));
    }

    #[rstest]
    fn lookups_are_directed(asymmetric: CostMatrix) {
        assert_eq!(asymmetric.cost(0, 2), 2);
        assert_eq!(asymmetric.cost(2, 0), 5);
        assert_eq!(asymmetric.cost(1, 2), 4);
        assert_eq!(asymmetric.cost(2, 1), 6);
    }

    #[rstest]
    fn try_cost_rejects_out_of_range(asymmetric: CostMatrix) {
        assert_eq!(asymmetric.try_cost(1, 0), Some(3));
        assert_eq!(asymmetric.try_cost(3, 0), None);
        assert_eq!(asymmetric.try_cost(0, 3), None);
    }

    #[rstest]
    #[should_panic(expected = "outside 3x3 matrix")]
    fn cost_panics_out_of_range(asymmetric: CostMatrix) {
        let _ = asymmetric.cost(0, 3);
    }

    #[rstest]
    fn converts_back_into_rows(asymmetric: CostMatrix) {
        let rows: Vec<Vec<u64>> = asymmetric.into();
        assert_eq!(rows, vec![vec![0, 1, 2], vec![3, 0, 4], vec![5, 6, 0]]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialisation_validates_shape() {
        let matrix: CostMatrix =
            serde_json::from_str("[[0, 10], [12, 0]]").expect("square matrix decodes");
        assert_eq!(matrix.cost(1, 0), 12);

        let err = serde_json::from_str::<CostMatrix>("[[0, 10], [12]]")
            .expect_err("ragged matrix is rejected");
        assert!(err.to_string().contains("row 1 has 1 entries"));
    }
}
