//! Exact fixed-endpoint route ordering.
//!
//! Given a [`CostMatrix`] and distinct `start`/`end` indices, the optimizer
//! visits every ordering of the remaining indices and keeps the cheapest
//! path `start -> ... -> end`. Runtime grows factorially with the number of
//! intermediate stops, so callers should cap input sizes (the planner does).

mod permutations;

pub use permutations::Permutations;

use crate::{CostMatrix, Endpoint, InvalidInput};

/// The cheapest ordering of intermediate stops and its total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestRoute {
    /// Intermediate indices in visiting order, excluding start and end.
    pub order: Vec<usize>,
    /// Total cost from start through `order` to end.
    pub cost: u64,
}

impl BestRoute {
    /// Full index sequence including the fixed endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark_core::BestRoute;
    ///
    /// let best = BestRoute { order: vec![2, 1], cost: 12 };
    /// assert_eq!(best.stops(0, 3), vec![0, 2, 1, 3]);
    /// ```
    #[must_use]
    pub fn stops(&self, start: usize, end: usize) -> Vec<usize> {
        let mut stops = Vec::with_capacity(self.order.len() + 2);
        stops.push(start);
        stops.extend_from_slice(&self.order);
        stops.push(end);
        stops
    }
}

/// Orders intermediate stops between two fixed endpoints.
///
/// Implementations must be pure functions of their inputs and safe to call
/// from several threads at once.
pub trait RouteOptimizer: Send + Sync {
    /// Return the cheapest ordering of every index except `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] when an endpoint is out of range or both
    /// endpoints coincide.
    fn optimize(
        &self,
        matrix: &CostMatrix,
        start: usize,
        end: usize,
    ) -> Result<BestRoute, InvalidInput>;
}

/// [`RouteOptimizer`] that enumerates every ordering.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveOptimizer;

impl RouteOptimizer for ExhaustiveOptimizer {
    fn optimize(
        &self,
        matrix: &CostMatrix,
        start: usize,
        end: usize,
    ) -> Result<BestRoute, InvalidInput> {
        optimize(matrix, start, end)
    }
}

/// Find the cheapest ordering of the intermediate stops.
///
/// Orderings are enumerated lexicographically and only a strictly cheaper
/// ordering replaces the current best, so ties resolve to the
/// lexicographically smallest ordering.
///
/// # Errors
///
/// Returns [`InvalidInput::EndpointOutOfRange`] or
/// [`InvalidInput::IdenticalEndpoints`] before any ordering is evaluated.
///
/// # Examples
///
/// ```
/// use waymark_core::{CostMatrix, optimize};
///
/// # fn main() -> Result<(), waymark_core::InvalidInput> {
/// let matrix = CostMatrix::new(vec![
///     vec![0, 2, 9, 9],
///     vec![9, 0, 3, 9],
///     vec![9, 9, 0, 5],
///     vec![9, 9, 9, 0],
/// ])?;
/// let best = optimize(&matrix, 0, 3)?;
/// assert_eq!(best.order, vec![1, 2]);
/// assert_eq!(best.cost, 10);
/// # Ok(())
/// # }
/// ```
pub fn optimize(matrix: &CostMatrix, start: usize, end: usize) -> Result<BestRoute, InvalidInput> {
    validate_endpoints(matrix.size(), start, end)?;

    let intermediates: Vec<usize> = (0..matrix.size())
        .filter(|&index| index != start && index != end)
        .collect();
    log::debug!(
        "enumerating orderings of {} intermediate stops between {start} and {end}",
        intermediates.len()
    );

    let mut orderings = Permutations::new(intermediates);
    let mut best = BestRoute {
        cost: route_cost(matrix, start, orderings.as_slice(), end),
        order: orderings.as_slice().to_vec(),
    };
    while orderings.advance() {
        let cost = route_cost(matrix, start, orderings.as_slice(), end);
        if cost < best.cost {
            best.order.clear();
            best.order.extend_from_slice(orderings.as_slice());
            best.cost = cost;
        }
    }
    Ok(best)
}

/// Validate raw rows and optimise them in one step.
///
/// # Errors
///
/// Returns [`InvalidInput`] when the rows do not form a square matrix of at
/// least two points, or when the endpoints are invalid.
pub fn optimize_rows(
    rows: Vec<Vec<u64>>,
    start: usize,
    end: usize,
) -> Result<BestRoute, InvalidInput> {
    let matrix = CostMatrix::new(rows)?;
    optimize(&matrix, start, end)
}

/// Total cost of travelling `start -> order... -> end`.
///
/// With an empty `order` this is the direct cost `start -> end`. Sums
/// saturate at `u64::MAX`.
///
/// # Panics
///
/// Panics if any index is outside the matrix.
#[must_use]
pub fn route_cost(matrix: &CostMatrix, start: usize, order: &[usize], end: usize) -> u64 {
    let mut previous = start;
    let mut total = 0_u64;
    for &stop in order.iter().chain(std::iter::once(&end)) {
        total = total.saturating_add(matrix.cost(previous, stop));
        previous = stop;
    }
    total
}

const fn validate_endpoints(size: usize, start: usize, end: usize) -> Result<(), InvalidInput> {
    if start >= size {
        return Err(InvalidInput::EndpointOutOfRange {
            endpoint: Endpoint::Start,
            index: start,
            size,
        });
    }
    if end >= size {
        return Err(InvalidInput::EndpointOutOfRange {
            endpoint: Endpoint::End,
            index: end,
            size,
        });
    }
    if start == end {
        return Err(InvalidInput::IdenticalEndpoints { index: start });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// Four points where visiting 1 then 2 costs 10 and 2 then 1 costs 15.
    #[fixture]
    fn four_points() -> CostMatrix {
        CostMatrix::new(vec![
            vec![0, 2, 4, 50],
            vec![2, 0, 3, 6],
            vec![4, 3, 0, 5],
            vec![50, 6, 5, 0],
        ])
        .expect("valid matrix")
    }

    #[rstest]
    fn picks_cheaper_of_two_orderings(four_points: CostMatrix) {
        assert_eq!(route_cost(&four_points, 0, &[1, 2], 3), 10);
        assert_eq!(route_cost(&four_points, 0, &[2, 1], 3), 13);

        let best = optimize(&four_points, 0, 3).expect("valid input");
        assert_eq!(best, BestRoute { order: vec![1, 2], cost: 10 });
    }

    #[rstest]
    fn two_points_use_direct_cost() {
        let matrix = CostMatrix::new(vec![vec![0, 42], vec![17, 0]]).expect("valid matrix");

        let forward = optimize(&matrix, 0, 1).expect("valid input");
        assert!(forward.order.is_empty());
        assert_eq!(forward.cost, 42);

        let backward = optimize(&matrix, 1, 0).expect("valid input");
        assert_eq!(backward.cost, 17);
    }

    #[rstest]
    fn endpoints_need_not_be_first_or_last(four_points: CostMatrix) {
        let best = optimize(&four_points, 2, 1).expect("valid input");
        let mut visited = best.order.clone();
        visited.sort_unstable();
        assert_eq!(visited, vec![0, 3]);
        assert_eq!(best.cost, route_cost(&four_points, 2, &best.order, 1));
    }

    #[rstest]
    fn uses_directed_lookups() {
        // 0 -> 1 -> 2 -> 3 is cheap only in the forward direction.
        let matrix = CostMatrix::new(vec![
            vec![0, 1, 100, 100],
            vec![100, 0, 1, 100],
            vec![100, 100, 0, 1],
            vec![100, 100, 100, 0],
        ])
        .expect("valid matrix");

        let best = optimize(&matrix, 0, 3).expect("valid input");
        assert_eq!(best.order, vec![1, 2]);
        assert_eq!(best.cost, 3);
    }

    #[rstest]
    fn ties_keep_first_ordering() {
        let matrix = CostMatrix::new(vec![vec![1; 5]; 5]).expect("valid matrix");
        let best = optimize(&matrix, 0, 4).expect("valid input");
        assert_eq!(best.order, vec![1, 2, 3]);
        assert_eq!(best.cost, 4);
    }

    #[rstest]
    fn saturates_instead_of_overflowing() {
        let matrix = CostMatrix::new(vec![
            vec![0, u64::MAX, u64::MAX],
            vec![u64::MAX, 0, u64::MAX],
            vec![u64::MAX, u64::MAX, 0],
        ])
        .expect("valid matrix");
        let best = optimize(&matrix, 0, 2).expect("valid input");
        assert_eq!(best.order, vec![1]);
        assert_eq!(best.cost, u64::MAX);
    }

    #[rstest]
    #[case(4, 0, InvalidInput::EndpointOutOfRange { endpoint: Endpoint::Start, index: 4, size: 4 })]
    #[case(0, 9, InvalidInput::EndpointOutOfRange { endpoint: Endpoint::End, index: 9, size: 4 })]
    #[case(2, 2, InvalidInput::IdenticalEndpoints { index: 2 })]
    fn rejects_invalid_endpoints(
        four_points: CostMatrix,
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected: InvalidInput,
    ) {
        let err = optimize(&four_points, start, end).expect_err("invalid endpoints");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn optimize_rows_rejects_malformed_matrix() {
        let err = optimize_rows(vec![vec![0]], 0, 0).expect_err("single point");
        assert_eq!(err, InvalidInput::TooFewPoints { size: 1 });

        let err = optimize_rows(vec![vec![0, 1], vec![1]], 0, 1).expect_err("ragged");
        assert!(matches!(err, InvalidInput::RaggedRow { row: 1, .. }));
    }

    #[rstest]
    fn exhaustive_optimizer_delegates(four_points: CostMatrix) {
        let via_trait = ExhaustiveOptimizer
            .optimize(&four_points, 0, 3)
            .expect("valid input");
        assert_eq!(via_trait, optimize(&four_points, 0, 3).expect("valid input"));
    }
}
