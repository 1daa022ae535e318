//! Iterative lexicographic permutation generator.

/// Walks every ordering of a set of indices in lexicographic order.
///
/// The generator starts at the ascending ordering and rewrites its buffer in
/// place on each [`Permutations::advance`], so no ordering is allocated beyond
/// the one buffer. An empty set has exactly one (empty) ordering.
///
/// # Examples
///
/// ```
/// use waymark_core::Permutations;
///
/// let mut orderings = Permutations::new(vec![3, 1, 2]);
/// let mut seen = vec![orderings.as_slice().to_vec()];
/// while orderings.advance() {
///     seen.push(orderings.as_slice().to_vec());
/// }
/// assert_eq!(seen.len(), 6);
/// assert_eq!(seen.first(), Some(&vec![1, 2, 3]));
/// assert_eq!(seen.last(), Some(&vec![3, 2, 1]));
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    items: Vec<usize>,
    exhausted: bool,
}

impl Permutations {
    /// Start at the ascending ordering of `items`.
    #[must_use]
    pub fn new(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        Self {
            items,
            exhausted: false,
        }
    }

    /// The current ordering.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }

    /// Move to the next ordering.
    ///
    /// Returns `false` once every ordering has been visited; the buffer is
    /// then back in ascending order and further calls keep returning `false`.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if next_permutation(&mut self.items) {
            true
        } else {
            self.exhausted = true;
            false
        }
    }
}

/// Rearrange `items` into the next lexicographically greater permutation.
///
/// Returns `false` and resets `items` to ascending order when `items` is
/// already the greatest permutation.
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = items
        .windows(2)
        .rposition(|pair| matches!(pair, [lhs, rhs] if lhs < rhs))
    else {
        items.reverse();
        return false;
    };
    let successor = items
        .get(pivot)
        .and_then(|pivot_item| items.iter().rposition(|item| item > pivot_item));
    let Some(successor) = successor else {
        return false;
    };
    items.swap(pivot, successor);
    if let Some(tail) = items.get_mut(pivot + 1..) {
        tail.reverse();
    }
    true
}
