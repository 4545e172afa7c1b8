//! Incrementally maintained list of occupied positions.

use rand::Rng;

/// Canonical form of an unordered pair: smaller index first.
#[inline]
pub(crate) const fn canonical(left: usize, right: usize) -> (usize, usize) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

/// The current edge set as canonical pairs.
///
/// Slot order is stable: an accepted relocation overwrites the two drawn
/// slots in place, so no scan of the matrix is ever needed after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EdgeIndex {
    edges: Vec<(usize, usize)>,
}

impl EdgeIndex {
    pub(crate) fn new(edges: Vec<(usize, usize)>) -> Self {
        Self { edges }
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn as_slice(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Draws two distinct slots uniformly at random. Requires `len() >= 2`.
    pub(crate) fn draw_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        let count = self.edges.len();
        let first = rng.gen_range(0..count);
        let mut second = rng.gen_range(0..count - 1);
        if second >= first {
            second += 1;
        }
        (first, second)
    }

    pub(crate) fn get(&self, slot: usize) -> (usize, usize) {
        self.edges[slot]
    }

    pub(crate) fn replace(&mut self, slot: usize, edge: (usize, usize)) {
        self.edges[slot] = canonical(edge.0, edge.1);
    }
}
