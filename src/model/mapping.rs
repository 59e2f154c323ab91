//! Vertex mappings produced by the subisomorphism enumerator.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Sentinel written into slot 0 to invalidate a mapping during cleanup.
pub const INVALID_SLOT: i64 = -1;

/// An ordered assignment of host vertices, one slot per pattern vertex.
///
/// Mappings are produced once by the oracle and consumed read-only; the only
/// mutation is [`Mapping::invalidate`], which stamps [`INVALID_SLOT`] into
/// slot 0. Patterns are 3–4 vertices, so slots live inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping(SmallVec<[i64; 4]>);

impl Mapping {
    pub fn new(slots: impl IntoIterator<Item = i64>) -> Self {
        Self(slots.into_iter().collect())
    }

    /// Number of slots == pattern size.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw slot values, sentinel included.
    pub fn slots(&self) -> &[i64] {
        &self.0
    }

    /// Host vertex mapped to pattern vertex `k`. Call only on valid mappings.
    pub fn vertex(&self, k: usize) -> u32 {
        debug_assert!(self.is_valid());
        self.0[k] as u32
    }

    /// Host vertices as a dense array, for induced-subgraph lookups.
    pub fn vertices(&self) -> SmallVec<[u32; 4]> {
        debug_assert!(self.is_valid());
        self.0.iter().map(|&v| v as u32).collect()
    }

    /// Stamp the sentinel into slot 0, marking this mapping spurious.
    pub fn invalidate(&mut self) {
        self.0[0] = INVALID_SLOT;
    }

    pub fn is_valid(&self) -> bool {
        self.0.first().is_some_and(|&v| v != INVALID_SLOT)
    }

    pub fn contains(&self, vertex: i64) -> bool {
        self.0.contains(&vertex)
    }

    /// How many of `self`'s vertices also appear in `other`, order-free.
    pub fn shared_vertices(&self, other: &Mapping) -> usize {
        self.0.iter().filter(|v| other.0.contains(v)).count()
    }

    /// Set-wise equality of the two vertex sets.
    ///
    /// Slots within one mapping are distinct (the enumerator is injective),
    /// so a full overlap means the same instance.
    pub fn same_vertex_set(&self, other: &Mapping) -> bool {
        self.0.len() == other.0.len() && self.shared_vertices(other) == self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_round_trip() {
        let mut m = Mapping::new([4, 7, 2]);
        assert!(m.is_valid());
        m.invalidate();
        assert!(!m.is_valid());
        assert_eq!(m.slots()[0], INVALID_SLOT);
    }

    #[test]
    fn test_shared_vertices_is_order_free() {
        let a = Mapping::new([1, 2, 3]);
        let b = Mapping::new([3, 1, 9]);
        assert_eq!(a.shared_vertices(&b), 2);
        assert_eq!(b.shared_vertices(&a), 2);
    }

    #[test]
    fn test_same_vertex_set() {
        let a = Mapping::new([5, 1, 8]);
        let b = Mapping::new([8, 5, 1]);
        let c = Mapping::new([8, 5, 2]);
        assert!(a.same_vertex_set(&b));
        assert!(!a.same_vertex_set(&c));
    }
}
