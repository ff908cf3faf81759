//! Logical-to-physical register map tables.
//!
//! Both the speculative Register Map Table (RMT) and the committed
//! Architectural Map Table (AMT) are instances of [`MapTable`]; they differ
//! only in when they are written. The RMT changes on every destination
//! rename and on misprediction rollback; the AMT changes only at commit.

/// A fully-populated logical-to-physical register map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTable {
    map: Vec<usize>,
}

impl MapTable {
    /// Creates an identity mapping over `len` logical registers.
    pub fn identity(len: usize) -> Self {
        Self {
            map: (0..len).collect(),
        }
    }

    /// Number of logical registers covered by the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the table covers no registers.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Current physical mapping of `logical`.
    #[inline]
    pub fn get(&self, logical: usize) -> usize {
        self.map[logical]
    }

    /// Points `logical` at a new physical register.
    #[inline]
    pub fn set(&mut self, logical: usize, physical: usize) {
        self.map[logical] = physical;
    }

    /// Full table contents, copied into branch checkpoints.
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Overwrites the table from a checkpointed snapshot.
    pub fn restore(&mut self, snapshot: &[usize]) {
        self.map.copy_from_slice(snapshot);
    }

    /// Overwrites the table wholesale from another table (RMT := AMT on squash).
    pub fn copy_from(&mut self, other: &Self) {
        self.map.copy_from_slice(&other.map);
    }
}
