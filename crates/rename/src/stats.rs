//! Rename statistics collection and reporting.
//!
//! This module tracks activity counters for the rename engine. It provides:
//! 1. **Throughput:** Destinations renamed, instructions dispatched and committed.
//! 2. **Speculation:** Checkpoints taken, branch resolutions, mispredictions, squashes.
//! 3. **Derived metrics:** Misprediction rate and a human-readable report.
//!
//! Counters only observe; they never influence renaming behavior.

use std::fmt::Write as _;

/// Activity counters for the rename engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameStats {
    /// Destination registers allocated from the free list.
    pub destinations_renamed: u64,
    /// Branch checkpoints allocated.
    pub checkpoints_taken: u64,
    /// Instructions entered into the active list.
    pub instructions_dispatched: u64,
    /// Instructions retired from the active list head.
    pub instructions_committed: u64,
    /// Branches resolved, in either direction.
    pub branches_resolved: u64,
    /// Branches resolved as mispredicted.
    pub branch_mispredictions: u64,
    /// Full pipeline flushes.
    pub squashes: u64,
}

impl RenameStats {
    /// Fraction of resolved branches that were mispredicted, in `[0, 1]`.
    ///
    /// Returns 0 when no branch has resolved yet.
    pub fn misprediction_rate(&self) -> f64 {
        if self.branches_resolved == 0 {
            0.0
        } else {
            self.branch_mispredictions as f64 / self.branches_resolved as f64
        }
    }

    /// Multi-line summary of the counters for end-of-run reporting.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "destinations renamed:    {}", self.destinations_renamed);
        let _ = writeln!(out, "checkpoints taken:       {}", self.checkpoints_taken);
        let _ = writeln!(out, "instructions dispatched: {}", self.instructions_dispatched);
        let _ = writeln!(out, "instructions committed:  {}", self.instructions_committed);
        let _ = writeln!(out, "branches resolved:       {}", self.branches_resolved);
        let _ = writeln!(
            out,
            "branch mispredictions:   {} ({:.2}%)",
            self.branch_mispredictions,
            self.misprediction_rate() * 100.0
        );
        let _ = writeln!(out, "squashes:                {}", self.squashes);
        out
    }
}
