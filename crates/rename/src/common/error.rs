//! Configuration error definitions.
//!
//! This module defines the error type reported when a renamer configuration
//! violates the geometry invariants. It provides:
//! 1. **Typed Variants:** One variant per invariant, carrying the offending values.
//! 2. **Error Integration:** `std::error::Error` and `Display` via `thiserror`.

use thiserror::Error;

/// Errors produced when validating a [`crate::config::RenamerConfig`].
///
/// Every variant is fatal at construction time: [`crate::core::Renamer::new`]
/// panics on an invalid configuration. `validate()` exists so a driver can
/// pre-flight a deserialized configuration and report the problem instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The physical register file must strictly exceed the architectural
    /// register space; the excess registers form the renaming pool.
    #[error("physical register count ({physical}) must exceed logical register count ({logical})")]
    PhysicalPoolTooSmall {
        /// Configured number of logical registers.
        logical: usize,
        /// Configured number of physical registers.
        physical: usize,
    },

    /// Checkpoint slots are addressed by bit position in a 64-bit branch
    /// mask, so the slot count must lie in `1..=64`.
    #[error("branch checkpoint count ({0}) must be between 1 and 64")]
    BranchCheckpointsOutOfRange(usize),

    /// A zero-depth active list cannot hold any in-flight instruction.
    #[error("active list depth must be non-zero")]
    ZeroActiveListDepth,
}
