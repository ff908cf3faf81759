//! Register renaming engine for out-of-order pipeline simulation.
//!
//! This crate implements the rename stage of a speculative out-of-order core with the following:
//! 1. **Map tables:** Speculative (RMT) and architectural (AMT) logical-to-physical mappings.
//! 2. **Free list:** Circular pool of physical registers not bound to any logical register.
//! 3. **Active list:** In-order tracking of in-flight instructions for commit and squash.
//! 4. **Physical register file:** Per-register ready bits and value storage.
//! 5. **Checkpoints:** Branch-mask-indexed rename snapshots for misprediction recovery.
//!
//! The crate is a library with no I/O of its own: a pipeline simulator drives
//! it once per simulated cycle, in protocol order (stall queries, then rename
//! and dispatch for the bundle, then completion, resolution, and commit).

/// Common types shared across the crate (configuration errors).
pub mod common;
/// Renamer configuration (defaults, validation, JSON deserialization).
pub mod config;
/// Rename engine (map tables, free list, active list, PRF, checkpoints).
pub mod core;
/// Rename statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `RenamerConfig::default()` or deserialize from JSON.
pub use crate::config::RenamerConfig;
/// Main renamer type; owns all rename state and exposes the per-stage operations.
pub use crate::core::Renamer;
