//! Configuration for the rename engine.
//!
//! This module defines the geometry parameters fixed at construction time. It provides:
//! 1. **Defaults:** Baseline geometry (register counts, checkpoint slots, active list depth).
//! 2. **Structure:** `RenamerConfig` with per-field serde defaults for JSON-driven setup.
//! 3. **Validation:** `validate()` reporting the fatal geometry violations.
//!
//! Configuration is supplied via JSON by an embedding simulator, or use
//! `RenamerConfig::default()` for a standalone instance.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default geometry constants for the rename engine.
///
/// These values define the baseline configuration when a field is not
/// explicitly overridden in the driver-supplied JSON.
mod defaults {
    /// Default number of architectural (logical) registers.
    ///
    /// A flat 64-entry architectural space: 32 integer plus 32 floating-point
    /// names, renamed through a single unified pool.
    pub const LOGICAL_REGS: usize = 64;

    /// Default number of physical registers backing the rename pool.
    pub const PHYSICAL_REGS: usize = 160;

    /// Default number of branch checkpoint slots (branch mask width).
    pub const BRANCH_CHECKPOINTS: usize = 16;

    /// Default active list depth (maximum in-flight instructions).
    pub const ACTIVE_LIST_DEPTH: usize = 128;
}

/// Geometry of the rename engine, fixed at construction time.
///
/// All fields default so a driver only specifies what it changes:
///
/// ```
/// use renamer_core::config::RenamerConfig;
///
/// let json = r#"{ "logical_regs": 4, "physical_regs": 8 }"#;
/// let config: RenamerConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.logical_regs, 4);
/// assert_eq!(config.physical_regs, 8);
/// assert_eq!(config.branch_checkpoints, 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RenamerConfig {
    /// Number of architectural registers visible to instructions.
    #[serde(default = "RenamerConfig::default_logical_regs")]
    pub logical_regs: usize,

    /// Number of physical registers; must strictly exceed `logical_regs`.
    #[serde(default = "RenamerConfig::default_physical_regs")]
    pub physical_regs: usize,

    /// Number of branch checkpoint slots (`1..=64`); sets the branch mask width.
    #[serde(default = "RenamerConfig::default_branch_checkpoints")]
    pub branch_checkpoints: usize,

    /// Active list depth: the maximum number of in-flight instructions.
    #[serde(default = "RenamerConfig::default_active_list_depth")]
    pub active_list_depth: usize,
}

impl RenamerConfig {
    /// Returns the default logical register count.
    fn default_logical_regs() -> usize {
        defaults::LOGICAL_REGS
    }

    /// Returns the default physical register count.
    fn default_physical_regs() -> usize {
        defaults::PHYSICAL_REGS
    }

    /// Returns the default branch checkpoint slot count.
    fn default_branch_checkpoints() -> usize {
        defaults::BRANCH_CHECKPOINTS
    }

    /// Returns the default active list depth.
    fn default_active_list_depth() -> usize {
        defaults::ACTIVE_LIST_DEPTH
    }

    /// Checks the geometry invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: a physical pool not exceeding
    /// the logical space, a branch checkpoint count outside `1..=64`, or a
    /// zero-depth active list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physical_regs <= self.logical_regs {
            return Err(ConfigError::PhysicalPoolTooSmall {
                logical: self.logical_regs,
                physical: self.physical_regs,
            });
        }
        if self.branch_checkpoints == 0 || self.branch_checkpoints > 64 {
            return Err(ConfigError::BranchCheckpointsOutOfRange(
                self.branch_checkpoints,
            ));
        }
        if self.active_list_depth == 0 {
            return Err(ConfigError::ZeroActiveListDepth);
        }
        Ok(())
    }

    /// Number of free list slots implied by the geometry.
    ///
    /// At most `physical_regs - logical_regs` registers can be free at
    /// once, so the free list capacity is the size of the renaming pool.
    pub fn free_list_slots(&self) -> usize {
        self.physical_regs - self.logical_regs
    }
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            logical_regs: defaults::LOGICAL_REGS,
            physical_regs: defaults::PHYSICAL_REGS,
            branch_checkpoints: defaults::BRANCH_CHECKPOINTS,
            active_list_depth: defaults::ACTIVE_LIST_DEPTH,
        }
    }
}
