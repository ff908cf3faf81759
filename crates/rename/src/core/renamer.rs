//! Rename engine facade.
//!
//! [`Renamer`] owns the five rename structures and exposes the per-stage
//! operations a pipeline driver calls once per simulated cycle, in protocol
//! order:
//! 1. **Stall queries:** free registers, free checkpoint slots, active list room.
//! 2. **Rename:** source lookups, destination allocation, branch checkpoints.
//! 3. **Dispatch:** active list entry per instruction.
//! 4. **Execute:** PRF access, readiness bits, status flag writeback.
//! 5. **Resolve / commit / squash:** speculation recovery and in-order retirement.
//!
//! All operations trust the caller to have respected the matching stall
//! query; capacity contracts are checked with debug assertions only.

use tracing::{debug, trace};

use crate::config::RenamerConfig;
use crate::core::active_list::{ActiveList, DestReg, InstClass};
use crate::core::checkpoint::CheckpointTable;
use crate::core::free_list::FreeList;
use crate::core::map_table::MapTable;
use crate::core::prf::PhysRegFile;
use crate::stats::RenameStats;

/// Snapshot of the active list head entry, examined before commit.
///
/// Returned by [`Renamer::precommit`] so the driver can decide whether the
/// oldest instruction is safe to retire or needs a trap or replay first.
#[derive(Debug, Clone, Copy)]
pub struct Precommit {
    /// Execution finished.
    pub complete: bool,
    /// The instruction raised an exception.
    pub exception: bool,
    /// A load ordering violation was detected.
    pub load_violation: bool,
    /// The branch resolved against its prediction.
    pub branch_misprediction: bool,
    /// A predicted value proved wrong.
    pub value_misprediction: bool,
    /// Instruction class flags recorded at dispatch.
    pub class: InstClass,
    /// Program counter recorded at dispatch.
    pub pc: u64,
}

/// Register renaming engine for a speculative out-of-order pipeline.
///
/// Holds the speculative and architectural map tables, the free list, the
/// active list, the physical register file, and the branch checkpoint
/// table. Single-threaded by design: exactly one driver advances it.
#[derive(Debug)]
pub struct Renamer {
    rmt: MapTable,
    amt: MapTable,
    free_list: FreeList,
    active_list: ActiveList,
    prf: PhysRegFile,
    checkpoints: CheckpointTable,
    stats: RenameStats,
}

impl Renamer {
    /// Builds a renamer from a configuration.
    ///
    /// Both map tables start as the identity over the logical space, the
    /// free list holds every remaining physical register, the active list
    /// is empty, every PRF entry is ready, and no checkpoint is live.
    ///
    /// # Panics
    ///
    /// Panics if the configuration violates the geometry invariants; an
    /// invalid geometry is a driver bug, not a runtime condition. Use
    /// [`RenamerConfig::validate`] to pre-flight untrusted configurations.
    pub fn new(config: &RenamerConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid renamer configuration: {err}");
        }
        Self {
            rmt: MapTable::identity(config.logical_regs),
            amt: MapTable::identity(config.logical_regs),
            free_list: FreeList::new(config.logical_regs, config.physical_regs),
            active_list: ActiveList::new(config.active_list_depth),
            prf: PhysRegFile::new(config.physical_regs),
            checkpoints: CheckpointTable::new(config.branch_checkpoints, config.logical_regs),
            stats: RenameStats::default(),
        }
    }

    /// True when fewer physical registers are free than the bundle needs.
    pub fn stall_for_registers(&self, bundle_dests: usize) -> bool {
        self.free_list.len() < bundle_dests
    }

    /// True when fewer checkpoint slots are free than the bundle has branches.
    pub fn stall_for_branches(&self, bundle_branches: usize) -> bool {
        self.checkpoints.free_slots() < bundle_branches
    }

    /// Current speculative mapping of a source register.
    pub fn rename_source(&self, logical: usize) -> usize {
        self.rmt.get(logical)
    }

    /// Allocates a physical register for a destination and updates the RMT.
    ///
    /// The caller must have cleared [`Self::stall_for_registers`] for the
    /// whole bundle first; allocating from an empty pool is a contract
    /// violation.
    pub fn rename_destination(&mut self, logical: usize) -> usize {
        let physical = self.free_list.pop();
        self.rmt.set(logical, physical);
        self.stats.destinations_renamed += 1;
        trace!(logical, physical, "renamed destination");
        physical
    }

    /// Takes a branch checkpoint, returning the allocated slot id.
    ///
    /// The snapshot captures the RMT, the free list head position, and the
    /// branch mask with the new slot's bit already set. The caller must
    /// have cleared [`Self::stall_for_branches`] first.
    pub fn checkpoint(&mut self) -> usize {
        let (fl_head, fl_head_phase) = self.free_list.head_state();
        let slot = self
            .checkpoints
            .allocate(self.rmt.as_slice(), fl_head, fl_head_phase);
        self.stats.checkpoints_taken += 1;
        debug!(slot, gbm = self.checkpoints.branch_mask(), "checkpoint taken");
        slot
    }

    /// Current global branch mask.
    pub fn branch_mask(&self) -> u64 {
        self.checkpoints.branch_mask()
    }

    /// True when fewer active list slots are free than the bundle has instructions.
    pub fn stall_for_active_list(&self, bundle_insts: usize) -> bool {
        self.active_list.available() < bundle_insts
    }

    /// Enters an instruction into the active list, returning its index.
    ///
    /// The index addresses this instruction in all later writeback calls.
    /// The caller must have cleared [`Self::stall_for_active_list`] first.
    pub fn dispatch(&mut self, dest: Option<DestReg>, class: InstClass, pc: u64) -> usize {
        let index = self.active_list.push(dest, class, pc);
        self.stats.instructions_dispatched += 1;
        trace!(index, pc, "dispatched");
        index
    }

    /// Reads the value of a physical register.
    #[inline]
    pub fn read(&self, physical: usize) -> u64 {
        self.prf.read(physical)
    }

    /// Writes the value of a physical register.
    #[inline]
    pub fn write(&mut self, physical: usize, value: u64) {
        self.prf.write(physical, value);
    }

    /// Returns the ready bit of a physical register.
    #[inline]
    pub fn is_ready(&self, physical: usize) -> bool {
        self.prf.is_ready(physical)
    }

    /// Sets the ready bit of a physical register.
    #[inline]
    pub fn set_ready(&mut self, physical: usize) {
        self.prf.set_ready(physical);
    }

    /// Clears the ready bit of a physical register.
    #[inline]
    pub fn clear_ready(&mut self, physical: usize) {
        self.prf.clear_ready(physical);
    }

    /// Marks active list entry `index` as finished executing.
    pub fn set_complete(&mut self, index: usize) {
        self.active_list.entry_mut(index).complete = true;
    }

    /// Flags active list entry `index` with an exception.
    pub fn set_exception(&mut self, index: usize) {
        self.active_list.entry_mut(index).exception = true;
    }

    /// Flags active list entry `index` with a load ordering violation.
    pub fn set_load_violation(&mut self, index: usize) {
        self.active_list.entry_mut(index).load_violation = true;
    }

    /// Flags active list entry `index` as a mispredicted branch.
    pub fn set_branch_misprediction(&mut self, index: usize) {
        self.active_list.entry_mut(index).branch_misprediction = true;
    }

    /// Flags active list entry `index` with a value misprediction.
    pub fn set_value_misprediction(&mut self, index: usize) {
        self.active_list.entry_mut(index).value_misprediction = true;
    }

    /// Exception flag of active list entry `index`.
    pub fn get_exception(&self, index: usize) -> bool {
        self.active_list.entry(index).exception
    }

    /// Resolves the branch holding checkpoint slot `branch` at active list
    /// entry `al_index`.
    ///
    /// A correct prediction releases the slot, clearing its bit everywhere.
    /// A misprediction restores the RMT, free list head, and branch mask
    /// from the snapshot and discards every active list entry younger than
    /// the branch; the branch itself stays in flight until commit.
    pub fn resolve(&mut self, al_index: usize, branch: usize, correct: bool) {
        self.stats.branches_resolved += 1;
        if correct {
            self.checkpoints.release(branch);
            debug!(branch, "branch resolved correct");
        } else {
            self.stats.branch_mispredictions += 1;
            let snapshot = self.checkpoints.rollback(branch);
            self.rmt.restore(&snapshot.shadow_rmt);
            self.free_list
                .rewind_head(snapshot.fl_head, snapshot.fl_head_phase);
            self.active_list.truncate_after(al_index);
            debug!(branch, al_index, "branch mispredicted, rename state rolled back");
        }
    }

    /// Examines the oldest in-flight instruction without mutating state.
    ///
    /// Returns `None` when nothing is in flight. The driver inspects the
    /// flags to choose between [`Self::commit`], a replay, or a
    /// [`Self::squash`].
    pub fn precommit(&self) -> Option<Precommit> {
        self.active_list.head_entry().map(|entry| Precommit {
            complete: entry.complete,
            exception: entry.exception,
            load_violation: entry.load_violation,
            branch_misprediction: entry.branch_misprediction,
            value_misprediction: entry.value_misprediction,
            class: entry.class,
            pc: entry.pc,
        })
    }

    /// Retires the oldest in-flight instruction.
    ///
    /// If it wrote a register, the physical register previously recorded in
    /// the AMT for that logical register returns to the free list (it can
    /// no longer be referenced) and the AMT adopts the new mapping.
    ///
    /// # Panics
    ///
    /// Panics if the head entry is missing, incomplete, excepted, or
    /// load-violated. The driver must examine [`Self::precommit`] first;
    /// committing such an entry is an internal-consistency bug.
    pub fn commit(&mut self) {
        let Some(head) = self.active_list.head_entry() else {
            panic!("commit on an empty active list");
        };
        assert!(head.complete, "commit of an incomplete instruction");
        assert!(!head.exception, "commit of an excepted instruction");
        assert!(!head.load_violation, "commit of a load-violated instruction");

        let head = self.active_list.pop_head();
        if let Some(dest) = head.dest {
            let superseded = self.amt.get(dest.logical);
            self.free_list.push(superseded);
            self.amt.set(dest.logical, dest.physical);
        }
        self.stats.instructions_committed += 1;
        #[cfg(feature = "commit-log")]
        tracing::info!(pc = head.pc, "committed");
    }

    /// Flushes all speculative state back to the last committed mapping.
    ///
    /// The active list empties, the free list reads full again, the RMT
    /// becomes a copy of the AMT, every PRF entry reads ready, and every
    /// checkpoint slot is cleared along with the branch mask.
    pub fn squash(&mut self) {
        self.active_list.clear();
        self.free_list.reset_full();
        self.rmt.copy_from(&self.amt);
        self.prf.set_all_ready();
        self.checkpoints.clear();
        self.stats.squashes += 1;
        debug!("pipeline squashed");
    }

    /// Activity counters accumulated since construction.
    pub fn stats(&self) -> &RenameStats {
        &self.stats
    }
}
