//! # Rename Stage Tests
//!
//! Verifies source lookups, destination allocation from the free list,
//! register and branch stall queries, and checkpoint slot allocation.

use renamer_core::{Renamer, RenamerConfig};

fn make(logical: usize, physical: usize, checkpoints: usize, depth: usize) -> Renamer {
    Renamer::new(&RenamerConfig {
        logical_regs: logical,
        physical_regs: physical,
        branch_checkpoints: checkpoints,
        active_list_depth: depth,
    })
}

// ══════════════════════════════════════════════════════════
// 1. Source renaming
// ══════════════════════════════════════════════════════════

#[test]
fn sources_start_as_identity() {
    let renamer = make(4, 8, 4, 8);
    for logical in 0..4 {
        assert_eq!(renamer.rename_source(logical), logical);
    }
}

#[test]
fn source_follows_latest_destination_rename() {
    let mut renamer = make(4, 8, 4, 8);
    let first = renamer.rename_destination(2);
    assert_eq!(renamer.rename_source(2), first);

    let second = renamer.rename_destination(2);
    assert_eq!(renamer.rename_source(2), second, "RMT tracks the newest mapping");
    assert_ne!(first, second);
}

#[test]
fn source_rename_does_not_mutate() {
    let renamer = make(4, 8, 4, 8);
    for _ in 0..10 {
        assert_eq!(renamer.rename_source(3), 3);
    }
    assert!(!renamer.stall_for_registers(4), "no register was consumed");
}

// ══════════════════════════════════════════════════════════
// 2. Destination allocation
// ══════════════════════════════════════════════════════════

#[test]
fn initial_pool_is_the_non_architectural_ids() {
    // 4 logical / 8 physical: the pool must be exactly {4, 5, 6, 7}.
    let mut renamer = make(4, 8, 4, 8);
    let mut ids = Vec::new();
    for logical in 0..4 {
        ids.push(renamer.rename_destination(logical));
    }
    assert_eq!(ids, vec![4, 5, 6, 7]);
    assert!(renamer.stall_for_registers(1), "pool is drained");
}

#[test]
fn scenario_first_rename_takes_id_four() {
    let mut renamer = make(4, 8, 4, 8);
    assert_eq!(renamer.rename_destination(0), 4);
    assert_eq!(renamer.rename_source(0), 4);
    // Three registers remain free.
    assert!(!renamer.stall_for_registers(3));
    assert!(renamer.stall_for_registers(4));
}

#[test]
fn renamed_ids_are_pairwise_distinct() {
    let mut renamer = make(8, 24, 4, 8);
    let mut seen = std::collections::HashSet::new();
    for i in 0..16 {
        let physical = renamer.rename_destination(i % 8);
        assert!(physical >= 8 && physical < 24, "id {physical} outside the pool");
        assert!(seen.insert(physical), "id {physical} allocated twice");
    }
}

// ══════════════════════════════════════════════════════════
// 3. Register stall query
// ══════════════════════════════════════════════════════════

#[test]
fn stall_for_registers_at_every_fill_level() {
    for consumed in 0..=4 {
        let mut renamer = make(4, 8, 4, 8);
        for i in 0..consumed {
            let _ = renamer.rename_destination(i);
        }
        let free = 4 - consumed;
        for bundle in 0..=5 {
            assert_eq!(
                renamer.stall_for_registers(bundle),
                free < bundle,
                "consumed={consumed} bundle={bundle}"
            );
        }
    }
}

#[test]
fn empty_bundle_never_stalls() {
    let mut renamer = make(4, 8, 4, 8);
    for i in 0..4 {
        let _ = renamer.rename_destination(i);
    }
    assert!(!renamer.stall_for_registers(0));
    assert!(!renamer.stall_for_branches(0));
    assert!(!renamer.stall_for_active_list(0));
}

// ══════════════════════════════════════════════════════════
// 4. Checkpoints and the branch stall query
// ══════════════════════════════════════════════════════════

#[test]
fn checkpoints_allocate_lowest_slot_first() {
    let mut renamer = make(4, 8, 4, 8);
    assert_eq!(renamer.checkpoint(), 0);
    assert_eq!(renamer.checkpoint(), 1);
    assert_eq!(renamer.checkpoint(), 2);
    assert_eq!(renamer.branch_mask(), 0b111);
}

#[test]
fn stall_for_branches_counts_free_mask_bits() {
    let mut renamer = make(4, 8, 2, 8);
    assert!(!renamer.stall_for_branches(2));
    assert!(renamer.stall_for_branches(3));

    let _ = renamer.checkpoint();
    assert!(!renamer.stall_for_branches(1));
    assert!(renamer.stall_for_branches(2));

    let _ = renamer.checkpoint();
    assert!(renamer.stall_for_branches(1));
}

#[test]
fn single_slot_rotates_through_resolve() {
    // One checkpoint slot: a second branch only fits after the first
    // resolves and frees the slot.
    let mut renamer = make(4, 8, 1, 8);
    assert!(!renamer.stall_for_branches(1));
    assert!(renamer.stall_for_branches(2), "two branches never fit one slot");

    let branch = renamer.checkpoint();
    assert_eq!(branch, 0);
    assert!(renamer.stall_for_branches(1));

    let al_index = renamer.dispatch(
        None,
        renamer_core::core::active_list::InstClass {
            branch: true,
            ..Default::default()
        },
        0x1000,
    );
    renamer.resolve(al_index, branch, true);

    assert!(!renamer.stall_for_branches(1), "resolve frees the slot");
    assert_eq!(renamer.checkpoint(), 0);
}

#[test]
fn stats_count_renames_and_checkpoints() {
    let mut renamer = make(4, 8, 4, 8);
    let _ = renamer.rename_destination(0);
    let _ = renamer.rename_destination(1);
    let _ = renamer.checkpoint();

    assert_eq!(renamer.stats().destinations_renamed, 2);
    assert_eq!(renamer.stats().checkpoints_taken, 1);
}
