use crate::Error;
use tree_hash::TreeHash;
use types::{BeaconState, EthSpec, Hash256};

/// Advances `state` by exactly one slot, caching the previous slot's state root and block root
/// into the state's rings before incrementing `state.slot`.
///
/// `state_root` lets a caller that already knows the pre-advance state's root (e.g. because it
/// just decoded `state` from a blob keyed on that root) skip recomputing the tree hash.
pub fn per_slot_processing<E: EthSpec>(
    state: &mut BeaconState<E>,
    state_root: Option<Hash256>,
) -> Result<(), Error> {
    cache_state(state, state_root)?;

    let next_slot = state.slot() + 1;
    *state.slot_mut() = next_slot;

    Ok(())
}

/// Advances `state` slot-by-slot until `state.slot() == target_slot`. A no-op if the state is
/// already at or past `target_slot`.
pub fn process_slots<E: EthSpec>(state: &mut BeaconState<E>, target_slot: types::Slot) -> Result<(), Error> {
    while state.slot() < target_slot {
        per_slot_processing(state, None)?;
    }
    Ok(())
}

fn cache_state<E: EthSpec>(state: &mut BeaconState<E>, state_root: Option<Hash256>) -> Result<(), Error> {
    let previous_slot = state.slot();
    let previous_state_root = state_root.unwrap_or_else(|| state.tree_hash_root());

    // The genesis header (and any header freshly written by `process_block_header`) carries a
    // placeholder zero state root, to be backfilled with the root of the state it was signed
    // against exactly once, here.
    if state.latest_block_header().state_root == Hash256::zero() {
        state.latest_block_header_mut().state_root = previous_state_root;
    }
    let latest_block_root = state.latest_block_header().canonical_root();

    state.set_state_root(previous_slot, previous_state_root)?;
    state.set_block_root(previous_slot, latest_block_root)?;

    Ok(())
}
