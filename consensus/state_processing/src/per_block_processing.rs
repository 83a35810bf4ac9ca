use crate::per_slot_processing::process_slots;
use crate::Error;
use tree_hash::TreeHash;
use types::{BeaconBlock, BeaconState, EthSpec, SignedBeaconBlock};

/// Whether `process_block` should check the block's declared `state_root` against the state
/// produced by applying it. Skipped during replay of blocks that are already known-good (the
/// common case when reconstructing an intermediate state from a boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyBlockRoot {
    True,
    False,
}

/// Updates `state.latest_block_header` to reflect `block`, after checking that `block` actually
/// chains onto `state`.
///
/// Attestation, deposit, exit and slashing processing are out of scope for this core (see
/// `types::BeaconBlockBody`); this is the entirety of per-block processing here.
pub fn per_block_processing<E: EthSpec>(
    state: &mut BeaconState<E>,
    block: &BeaconBlock<E>,
) -> Result<(), Error> {
    if block.slot != state.slot() {
        return Err(Error::BlockSlotMismatch {
            block_slot: block.slot,
            state_slot: state.slot(),
        });
    }

    let expected_parent_root = state.latest_block_header().canonical_root();
    if block.parent_root != expected_parent_root {
        return Err(Error::BlockParentRootMismatch {
            expected: expected_parent_root,
            found: block.parent_root,
        });
    }

    let mut new_header = block.temporary_block_header();
    // Placeholder until the next `per_slot_processing` call backfills it with this state's root.
    new_header.state_root = types::Hash256::zero();
    *state.latest_block_header_mut() = new_header;

    Ok(())
}

/// Advances `state` to `signed_block`'s slot and applies the block, as used by block replay
/// when reconstructing an intermediate state from its nearest epoch-boundary ancestor.
pub fn process_block<E: EthSpec>(
    state: &mut BeaconState<E>,
    signed_block: &SignedBeaconBlock<E>,
    verify_block_root: VerifyBlockRoot,
) -> Result<(), Error> {
    process_slots(state, signed_block.slot())?;
    per_block_processing(state, &signed_block.message)?;

    if verify_block_root == VerifyBlockRoot::True {
        let computed = state.tree_hash_root();
        if computed != signed_block.state_root() {
            return Err(Error::StateRootMismatch {
                expected: signed_block.state_root(),
                computed,
            });
        }
    }

    Ok(())
}
