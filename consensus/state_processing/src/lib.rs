//! State-transition functions: advancing a `BeaconState` slot-by-slot and applying blocks to it.
//!
//! This crate knows nothing about storage or caching; it is pure functions over `types::BeaconState`
//! that the hot/cold state manager in `store`/`beacon_chain` calls during replay.

mod errors;
mod per_block_processing;
mod per_slot_processing;

pub use errors::Error;
pub use per_block_processing::{per_block_processing, process_block, VerifyBlockRoot};
pub use per_slot_processing::{per_slot_processing, process_slots};

#[cfg(test)]
mod tests {
    use super::*;
    use types::test_utils::generate_deterministic_validators;
    use types::{BeaconBlock, BeaconBlockBody, BeaconState, Hash256, MinimalEthSpec, Signature, Slot};

    fn genesis_state() -> BeaconState<MinimalEthSpec> {
        let validators = generate_deterministic_validators(4, 32_000_000_000);
        let balances = vec![32_000_000_000; 4];
        BeaconState::new_genesis(0, validators, balances)
    }

    #[test]
    fn process_slots_advances_and_caches_roots() {
        let mut state = genesis_state();
        let genesis_root = state.tree_hash_root();

        process_slots(&mut state, Slot::new(3)).unwrap();

        assert_eq!(state.slot(), Slot::new(3));
        assert_eq!(state.get_state_root(Slot::new(0)).unwrap(), genesis_root);
    }

    #[test]
    fn process_slots_is_a_no_op_when_already_past_target() {
        let mut state = genesis_state();
        process_slots(&mut state, Slot::new(5)).unwrap();
        let after_five = state.clone();

        process_slots(&mut state, Slot::new(2)).unwrap();

        assert_eq!(state, after_five);
    }

    #[test]
    fn block_with_wrong_parent_root_is_rejected() {
        let mut state = genesis_state();
        process_slots(&mut state, Slot::new(1)).unwrap();

        let block = BeaconBlock {
            slot: Slot::new(1),
            proposer_index: 0,
            parent_root: Hash256::repeat_byte(0xAB),
            state_root: Hash256::zero(),
            body: BeaconBlockBody {
                randao_reveal: Signature::zero(),
                graffiti: [0; 32],
                opaque_operations: vec![],
                ..Default::default()
            },
        };

        let err = per_block_processing(&mut state, &block).unwrap_err();
        assert!(matches!(err, Error::BlockParentRootMismatch { .. }));
    }

    #[test]
    fn well_formed_block_updates_latest_block_header() {
        let mut state = genesis_state();
        process_slots(&mut state, Slot::new(1)).unwrap();
        let parent_root = state.latest_block_header().canonical_root();

        let block = BeaconBlock {
            slot: Slot::new(1),
            proposer_index: 2,
            parent_root,
            state_root: Hash256::zero(),
            body: BeaconBlockBody {
                randao_reveal: Signature::zero(),
                graffiti: [7; 32],
                opaque_operations: vec![],
                ..Default::default()
            },
        };

        per_block_processing(&mut state, &block).unwrap();

        assert_eq!(state.latest_block_header().proposer_index, 2);
        assert_eq!(state.latest_block_header().parent_root, parent_root);
        assert_eq!(state.latest_block_header().state_root, Hash256::zero());
    }
}
