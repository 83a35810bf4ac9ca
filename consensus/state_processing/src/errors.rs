use types::{BeaconStateError, Hash256, Slot};

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    BeaconStateError(BeaconStateError),
    /// `process_block_header` was handed a block whose slot doesn't match the state it is being
    /// applied to; the caller must `per_slot_processing` up to `block.slot` first.
    BlockSlotMismatch { block_slot: Slot, state_slot: Slot },
    /// The block's `parent_root` doesn't match the canonical root of the state's current
    /// `latest_block_header` — the block does not chain onto this state.
    BlockParentRootMismatch {
        expected: Hash256,
        found: Hash256,
    },
    /// The block's declared `state_root` doesn't match the root of the state produced by
    /// applying it; only checked when the caller asks for verification.
    StateRootMismatch { expected: Hash256, computed: Hash256 },
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Error {
        Error::BeaconStateError(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {}
