use crate::{Hash256, Slot};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// The header of a `BeaconBlock`: everything needed to identify and chain a block without
/// carrying its (potentially large) body.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash,
)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub proposer_index: u64,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
}

impl BeaconBlockHeader {
    /// The canonical root of this header, i.e. the block root used to index blocks and states.
    pub fn canonical_root(&self) -> Hash256 {
        use tree_hash::TreeHash;
        self.tree_hash_root()
    }
}
