use crate::Epoch;
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// Tracks the fork-version transition a state has gone through, so block processing can reject
/// blocks that were signed for the wrong fork.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash,
)]
pub struct Fork {
    pub previous_version: [u8; 4],
    pub current_version: [u8; 4],
    pub epoch: Epoch,
}

impl Default for Fork {
    fn default() -> Self {
        Self {
            previous_version: [0; 4],
            current_version: [0; 4],
            epoch: Epoch::new(0),
        }
    }
}
