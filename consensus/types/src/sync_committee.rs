use crate::{EthSpec, PublicKeyBytes};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::FixedVector;
use tree_hash_derive::TreeHash;

/// A fixed-size committee of validator public keys, sampled per committee period for light-client
/// (and, in this core, sync-committee-cache) use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct SyncCommittee<E: EthSpec> {
    pub pubkeys: FixedVector<PublicKeyBytes, E::SyncCommitteeSize>,
}

impl<E: EthSpec> SyncCommittee<E> {
    pub fn new(pubkeys: Vec<PublicKeyBytes>) -> Self {
        Self {
            pubkeys: pubkeys.into(),
        }
    }
}
