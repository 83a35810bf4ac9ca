use crate::{Checkpoint, Hash256, Slot};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

pub type CommitteeIndex = u64;

/// A validator's vote on the head of the chain, along with the source and target checkpoints it
/// is attesting to justify/extend.
///
/// `AttestationData::tree_hash_root()` is used throughout the store and the attestation cache as
/// the content-addressing fingerprint of a given vote.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash,
)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: CommitteeIndex,
    pub beacon_block_root: Hash256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

/// Identifies a request for an `AttestationData` by the two fields that fully determine its
/// (deterministic) content: the slot being attested to and the requesting committee's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttestationDataRequest {
    pub slot: Slot,
    pub committee_index: CommitteeIndex,
}

impl AttestationDataRequest {
    /// The cache key for this request: the decimal tuple `"<slot>-<committee_index>"`, exactly as
    /// used to fingerprint in-flight and completed attestation-data builds.
    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.slot.as_u64(), self.committee_index)
    }
}
