use crate::{BeaconBlockHeader, EthSpec, Hash256, Signature, Slot};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use std::marker::PhantomData;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// The body of a block. Attestation/deposit/slashing payloads are opaque to this core (their
/// processing belongs to `state_processing`'s per-block pass, which is itself out of our scope
/// beyond the header bookkeeping block-replay needs); we carry them as raw SSZ bytes so that a
/// stored block round-trips exactly, without this crate needing to understand their contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct BeaconBlockBody<E: EthSpec> {
    pub randao_reveal: Signature,
    pub graffiti: [u8; 32],
    pub opaque_operations: Vec<u8>,
    #[serde(skip)]
    #[ssz(skip_serializing, skip_deserializing)]
    #[tree_hash(skip_hashing)]
    _phantom: PhantomData<E>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct BeaconBlock<E: EthSpec> {
    pub slot: Slot,
    pub proposer_index: u64,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body: BeaconBlockBody<E>,
}

impl<E: EthSpec> BeaconBlock<E> {
    pub fn canonical_root(&self) -> Hash256 {
        self.temporary_block_header().canonical_root()
    }

    /// Builds the `BeaconBlockHeader` that corresponds to this block, hashing the body
    /// separately the way SSZ-merkleized headers always do (bodies are hashed, not embedded).
    pub fn temporary_block_header(&self) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body_root: self.body.tree_hash_root(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct SignedBeaconBlock<E: EthSpec> {
    pub message: BeaconBlock<E>,
    pub signature: Signature,
}

impl<E: EthSpec> SignedBeaconBlock<E> {
    pub fn slot(&self) -> Slot {
        self.message.slot
    }

    pub fn parent_root(&self) -> Hash256 {
        self.message.parent_root
    }

    pub fn state_root(&self) -> Hash256 {
        self.message.state_root
    }

    pub fn canonical_root(&self) -> Hash256 {
        self.message.canonical_root()
    }
}
