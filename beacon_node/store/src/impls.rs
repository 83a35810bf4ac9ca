use crate::columns::DBColumn;
use crate::Error;
use ssz::{Decode, Encode};
use types::{BeaconState, EthSpec, Hash256, SignedBeaconBlock};

/// The state/block codec (spec §4.B): a deterministic encode/decode pair, plus a content hash
/// used to deduplicate and address blobs in `DBColumn::BeaconStateBlob`.
pub trait StoreItem: Sized {
    fn db_column() -> DBColumn;

    fn as_store_bytes(&self) -> Vec<u8>;

    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error>;
}

/// A cryptographic content hash of `bytes`, used as the key under `DBColumn::BeaconStateBlob`.
pub fn content_hash(bytes: &[u8]) -> Hash256 {
    Hash256::from_slice(&eth2_hashing::hash(bytes))
}

impl<E: EthSpec> StoreItem for BeaconState<E> {
    fn db_column() -> DBColumn {
        DBColumn::BeaconStateBlob
    }

    fn as_store_bytes(&self) -> Vec<u8> {
        self.as_ssz_bytes()
    }

    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_ssz_bytes(bytes)?)
    }
}

impl<E: EthSpec> StoreItem for SignedBeaconBlock<E> {
    fn db_column() -> DBColumn {
        DBColumn::BeaconBlock
    }

    fn as_store_bytes(&self) -> Vec<u8> {
        self.as_ssz_bytes()
    }

    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_ssz_bytes(bytes)?)
    }
}
