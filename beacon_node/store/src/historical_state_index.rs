//! The historical state index (spec §4.E): `(slot, block_root) -> content hash`, backing
//! `HistoricalStateFromSlot` and finalization-triggered pruning.

use crate::columns::DBColumn;
use crate::item_store::{ItemStore, KeyValueStore, KeyValueStoreOp};
use crate::Error;
use ssz_derive::{Decode as SszDecode, Encode as SszEncode};
use types::{EthSpec, Hash256, Slot};

/// A pointer from a post-finalization block root to the nearest ≤-epoch-boundary block root its
/// state is derivable from by replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SszEncode, SszDecode)]
pub struct StateSummary {
    pub slot: Slot,
    pub block_root: Hash256,
    pub boundary_root: Hash256,
}

fn index_key(slot: Slot, block_root: Hash256) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + 32);
    key.extend_from_slice(&slot.as_u64().to_be_bytes());
    key.extend_from_slice(block_root.as_bytes());
    key
}

fn split_index_key(key: &[u8]) -> Option<(Slot, Hash256)> {
    if key.len() != 8 + 32 {
        return None;
    }
    let mut slot_bytes = [0u8; 8];
    slot_bytes.copy_from_slice(&key[0..8]);
    let slot = Slot::new(u64::from_be_bytes(slot_bytes));
    let root = Hash256::from_slice(&key[8..40]);
    Some((slot, root))
}

/// Records that the state at `block_root`/`slot` is addressed by `content_hash`, under the
/// historical-state index.
pub fn index_historical_state<E: EthSpec, S: ItemStore<E>>(
    db: &S,
    slot: Slot,
    block_root: Hash256,
    content_hash: Hash256,
) -> Result<(), Error> {
    db.put_bytes(
        DBColumn::BeaconStateIndex,
        &index_key(slot, block_root),
        content_hash.as_bytes(),
    )
}

/// Implements `HistoricalStateFromSlot`: an exact `(slot, block_root)` match if one exists,
/// otherwise the entry with the largest stored slot `<= slot`, otherwise `NotFound`.
pub fn historical_state_content_hash<E: EthSpec, S: ItemStore<E>>(
    db: &S,
    slot: Slot,
    block_root: Hash256,
) -> Result<Hash256, Error> {
    if let Some(bytes) = db.get_bytes(DBColumn::BeaconStateIndex, &index_key(slot, block_root))? {
        return Ok(Hash256::from_slice(&bytes));
    }

    let mut best: Option<(Slot, Vec<u8>)> = None;
    for key in db.keys_iter(DBColumn::BeaconStateIndex)? {
        let (stored_slot, _) = match split_index_key(&key) {
            Some(parts) => parts,
            None => continue,
        };
        if stored_slot <= slot {
            if best.as_ref().map_or(true, |(best_slot, _)| stored_slot > *best_slot) {
                best = Some((stored_slot, key));
            }
        }
    }

    match best {
        Some((_, key)) => {
            let bytes = db
                .get_bytes(DBColumn::BeaconStateIndex, &key)?
                .expect("key just returned by keys_iter exists");
            Ok(Hash256::from_slice(&bytes))
        }
        None => Err(Error::NoHistoricalStatesSaved),
    }
}

/// Deletes every historical-state index entry (and its pointed-to blob) with `slot < new_finalized_slot`.
pub fn prune_historical_states<E: EthSpec, S: ItemStore<E>>(
    db: &S,
    new_finalized_slot: Slot,
) -> Result<(), Error> {
    let mut ops = Vec::new();

    for key in db.keys_iter(DBColumn::BeaconStateIndex)? {
        let (stored_slot, _) = match split_index_key(&key) {
            Some(parts) => parts,
            None => continue,
        };
        if stored_slot < new_finalized_slot {
            if let Some(hash_bytes) = db.get_bytes(DBColumn::BeaconStateIndex, &key)? {
                ops.push(KeyValueStoreOp::DeleteKey(
                    DBColumn::BeaconStateBlob,
                    hash_bytes,
                ));
            }
            ops.push(KeyValueStoreOp::DeleteKey(DBColumn::BeaconStateIndex, key));
        }
    }

    db.do_atomically(ops)
}
