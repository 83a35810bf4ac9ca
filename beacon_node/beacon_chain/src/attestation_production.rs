//! The attestation-production path (spec §4.G): single-flight attestation-data construction
//! sitting on top of the hot/cold state manager and the attestation cache.

use crate::attestation_cache::{AttestationCache, CancelToken};
use crate::Error;
use state_processing::process_slots;
use store::{HotColdDB, ItemStore};
use types::{AttestationData, AttestationDataRequest, Checkpoint, EthSpec};

/// Implements the six steps of §4.G. A caller that loses the race to `MarkInProgress` becomes a
/// "second waiter": it loops back to `Get`, whose backoff poll blocks until the in-flight build
/// clears, and a miss at that point (rather than the usual "nobody has ever tried" miss) means the
/// build resolved without populating the cache — surfaced as `ResolvedNil` rather than retried,
/// since only the original producer is allowed to attempt a build for this fingerprint.
pub fn produce_unaggregated_attestation_data<E: EthSpec, Hot: ItemStore<E>, Cold: ItemStore<E>>(
    store: &HotColdDB<E, Hot, Cold>,
    cache: &AttestationCache,
    req: AttestationDataRequest,
    cancel: &CancelToken,
) -> Result<AttestationData, Error> {
    if let Some(data) = cache.get(&req, cancel)? {
        return Ok(data);
    }

    if let Err(e) = cache.mark_in_progress(&req) {
        debug_assert_eq!(e, Error::AlreadyInProgress);
        return cache.get(&req, cancel)?.ok_or(Error::ResolvedNil);
    }

    let result = build_attestation_data(store, &req);
    if let Ok(data) = &result {
        cache.put(&req, *data);
    }
    cache.mark_not_in_progress(&req);

    result
}

fn build_attestation_data<E: EthSpec, Hot: ItemStore<E>, Cold: ItemStore<E>>(
    store: &HotColdDB<E, Hot, Cold>,
    req: &AttestationDataRequest,
) -> Result<AttestationData, Error> {
    let mut state = store.head_state()?;
    let head_root = store
        .head_root()?
        .ok_or(Error::ResolvedNil)?;

    process_slots(&mut state, req.slot)?;

    let epoch_start_slot = state.current_epoch_start_slot();
    let target_root = if epoch_start_slot == state.slot() {
        head_root
    } else {
        state.get_block_root(epoch_start_slot)?
    };

    Ok(AttestationData {
        slot: req.slot,
        index: req.committee_index,
        beacon_block_root: head_root,
        source: state.current_justified_checkpoint(),
        target: Checkpoint {
            epoch: state.current_epoch(),
            root: target_root,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sloggers::null::NullLoggerBuilder;
    use sloggers::Build;
    use store::{MemoryStore, StoreConfig};
    use types::test_utils::generate_deterministic_validators;
    use types::{MinimalEthSpec, Slot};

    type E = MinimalEthSpec;

    fn test_db() -> HotColdDB<E, MemoryStore<E>, MemoryStore<E>> {
        let log = NullLoggerBuilder.build().expect("logger should build");
        let db = HotColdDB::open_ephemeral(StoreConfig::default(), log).expect("store should initialize");
        let validators = generate_deterministic_validators(4, 32_000_000_000);
        let balances = vec![32_000_000_000; 4];
        db.initialize_state(0, validators, balances).unwrap();
        db
    }

    #[test]
    fn produces_attestation_data_for_the_current_slot() {
        let db = test_db();
        let cache = AttestationCache::new(4);
        let cancel = CancelToken::new();
        let req = AttestationDataRequest {
            slot: Slot::new(0),
            committee_index: 0,
        };

        let data = produce_unaggregated_attestation_data(&db, &cache, req, &cancel).unwrap();
        assert_eq!(data.slot, Slot::new(0));
        assert_eq!(data.index, 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn second_call_for_the_same_request_is_served_from_cache() {
        let db = test_db();
        let cache = AttestationCache::new(4);
        let cancel = CancelToken::new();
        let req = AttestationDataRequest {
            slot: Slot::new(0),
            committee_index: 1,
        };

        let first = produce_unaggregated_attestation_data(&db, &cache, req, &cancel).unwrap();
        let second = produce_unaggregated_attestation_data(&db, &cache, req, &cancel).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn advancing_into_a_new_epoch_targets_the_boundary_block_root() {
        let db = test_db();
        let cache = AttestationCache::new(4);
        let cancel = CancelToken::new();
        let genesis_root = db.head_root().unwrap().unwrap();

        // `MinimalEthSpec` has 8 slots per epoch; slot 8 starts epoch 1, whose boundary root (no
        // blocks have been produced since genesis) is still the genesis root.
        let req = AttestationDataRequest {
            slot: Slot::new(8),
            committee_index: 0,
        };

        let data = produce_unaggregated_attestation_data(&db, &cache, req, &cancel).unwrap();
        assert_eq!(data.target.root, genesis_root);
        assert_eq!(data.beacon_block_root, genesis_root);
    }
}
