//! Positional cache for sync-committee membership (spec §4.D): keyed by a 32-byte committee root,
//! maps each validator index to the seat(s) it holds in the current and next sync committees.

use crate::metrics;
use crate::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use types::{BeaconState, EthSpec, Hash256};

/// Capacity is small and fixed: only a handful of committee periods are ever live at once, and
/// fork boundaries are the only reason more than one or two are needed concurrently.
pub const MAX_SYNC_COMMITTEE_CACHE_ENTRIES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorPositions {
    pub current_epoch_positions: Vec<usize>,
    pub next_epoch_positions: Vec<usize>,
}

#[derive(Default)]
struct PositionsMap {
    by_validator: HashMap<usize, ValidatorPositions>,
}

struct Inner {
    /// FIFO by insertion order; the committee root doubles as the entry's key.
    entries: Vec<(Hash256, PositionsMap)>,
}

pub struct SyncCommitteeCache {
    inner: RwLock<Inner>,
}

impl SyncCommitteeCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
            }),
        }
    }

    /// Builds the positions map for `root` from `state`'s current and next sync committees,
    /// resolving each pubkey to a validator index (unknown pubkeys are skipped), then inserts the
    /// entry and trims the FIFO to capacity.
    pub fn update_positions_in_committee<E: EthSpec>(
        &self,
        root: Hash256,
        state: &BeaconState<E>,
    ) -> Result<(), Error> {
        let mut map = PositionsMap::default();

        if let Ok(current) = state.current_sync_committee() {
            for (position, pubkey) in current.pubkeys.iter().enumerate() {
                if let Some(index) = state.get_validator_index(pubkey) {
                    map.by_validator
                        .entry(index)
                        .or_default()
                        .current_epoch_positions
                        .push(position);
                }
            }
        }

        if let Ok(next) = state.next_sync_committee() {
            for (position, pubkey) in next.pubkeys.iter().enumerate() {
                if let Some(index) = state.get_validator_index(pubkey) {
                    map.by_validator
                        .entry(index)
                        .or_default()
                        .next_epoch_positions
                        .push(position);
                }
            }
        }

        let mut inner = self.inner.write();
        inner.entries.retain(|(existing_root, _)| *existing_root != root);
        inner.entries.push((root, map));
        while inner.entries.len() > MAX_SYNC_COMMITTEE_CACHE_ENTRIES {
            inner.entries.remove(0);
        }

        Ok(())
    }

    fn positions_for(&self, root: Hash256, validator_index: usize) -> Result<ValidatorPositions, Error> {
        let inner = self.inner.read();
        match inner.entries.iter().find(|(k, _)| *k == root) {
            Some((_, map)) => {
                metrics::inc_counter(&metrics::SYNC_COMMITTEE_INDEX_CACHE_HIT_COUNT);
                Ok(map.by_validator.get(&validator_index).cloned().unwrap_or_default())
            }
            None => {
                metrics::inc_counter(&metrics::SYNC_COMMITTEE_INDEX_CACHE_MISS_COUNT);
                Err(Error::MissingSyncCommitteeKey)
            }
        }
    }

    /// The validator's seats in the current sync committee at `root`. Empty (not an error) if the
    /// validator holds none; `MissingSyncCommitteeKey` if `root` itself is unknown.
    pub fn current_epoch_index_position(
        &self,
        root: Hash256,
        validator_index: usize,
    ) -> Result<Vec<usize>, Error> {
        self.positions_for(root, validator_index)
            .map(|p| p.current_epoch_positions)
    }

    /// Symmetric to `current_epoch_index_position`, for the next sync committee.
    pub fn next_epoch_index_position(
        &self,
        root: Hash256,
        validator_index: usize,
    ) -> Result<Vec<usize>, Error> {
        self.positions_for(root, validator_index)
            .map(|p| p.next_epoch_positions)
    }
}

impl Default for SyncCommitteeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::test_utils::{deterministic_pubkey, generate_deterministic_validators};
    use types::{
        BeaconBlockHeader, BeaconState, BeaconStateAltair, Checkpoint, EthSpec, Fork,
        MainnetEthSpec, MinimalEthSpec, PublicKeyBytes, Slot, SyncCommittee, Validator,
    };

    type E = MinimalEthSpec;

    fn altair_state_with_committees() -> BeaconState<E> {
        let validators = generate_deterministic_validators(4, 32_000_000_000);
        let balances = vec![32_000_000_000; 4];
        let pubkeys: Vec<_> = validators.iter().map(|v| v.pubkey).collect();
        altair_state_with_committee::<E>(validators, balances, pubkeys)
    }

    /// Builds an Altair state whose current/next sync committees are exactly `committee_pubkeys`
    /// (padded out to `Spec::SyncCommitteeSize` with a pubkey no validator in `validators` holds),
    /// so a committee can place the same validator in more than one seat or a given validator in
    /// none at all.
    fn altair_state_with_committee<Spec: EthSpec>(
        validators: Vec<Validator>,
        balances: Vec<u64>,
        committee_pubkeys: Vec<PublicKeyBytes>,
    ) -> BeaconState<Spec> {
        let mut pubkeys = committee_pubkeys;
        pubkeys.resize(Spec::sync_committee_size(), deterministic_pubkey(9_999_999));

        BeaconState::Altair(BeaconStateAltair {
            genesis_time: 0,
            genesis_validators_root: Hash256::zero(),
            slot: Slot::new(0),
            fork: Fork::default(),
            latest_block_header: BeaconBlockHeader::default(),
            block_roots: vec![Hash256::zero(); Spec::slots_per_historical_root()].into(),
            state_roots: vec![Hash256::zero(); Spec::slots_per_historical_root()].into(),
            randao_mixes: vec![Hash256::zero(); Spec::epochs_per_historical_vector()].into(),
            active_index_roots: vec![Hash256::zero(); Spec::epochs_per_historical_vector()].into(),
            validators: validators.into(),
            balances: balances.into(),
            previous_justified_checkpoint: Checkpoint::default(),
            current_justified_checkpoint: Checkpoint::default(),
            finalized_checkpoint: Checkpoint::default(),
            current_sync_committee: SyncCommittee::new(pubkeys.clone()),
            next_sync_committee: SyncCommittee::new(pubkeys),
        })
    }

    #[test]
    fn missing_root_is_a_distinguishable_error() {
        let cache = SyncCommitteeCache::new();
        assert_eq!(
            cache.current_epoch_index_position(Hash256::zero(), 0),
            Err(Error::MissingSyncCommitteeKey)
        );
    }

    #[test]
    fn known_root_with_no_seats_for_validator_is_empty_not_an_error() {
        let cache = SyncCommitteeCache::new();
        let state = altair_state_with_committees();
        let root = Hash256::repeat_byte(7);

        cache.update_positions_in_committee(root, &state).unwrap();
        assert_eq!(cache.current_epoch_index_position(root, 99), Ok(vec![]));
    }

    #[test]
    fn resolves_validator_seats_in_committee_enumeration_order() {
        let cache = SyncCommitteeCache::new();
        let state = altair_state_with_committees();
        let root = Hash256::repeat_byte(1);

        cache.update_positions_in_committee(root, &state).unwrap();
        assert_eq!(cache.current_epoch_index_position(root, 2), Ok(vec![2]));
        assert_eq!(cache.next_epoch_index_position(root, 2), Ok(vec![2]));
    }

    #[test]
    fn fifo_evicts_oldest_root_past_capacity() {
        let cache = SyncCommitteeCache::new();
        let state = altair_state_with_committees();

        for i in 0..(MAX_SYNC_COMMITTEE_CACHE_ENTRIES as u8 + 1) {
            cache
                .update_positions_in_committee(Hash256::repeat_byte(i), &state)
                .unwrap();
        }

        assert_eq!(
            cache.current_epoch_index_position(Hash256::repeat_byte(0), 0),
            Err(Error::MissingSyncCommitteeKey)
        );
        assert!(cache
            .current_epoch_index_position(Hash256::repeat_byte(MAX_SYNC_COMMITTEE_CACHE_ENTRIES as u8), 0)
            .is_ok());
    }

    #[test]
    fn a_validator_holding_multiple_seats_gets_every_position() {
        let validators = generate_deterministic_validators(3, 32_000_000_000);
        let balances = vec![32_000_000_000; 3];
        // Committee seats, by validator index: [0, 2, 1, 2, 2] — validator 2 holds three seats.
        let committee_pubkeys = vec![
            validators[0].pubkey,
            validators[2].pubkey,
            validators[1].pubkey,
            validators[2].pubkey,
            validators[2].pubkey,
        ];
        let state = altair_state_with_committee::<MainnetEthSpec>(
            validators,
            balances,
            committee_pubkeys,
        );

        let cache = SyncCommitteeCache::new();
        let root = Hash256::repeat_byte(3);
        cache.update_positions_in_committee(root, &state).unwrap();

        assert_eq!(cache.current_epoch_index_position(root, 2), Ok(vec![1, 3, 4]));
        assert_eq!(cache.next_epoch_index_position(root, 2), Ok(vec![1, 3, 4]));
        assert_eq!(cache.current_epoch_index_position(root, 0), Ok(vec![0]));
        assert_eq!(cache.current_epoch_index_position(root, 1), Ok(vec![2]));
    }
}
