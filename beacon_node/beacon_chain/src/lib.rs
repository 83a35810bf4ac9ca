//! The beacon-state management core's external interface (spec §6): a service boundary over the
//! hot/cold state manager (`store`) plus the two coordination caches described in §4.C/§4.D.

mod attestation_cache;
mod attestation_production;
mod errors;
pub mod metrics;
mod sync_committee_cache;

pub use attestation_cache::{AttestationCache, CancelToken};
pub use attestation_production::produce_unaggregated_attestation_data;
pub use errors::Error;
pub use sync_committee_cache::{SyncCommitteeCache, ValidatorPositions, MAX_SYNC_COMMITTEE_CACHE_ENTRIES};

use slog::Logger;
use std::sync::Arc;
use store::{HotColdDB, ItemStore};
use types::{
    AttestationData, AttestationDataRequest, BeaconState, Checkpoint, EthSpec, Hash256, Validator,
};

/// The maximum number of `(request, response)` entries the attestation-data cache keeps at once.
pub const DEFAULT_ATTESTATION_CACHE_SIZE: usize = 64;

/// Binds a `BeaconChain` to a concrete `EthSpec` and a pair of `ItemStore` backends, the way the
/// real system parameterizes the chain over its storage and spec choices without baking either
/// into `BeaconChain` itself.
pub trait BeaconChainTypes: Send + Sync + 'static {
    type HotStore: ItemStore<Self::EthSpec>;
    type ColdStore: ItemStore<Self::EthSpec>;
    type EthSpec: EthSpec;
}

/// The beacon-state management core. Owns the hot/cold state manager and the two coordination
/// caches; exposes exactly the operations named in spec §6.
pub struct BeaconChain<T: BeaconChainTypes> {
    pub store: Arc<HotColdDB<T::EthSpec, T::HotStore, T::ColdStore>>,
    pub attestation_cache: AttestationCache,
    pub sync_committee_cache: SyncCommitteeCache,
    pub log: Logger,
}

impl<T: BeaconChainTypes> BeaconChain<T> {
    pub fn new(store: Arc<HotColdDB<T::EthSpec, T::HotStore, T::ColdStore>>, log: Logger) -> Self {
        Self {
            store,
            attestation_cache: AttestationCache::new(DEFAULT_ATTESTATION_CACHE_SIZE),
            sync_committee_cache: SyncCommitteeCache::new(),
            log,
        }
    }

    /// `HeadState(ctx) -> state`.
    pub fn head_state(&self) -> Result<BeaconState<T::EthSpec>, Error> {
        Ok(self.store.head_state()?)
    }

    /// `FinalizedCheckpoint(ctx) -> (epoch, root)`.
    pub fn finalized_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        Ok(self.store.get_finalized_checkpoint()?)
    }

    /// `JustifiedCheckpoint(ctx) -> (epoch, root)`.
    pub fn justified_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        Ok(self.store.get_justified_checkpoint()?)
    }

    /// `Validators(ctx) -> ordered_validators`.
    pub fn validators(&self) -> Result<Vec<Validator>, Error> {
        Ok(self.head_state()?.validators().iter().cloned().collect())
    }

    /// `Balances(ctx) -> balances_aligned_to_validators`.
    pub fn balances(&self) -> Result<Vec<u64>, Error> {
        Ok(self.head_state()?.balances().iter().copied().collect())
    }

    /// `ValidatorAtIndex(ctx, i) -> validator`.
    pub fn validator_at_index(&self, index: usize) -> Result<Option<Validator>, Error> {
        Ok(self.head_state()?.validators().get(index).cloned())
    }

    /// `HistoricalStateFromSlot(ctx, slot, block_root) -> state`.
    pub fn historical_state_from_slot(
        &self,
        slot: types::Slot,
        block_root: Hash256,
    ) -> Result<BeaconState<T::EthSpec>, Error> {
        Ok(self.store.historical_state_from_slot(slot, block_root)?)
    }

    /// `InitializeState(ctx, genesis_time, deposits, eth1_data)`: idempotent; constructs and
    /// persists the genesis state and genesis block. Deposit/Eth1 bookkeeping is out of scope
    /// (spec §1), so callers pass the already-assembled genesis validator set and balances.
    pub fn initialize_state(
        &self,
        genesis_time: u64,
        validators: Vec<Validator>,
        balances: Vec<u64>,
    ) -> Result<Hash256, Error> {
        Ok(self.store.initialize_state(genesis_time, validators, balances)?)
    }

    /// The attestation-production path (spec §4.G).
    pub fn produce_unaggregated_attestation_data(
        &self,
        req: AttestationDataRequest,
        cancel: &CancelToken,
    ) -> Result<AttestationData, Error> {
        produce_unaggregated_attestation_data(&self.store, &self.attestation_cache, req, &cancel.clone())
    }

    /// Refreshes the sync-committee positional cache (spec §4.D) for `root` from `state`.
    pub fn update_sync_committee_positions(
        &self,
        root: Hash256,
        state: &BeaconState<T::EthSpec>,
    ) -> Result<(), Error> {
        self.sync_committee_cache.update_positions_in_committee(root, state)
    }

    pub fn current_epoch_index_position(
        &self,
        root: Hash256,
        validator_index: usize,
    ) -> Result<Vec<usize>, Error> {
        self.sync_committee_cache.current_epoch_index_position(root, validator_index)
    }

    pub fn next_epoch_index_position(
        &self,
        root: Hash256,
        validator_index: usize,
    ) -> Result<Vec<usize>, Error> {
        self.sync_committee_cache.next_epoch_index_position(root, validator_index)
    }
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

    struct TestTypes;
    impl BeaconChainTypes for TestTypes {
        type HotStore = MemoryStore<E>;
        type ColdStore = MemoryStore<E>;
        type EthSpec = E;
    }

    fn test_chain() -> BeaconChain<TestTypes> {
        let log = NullLoggerBuilder.build().expect("logger should build");
        let store = HotColdDB::open_ephemeral(StoreConfig::default(), log.clone())
            .expect("store should initialize");
        BeaconChain::new(Arc::new(store), log)
    }

    #[test]
    fn initialize_state_then_head_state_round_trips() {
        let chain = test_chain();
        let validators = generate_deterministic_validators(4, 32_000_000_000);
        let balances = vec![32_000_000_000; 4];

        let root = chain.initialize_state(0, validators, balances).unwrap();
        let head = chain.head_state().unwrap();
        assert_eq!(head.slot(), Slot::new(0));
        assert_eq!(chain.finalized_checkpoint().unwrap().unwrap().root, root);
    }

    #[test]
    fn validator_at_index_matches_the_head_state_registry() {
        let chain = test_chain();
        let validators = generate_deterministic_validators(4, 32_000_000_000);
        let balances = vec![32_000_000_000; 4];
        chain.initialize_state(0, validators.clone(), balances).unwrap();

        assert_eq!(chain.validator_at_index(2).unwrap(), Some(validators[2].clone()));
        assert_eq!(chain.validator_at_index(99).unwrap(), None);
        assert_eq!(chain.validators().unwrap().len(), 4);
        assert_eq!(chain.balances().unwrap(), vec![32_000_000_000; 4]);
    }

    #[test]
    fn produce_attestation_data_delegates_to_the_production_path() {
        let chain = test_chain();
        let validators = generate_deterministic_validators(4, 32_000_000_000);
        let balances = vec![32_000_000_000; 4];
        chain.initialize_state(0, validators, balances).unwrap();

        let cancel = CancelToken::new();
        let req = AttestationDataRequest {
            slot: Slot::new(0),
            committee_index: 0,
        };
        let data = chain.produce_unaggregated_attestation_data(req, &cancel).unwrap();
        assert_eq!(data.slot, Slot::new(0));
    }

    #[test]
    fn unknown_sync_committee_root_is_a_missing_key_error() {
        let chain = test_chain();
        assert_eq!(
            chain.current_epoch_index_position(Hash256::zero(), 0),
            Err(Error::MissingSyncCommitteeKey)
        );
    }
}
