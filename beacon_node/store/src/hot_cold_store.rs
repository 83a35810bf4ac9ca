//! The hot/cold state manager (spec §4.F): resumes from a finalized checkpoint, serves states by
//! root (replaying from the nearest epoch-boundary ancestor when necessary), and migrates/prunes
//! historical state entries on finalization.
//!
//! The "hot" side (`hot_db`) holds the mutable head-tracking bookkeeping that changes every
//! block: blocks themselves, per-block `StateSummary` pointers, the validator-index and
//! well-known chain-info keys. The "cold" side (`cold_db`) holds the content-addressed,
//! append-mostly archive: the historical-state index and the state blobs it points to. A state
//! becomes durable on the cold side the moment it's written (at every epoch boundary); pruning a
//! finalized range only ever removes from the cold side.

use crate::columns::{chain_info_keys, DBColumn};
use crate::historical_state_index::{self, StateSummary};
use crate::impls::{content_hash, StoreItem};
use crate::item_store::{ItemStore, KeyValueStore};
use crate::leveldb_store::LevelDB;
use crate::memory_store::MemoryStore;
use crate::{metrics, Error, StoreConfig};
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use slog::{debug, Logger};
use ssz::{Decode, Encode};
use state_processing::{process_block, VerifyBlockRoot};
use std::path::Path;
use std::sync::Arc;
use tree_hash::TreeHash;
use types::{
    BeaconBlock, BeaconBlockBody, BeaconState, Checkpoint, Epoch, EthSpec, Hash256, Signature,
    SignedBeaconBlock, Slot,
};

pub struct HotColdDB<E: EthSpec, Hot: ItemStore<E>, Cold: ItemStore<E>> {
    hot_db: Hot,
    cold_db: Cold,
    config: StoreConfig,
    split_slot: RwLock<Slot>,
    head_cache: RwLock<Option<BeaconState<E>>>,
    state_cache: Mutex<LruCache<Hash256, BeaconState<E>>>,
    log: Logger,
}

impl<E: EthSpec> HotColdDB<E, LevelDB<E>, LevelDB<E>> {
    /// Opens (or creates) a disk-backed hot/cold store at the given paths.
    pub fn open(
        hot_path: &Path,
        cold_path: &Path,
        config: StoreConfig,
        log: Logger,
    ) -> Result<Arc<Self>, Error> {
        let hot_db = LevelDB::open(hot_path)?;
        let cold_db = LevelDB::open(cold_path)?;
        Ok(Arc::new(Self::new(hot_db, cold_db, config, log)?))
    }
}

impl<E: EthSpec> HotColdDB<E, MemoryStore<E>, MemoryStore<E>> {
    /// Opens an in-memory hot/cold store, for tests.
    pub fn open_ephemeral(config: StoreConfig, log: Logger) -> Result<Self, Error> {
        Self::new(MemoryStore::open(), MemoryStore::open(), config, log)
    }
}

impl<E: EthSpec, Hot: ItemStore<E>, Cold: ItemStore<E>> HotColdDB<E, Hot, Cold> {
    pub fn new(hot_db: Hot, cold_db: Cold, config: StoreConfig, log: Logger) -> Result<Self, Error> {
        let db = Self {
            hot_db,
            cold_db,
            state_cache: Mutex::new(LruCache::new(config.state_cache_size)),
            config,
            split_slot: RwLock::new(Slot::new(0)),
            head_cache: RwLock::new(None),
            log,
        };
        db.resume()?;
        Ok(db)
    }

    /// Reads the finalized checkpoint, if one has been persisted, and installs its slot as the
    /// replay floor. A store that has never seen `InitializeState` simply stays at slot zero.
    fn resume(&self) -> Result<(), Error> {
        if let Some(checkpoint) = self.get_finalized_checkpoint()? {
            debug!(self.log, "Resuming from finalized checkpoint"; "epoch" => checkpoint.epoch.as_u64());
            *self.split_slot.write() = checkpoint.epoch.start_slot(E::slots_per_epoch());
        }
        Ok(())
    }

    pub fn get_split_slot(&self) -> Slot {
        *self.split_slot.read()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- chain-info well-known keys ----

    fn get_checkpoint(&self, key: &str) -> Result<Option<Checkpoint>, Error> {
        match self.hot_db.get_bytes(DBColumn::BeaconChainInfo, key.as_bytes())? {
            Some(bytes) => Ok(Some(Checkpoint::from_ssz_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_checkpoint(&self, key: &str, checkpoint: Checkpoint) -> Result<(), Error> {
        self.hot_db
            .put_bytes(DBColumn::BeaconChainInfo, key.as_bytes(), &checkpoint.as_ssz_bytes())
    }

    pub fn get_finalized_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        self.get_checkpoint(chain_info_keys::FINALIZED_CHECKPOINT)
    }

    pub fn get_justified_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        self.get_checkpoint(chain_info_keys::JUSTIFIED_CHECKPOINT)
    }

    pub fn set_justified_checkpoint(&self, checkpoint: Checkpoint) -> Result<(), Error> {
        self.put_checkpoint(chain_info_keys::JUSTIFIED_CHECKPOINT, checkpoint)
    }

    pub fn head_root(&self) -> Result<Option<Hash256>, Error> {
        Ok(self
            .hot_db
            .get_bytes(DBColumn::BeaconChainInfo, chain_info_keys::HEAD_ROOT.as_bytes())?
            .map(|bytes| Hash256::from_slice(&bytes)))
    }

    // ---- blocks ----

    pub fn put_block(&self, root: Hash256, block: SignedBeaconBlock<E>) -> Result<(), Error> {
        self.hot_db
            .put_bytes(DBColumn::BeaconBlock, root.as_bytes(), &block.as_store_bytes())
    }

    pub fn get_block(&self, root: &Hash256) -> Result<Option<SignedBeaconBlock<E>>, Error> {
        match self.hot_db.get_bytes(DBColumn::BeaconBlock, root.as_bytes())? {
            Some(bytes) => Ok(Some(SignedBeaconBlock::from_store_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    // ---- state summaries ----

    fn put_state_summary(&self, block_root: Hash256, summary: StateSummary) -> Result<(), Error> {
        self.hot_db.put_bytes(
            DBColumn::BeaconStateSummary,
            block_root.as_bytes(),
            &summary.as_ssz_bytes(),
        )
    }

    fn load_state_summary(&self, block_root: Hash256) -> Result<StateSummary, Error> {
        let bytes = self
            .hot_db
            .get_bytes(DBColumn::BeaconStateSummary, block_root.as_bytes())?
            .ok_or(Error::MissingBlob {
                content_hash: block_root,
            })?;
        Ok(StateSummary::from_ssz_bytes(&bytes)?)
    }

    // ---- state blobs (cold side) ----

    fn put_boundary_state(&self, slot: Slot, block_root: Hash256, state: &BeaconState<E>) -> Result<(), Error> {
        let bytes = state.as_store_bytes();
        metrics::observe(&metrics::BEACONDB_STATE_SIZE_BYTES, bytes.len() as f64);
        let hash = content_hash(&bytes);
        self.cold_db
            .put_bytes(DBColumn::BeaconStateBlob, hash.as_bytes(), &bytes)?;
        historical_state_index::index_historical_state(&self.cold_db, slot, block_root, hash)?;
        self.put_state_summary(
            block_root,
            StateSummary {
                slot,
                block_root,
                boundary_root: block_root,
            },
        )
    }

    fn load_blob(&self, content_hash: Hash256) -> Result<BeaconState<E>, Error> {
        let bytes = self
            .cold_db
            .get_bytes(DBColumn::BeaconStateBlob, content_hash.as_bytes())?
            .ok_or(Error::MissingBlob { content_hash })?;
        BeaconState::from_store_bytes(&bytes)
    }

    // ---- write path ----

    /// Encodes `state`, makes it the cached head, and either persists it as a new epoch-boundary
    /// entry or records an intermediate `StateSummary` pointing back to its boundary ancestor.
    pub fn save_state(&self, state: &BeaconState<E>, block_root: Hash256) -> Result<(), Error> {
        metrics::inc_counter(&metrics::BEACON_STATE_WRITE_COUNT);

        *self.head_cache.write() = Some(state.clone());
        self.hot_db.put_bytes(
            DBColumn::BeaconChainInfo,
            chain_info_keys::HEAD_STATE.as_bytes(),
            &state.as_store_bytes(),
        )?;
        self.hot_db.put_bytes(
            DBColumn::BeaconChainInfo,
            chain_info_keys::HEAD_ROOT.as_bytes(),
            block_root.as_bytes(),
        )?;

        if BeaconState::<E>::is_epoch_boundary_slot(state.slot()) {
            self.put_boundary_state(state.slot(), block_root, state)?;
        } else {
            let boundary_slot = state.current_epoch_start_slot();
            let boundary_root = state.get_block_root(boundary_slot)?;
            self.put_state_summary(
                block_root,
                StateSummary {
                    slot: state.slot(),
                    block_root,
                    boundary_root,
                },
            )?;
        }

        self.state_cache.lock().put(block_root, state.clone());

        Ok(())
    }

    /// Updates the finalized checkpoint and prunes historical entries older than its slot
    /// (spec §4.E), unless pruning is disabled.
    pub fn save_finalized_state(&self, finalized: Checkpoint, state: &BeaconState<E>) -> Result<(), Error> {
        self.put_checkpoint(chain_info_keys::FINALIZED_CHECKPOINT, finalized)?;
        self.hot_db.put_bytes(
            DBColumn::BeaconChainInfo,
            chain_info_keys::FINALIZED_STATE.as_bytes(),
            &state.as_store_bytes(),
        )?;

        let new_finalized_slot = finalized.epoch.start_slot(E::slots_per_epoch());
        *self.split_slot.write() = new_finalized_slot;

        if self.config.prune_historical_states {
            historical_state_index::prune_historical_states(&self.cold_db, new_finalized_slot)?;
        }

        Ok(())
    }

    // ---- read path ----

    /// Returns a defensive copy of the cached head state, loading it from `chain-info/head-state`
    /// on a cold start.
    pub fn head_state(&self) -> Result<BeaconState<E>, Error> {
        if let Some(state) = self.head_cache.read().as_ref() {
            return Ok(state.clone());
        }

        let bytes = self
            .hot_db
            .get_bytes(DBColumn::BeaconChainInfo, chain_info_keys::HEAD_STATE.as_bytes())?
            .ok_or(Error::MissingWellKnownKey(chain_info_keys::HEAD_STATE))?;
        let state = BeaconState::from_store_bytes(&bytes)?;

        *self.head_cache.write() = Some(state.clone());
        Ok(state)
    }

    /// Implements the §4.F `StateByRoot` algorithm: a hot-cache hit, a direct boundary-state
    /// decode, or a replay from the nearest boundary ancestor.
    pub fn state_by_root(&self, root: Hash256) -> Result<BeaconState<E>, Error> {
        metrics::inc_counter(&metrics::BEACON_STATE_READ_COUNT);

        if let Some(cached) = self.state_cache.lock().get(&root) {
            return Ok(cached.clone());
        }

        let summary = self.load_state_summary(root)?;

        let state = if summary.boundary_root == root {
            let hash = historical_state_index::historical_state_content_hash(
                &self.cold_db,
                summary.slot,
                root,
            )?;
            self.load_blob(hash)?
        } else {
            let mut state = self.state_by_root(summary.boundary_root)?;
            for signed_block in self.collect_replay_chain(summary.boundary_root, root)? {
                process_block(&mut state, &signed_block, VerifyBlockRoot::False)?;
            }
            state
        };

        self.state_cache.lock().put(root, state.clone());
        Ok(state)
    }

    /// Implements `HistoricalStateFromSlot`: the exact `(slot, block_root)` entry if present,
    /// otherwise the closest earlier one, replayed the same way `state_by_root` would.
    pub fn historical_state_from_slot(&self, slot: Slot, block_root: Hash256) -> Result<BeaconState<E>, Error> {
        let hash = historical_state_index::historical_state_content_hash(&self.cold_db, slot, block_root)?;
        self.load_blob(hash)
    }

    /// Walks parent links backward from `target_root` to `boundary_root`, returning the blocks in
    /// forward (replay) order.
    fn collect_replay_chain(&self, boundary_root: Hash256, target_root: Hash256) -> Result<Vec<SignedBeaconBlock<E>>, Error> {
        let mut chain = Vec::new();
        let mut current_root = target_root;

        while current_root != boundary_root {
            let block = self
                .get_block(&current_root)?
                .ok_or(Error::MissingBlob { content_hash: current_root })?;
            let parent_root = block.parent_root();
            chain.push(block);
            current_root = parent_root;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Idempotently constructs and persists the genesis state and block (spec §6
    /// `InitializeState`); returns the genesis block root whether or not this call created it.
    pub fn initialize_state(
        &self,
        genesis_time: u64,
        validators: Vec<types::Validator>,
        balances: Vec<u64>,
    ) -> Result<Hash256, Error> {
        if let Some(existing_root) = self.head_root()? {
            return Ok(existing_root);
        }

        let mut state = BeaconState::<E>::new_genesis(genesis_time, validators, balances);
        let genesis_body = BeaconBlockBody::default();
        state.latest_block_header_mut().body_root = genesis_body.tree_hash_root();

        let genesis_root = state.latest_block_header().canonical_root();

        let genesis_block = SignedBeaconBlock {
            message: BeaconBlock {
                slot: Slot::new(0),
                proposer_index: 0,
                parent_root: Hash256::zero(),
                state_root: Hash256::zero(),
                body: genesis_body,
            },
            signature: Signature::zero(),
        };

        self.put_block(genesis_root, genesis_block)?;
        self.save_state(&state, genesis_root)?;
        self.save_finalized_state(
            Checkpoint {
                epoch: Epoch::new(0),
                root: genesis_root,
            },
            &state,
        )?;
        self.set_justified_checkpoint(Checkpoint {
            epoch: Epoch::new(0),
            root: genesis_root,
        })?;

        Ok(genesis_root)
    }
}
