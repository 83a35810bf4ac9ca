use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;
use store::StoreConfig;

/// Which `ItemStore` backend to open the hot/cold database with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DatabaseBackend {
    /// `LevelDB`, persisted under `data_dir`.
    Disk,
    /// `MemoryStore`, discarded on exit. Useful for the `testnet`-style quickstarts the CLI
    /// supports.
    Memory,
}

/// The client's process-wide configuration: where its database lives, how the hot/cold store is
/// tuned, and the genesis parameters used by `InitializeState` when no existing chain is found on
/// disk. Deposit/Eth1 processing is out of scope (spec §1), so genesis is always constructed from
/// a deterministic validator set sized by `genesis_validator_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub db: DatabaseBackend,
    pub store: StoreConfig,
    pub genesis_time: u64,
    pub genesis_validator_count: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".lighthouse"),
            db: DatabaseBackend::Disk,
            store: StoreConfig::default(),
            genesis_time: 0,
            genesis_validator_count: 16,
        }
    }
}

impl ClientConfig {
    pub fn hot_path(&self) -> PathBuf {
        self.data_dir.join("chain_db")
    }

    pub fn cold_path(&self) -> PathBuf {
        self.data_dir.join("freezer_db")
    }
}
