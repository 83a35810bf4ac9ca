//! Wires a `ClientConfig` up to a concrete `HotColdDB` backend and a `BeaconChain`, the way the
//! real client crate assembles the chain's dependencies before handing control to the rest of the
//! node. Everything downstream of the state-management core (networking, RPC, REST) is out of
//! scope here; this crate's job ends at a running `BeaconChain` with its genesis state persisted.

mod config;
mod errors;

pub use config::{ClientConfig, DatabaseBackend};
pub use errors::Error;

use beacon_chain::{BeaconChain, BeaconChainTypes};
use slog::{info, Logger};
use std::sync::Arc;
use store::{HotColdDB, LevelDB, MemoryStore};
use types::test_utils::generate_deterministic_validators;
use types::MainnetEthSpec;

pub struct DiskTypes;
impl BeaconChainTypes for DiskTypes {
    type HotStore = LevelDB<MainnetEthSpec>;
    type ColdStore = LevelDB<MainnetEthSpec>;
    type EthSpec = MainnetEthSpec;
}

pub struct MemoryTypes;
impl BeaconChainTypes for MemoryTypes {
    type HotStore = MemoryStore<MainnetEthSpec>;
    type ColdStore = MemoryStore<MainnetEthSpec>;
    type EthSpec = MainnetEthSpec;
}

/// The running client: a `BeaconChain` over whichever backend `ClientConfig::db` selected. The
/// two variants exist because `ItemStore` backends are chosen at runtime but `BeaconChainTypes`
/// binds them at compile time.
pub enum Client {
    Disk(Arc<BeaconChain<DiskTypes>>),
    Memory(Arc<BeaconChain<MemoryTypes>>),
}

impl Client {
    /// Opens (or creates) the configured database, constructs the `BeaconChain`, and idempotently
    /// initializes its genesis state from a deterministic validator set (spec §6
    /// `InitializeState`; deposit/Eth1 processing is out of scope).
    pub fn open(config: &ClientConfig, log: Logger) -> Result<Self, Error> {
        let validators =
            generate_deterministic_validators(config.genesis_validator_count, 32_000_000_000);
        let balances = vec![32_000_000_000; config.genesis_validator_count];

        match config.db {
            DatabaseBackend::Disk => {
                std::fs::create_dir_all(&config.data_dir)?;
                let store = HotColdDB::open(
                    &config.hot_path(),
                    &config.cold_path(),
                    config.store.clone(),
                    log.clone(),
                )?;
                let chain = BeaconChain::new(store, log.clone());
                let root = chain.initialize_state(config.genesis_time, validators, balances)?;
                info!(log, "Beacon chain initialized"; "genesis_root" => format!("{:?}", root));
                Ok(Client::Disk(Arc::new(chain)))
            }
            DatabaseBackend::Memory => {
                let store = HotColdDB::open_ephemeral(config.store.clone(), log.clone())?;
                let chain = BeaconChain::new(Arc::new(store), log.clone());
                let root = chain.initialize_state(config.genesis_time, validators, balances)?;
                info!(log, "Beacon chain initialized"; "genesis_root" => format!("{:?}", root));
                Ok(Client::Memory(Arc::new(chain)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sloggers::null::NullLoggerBuilder;
    use sloggers::Build;

    #[test]
    fn open_with_memory_backend_initializes_genesis() {
        let log = NullLoggerBuilder.build().expect("logger should build");
        let config = ClientConfig {
            db: DatabaseBackend::Memory,
            genesis_validator_count: 4,
            ..ClientConfig::default()
        };

        let client = Client::open(&config, log).expect("client should open");
        match client {
            Client::Memory(chain) => {
                assert_eq!(chain.validators().unwrap().len(), 4);
            }
            Client::Disk(_) => panic!("expected the memory backend"),
        }
    }

    #[test]
    fn open_with_disk_backend_creates_a_leveldb_under_the_data_dir() {
        let log = NullLoggerBuilder.build().expect("logger should build");
        let data_dir = tempfile::tempdir().expect("tempdir should create");
        let config = ClientConfig {
            data_dir: data_dir.path().to_path_buf(),
            db: DatabaseBackend::Disk,
            genesis_validator_count: 4,
            ..ClientConfig::default()
        };

        let client = Client::open(&config, log).expect("client should open");
        match client {
            Client::Disk(chain) => {
                assert_eq!(chain.validators().unwrap().len(), 4);
            }
            Client::Memory(_) => panic!("expected the disk backend"),
        }
    }
}
