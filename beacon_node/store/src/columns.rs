/// The buckets named in the persisted layout: each is a disjoint keyspace within whichever
/// key-value substrate backs an `ItemStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DBColumn {
    /// `blocks`: `block_root -> encoded SignedBeaconBlock`.
    BeaconBlock,
    /// `main-chain`: `big-endian slot || block_root -> encoded SignedBeaconBlock`.
    BeaconMainChain,
    /// `validator-index`: `hashed pubkey -> varint validator index`.
    ValidatorIndex,
    /// `chain-info`: well-known keys (`head-root`, `head-state`, `justified-state`,
    /// `finalized-state`, `chain-height`, `split-slot`).
    BeaconChainInfo,
    /// `historical-states`: `big-endian slot || block_root -> 32-byte content hash`.
    BeaconStateIndex,
    /// `state-blob`: `content hash -> encoded BeaconState`.
    BeaconStateBlob,
    /// Per-block-root `StateSummary` pointers used to reconstruct a non-boundary state by replay.
    BeaconStateSummary,
}

impl DBColumn {
    /// A short ASCII tag, used as a column-family-like prefix by `ItemStore` implementations that
    /// don't have real column families (e.g. a single on-disk LevelDB keyspace).
    pub fn as_str(&self) -> &'static str {
        match self {
            DBColumn::BeaconBlock => "blk",
            DBColumn::BeaconMainChain => "chn",
            DBColumn::ValidatorIndex => "vdx",
            DBColumn::BeaconChainInfo => "bci",
            DBColumn::BeaconStateIndex => "bsi",
            DBColumn::BeaconStateBlob => "bsb",
            DBColumn::BeaconStateSummary => "bss",
        }
    }
}

/// Well-known keys within `DBColumn::BeaconChainInfo`.
pub mod chain_info_keys {
    pub const HEAD_ROOT: &str = "head-root";
    pub const HEAD_STATE: &str = "head-state";
    pub const JUSTIFIED_STATE: &str = "justified-state";
    pub const FINALIZED_STATE: &str = "finalized-state";
    pub const FINALIZED_CHECKPOINT: &str = "finalized-checkpoint";
    pub const JUSTIFIED_CHECKPOINT: &str = "justified-checkpoint";
    pub const CHAIN_HEIGHT: &str = "chain-height";
    pub const SPLIT_SLOT: &str = "split-slot";
}
