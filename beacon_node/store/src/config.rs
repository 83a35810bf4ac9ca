use serde_derive::{Deserialize, Serialize};

/// Configuration for the hot/cold state manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum number of decoded states to keep in the `StateByRoot` hot-state cache.
    pub state_cache_size: usize,
    /// Whether `SaveFinalizedState` prunes historical-state entries older than the new
    /// finalized slot. Disabling this is the only knob the design gives an operator for the
    /// long-non-finality pruning question (see `DESIGN.md`).
    pub prune_historical_states: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_cache_size: 4,
            prune_historical_states: true,
        }
    }
}
