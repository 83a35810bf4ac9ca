use serde_derive::{Deserialize, Serialize};
use ssz_types::typenum::{Unsigned, U1024, U128, U32, U4, U64, U8, U8192};
use std::fmt::Debug;

/// Describes the fixed lengths that differ between beacon chain specs (mainnet vs. the
/// fast-iterating `minimal` spec used in tests), the way the real system parameterizes
/// `BeaconState<E>` over an `EthSpec` rather than baking the constants in.
pub trait EthSpec: 'static + Default + Sync + Send + Clone + Debug + PartialEq + Eq {
    type SlotsPerHistoricalRoot: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    type EpochsPerHistoricalVector: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    type ValidatorRegistryLimit: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    type SyncCommitteeSize: Unsigned + Clone + Sync + Send + Debug + PartialEq;
    type SlotsPerEpoch: Unsigned + Clone + Sync + Send + Debug + PartialEq;

    fn slots_per_epoch() -> u64 {
        Self::SlotsPerEpoch::to_u64()
    }

    fn slots_per_historical_root() -> usize {
        Self::SlotsPerHistoricalRoot::to_usize()
    }

    fn epochs_per_historical_vector() -> usize {
        Self::EpochsPerHistoricalVector::to_usize()
    }

    fn sync_committee_size() -> usize {
        Self::SyncCommitteeSize::to_usize()
    }

    fn spec_name() -> &'static str;
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MainnetEthSpec;

impl EthSpec for MainnetEthSpec {
    type SlotsPerHistoricalRoot = U8192;
    type EpochsPerHistoricalVector = U8192;
    type ValidatorRegistryLimit = U1024; // generous upper bound for our purposes
    type SyncCommitteeSize = U128;
    type SlotsPerEpoch = U32;

    fn spec_name() -> &'static str {
        "mainnet"
    }
}

/// A spec with much smaller ring lengths, used to keep tests fast while still exercising the
/// modular-index wraparound logic.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MinimalEthSpec;

impl EthSpec for MinimalEthSpec {
    type SlotsPerHistoricalRoot = U64;
    type EpochsPerHistoricalVector = U64;
    type ValidatorRegistryLimit = U1024;
    type SyncCommitteeSize = U4;
    type SlotsPerEpoch = U8;

    fn spec_name() -> &'static str {
        "minimal"
    }
}
