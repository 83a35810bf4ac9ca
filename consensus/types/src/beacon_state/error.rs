use crate::{Epoch, Slot};

/// Errors arising from reading or mutating a `BeaconState`.
#[derive(Debug, PartialEq, Clone)]
pub enum BeaconStateError {
    /// `slot` falls outside the window of slots the state's block/state-root rings can answer
    /// for (either in the future, or older than `SlotsPerHistoricalRoot` slots in the past).
    SlotOutOfRange { slot: Slot, state_slot: Slot },
    /// `epoch` falls outside the window the randao-mix/active-index rings can answer for.
    EpochOutOfRange { epoch: Epoch, state_epoch: Epoch },
    /// A sync-committee accessor was called against a pre-Altair state variant.
    IncorrectStateVariant,
    UnknownValidator(usize),
}

impl std::fmt::Display for BeaconStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for BeaconStateError {}
