use types::BeaconStateError;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// The key-value substrate returned an I/O error for the given bucket/key context.
    StorageFailure {
        column: &'static str,
        key: String,
        message: String,
    },
    SszDecodeError(ssz::DecodeError),
    BeaconStateError(BeaconStateError),
    StateProcessingError(state_processing::Error),
    /// No historical state could satisfy a `HistoricalStateFromSlot` query.
    NoHistoricalStatesSaved,
    /// A `HistoricalStateIndex` entry pointed at a blob that was not present.
    MissingBlob { content_hash: types::Hash256 },
    /// `chain-info/head-state` (or another required well-known key) has not been written yet.
    MissingWellKnownKey(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {}

impl From<ssz::DecodeError> for Error {
    fn from(e: ssz::DecodeError) -> Error {
        Error::SszDecodeError(e)
    }
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Error {
        Error::BeaconStateError(e)
    }
}

impl From<state_processing::Error> for Error {
    fn from(e: state_processing::Error) -> Error {
        Error::StateProcessingError(e)
    }
}
