use std::fmt;
use types::BeaconStateError;

/// Errors surfaced across the chain's external interface and its two caches. Propagation policy
/// is flat: the attestation-production path recovers `AlreadyInProgress` locally by looping back
/// to `Get`, everything else is handed straight to the caller.
#[derive(Debug, PartialEq)]
pub enum Error {
    Store(store::Error),
    StateProcessing(state_processing::Error),
    BeaconStateError(BeaconStateError),
    /// The caller's cancellation token fired while waiting on the attestation cache.
    Cancelled,
    /// An in-progress attestation-data build resolved without populating the cache.
    ResolvedNil,
    /// `MarkInProgress` was called for a fingerprint that is already being built.
    AlreadyInProgress,
    /// The sync-committee cache has no entry for the queried committee root.
    MissingSyncCommitteeKey,
}

impl From<store::Error> for Error {
    fn from(e: store::Error) -> Self {
        Error::Store(e)
    }
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Self {
        Error::BeaconStateError(e)
    }
}

impl From<state_processing::Error> for Error {
    fn from(e: state_processing::Error) -> Self {
        Error::StateProcessing(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(e) => write!(f, "store error: {}", e),
            Error::StateProcessing(e) => write!(f, "state processing error: {}", e),
            Error::BeaconStateError(e) => write!(f, "beacon state error: {}", e),
            Error::Cancelled => write!(f, "operation cancelled"),
            Error::ResolvedNil => write!(f, "in-progress build resolved without a result"),
            Error::AlreadyInProgress => write!(f, "a build for this fingerprint is already in progress"),
            Error::MissingSyncCommitteeKey => write!(f, "no cache entry for this committee root"),
        }
    }
}

impl std::error::Error for Error {}
