use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Store(store::Error),
    BeaconChain(beacon_chain::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<store::Error> for Error {
    fn from(e: store::Error) -> Self {
        Error::Store(e)
    }
}

impl From<beacon_chain::Error> for Error {
    fn from(e: beacon_chain::Error) -> Self {
        Error::BeaconChain(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Store(e) => write!(f, "store error: {}", e),
            Error::BeaconChain(e) => write!(f, "beacon chain error: {}", e),
        }
    }
}

impl std::error::Error for Error {}
