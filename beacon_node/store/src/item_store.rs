use crate::{columns::DBColumn, Error};
use types::EthSpec;

/// A single put or delete, batched together with others into one atomic transaction via
/// `KeyValueStore::do_atomically`.
pub enum KeyValueStoreOp {
    PutKeyValue(DBColumn, Vec<u8>, Vec<u8>),
    DeleteKey(DBColumn, Vec<u8>),
}

/// The KV substrate contract (spec §4.A): named buckets, point reads/writes, and all-or-nothing
/// batched writes. Iteration within a column is ascending lexicographic by key.
pub trait KeyValueStore<E: EthSpec>: Sync + Send {
    fn get_bytes(&self, column: DBColumn, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    fn put_bytes(&self, column: DBColumn, key: &[u8], value: &[u8]) -> Result<(), Error>;

    fn key_delete(&self, column: DBColumn, key: &[u8]) -> Result<(), Error>;

    fn key_exists(&self, column: DBColumn, key: &[u8]) -> Result<bool, Error> {
        Ok(self.get_bytes(column, key)?.is_some())
    }

    /// Applies every op in `ops`, in order; either all of them land or none do.
    fn do_atomically(&self, ops: Vec<KeyValueStoreOp>) -> Result<(), Error>;

    /// All keys currently present in `column`, in ascending lexicographic order.
    fn keys_iter(&self, column: DBColumn) -> Result<Vec<Vec<u8>>, Error>;
}

/// Marker trait for a `KeyValueStore` suitable for use as one side (hot or cold) of a
/// `HotColdDB`.
pub trait ItemStore<E: EthSpec>: KeyValueStore<E> + Sync + Send + Sized + 'static {}

impl<E: EthSpec, T> ItemStore<E> for T where T: KeyValueStore<E> + Sync + Send + Sized + 'static {}
