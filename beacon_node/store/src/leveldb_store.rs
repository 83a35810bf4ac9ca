use crate::columns::DBColumn;
use crate::item_store::{KeyValueStore, KeyValueStoreOp};
use crate::{metrics, Error};
use db_key::Key;
use leveldb::database::batch::{Batch, Writebatch};
use leveldb::database::kv::KV;
use leveldb::database::Database;
use leveldb::iterator::{Iterable, LevelDBIterator};
use leveldb::options::{Options, ReadOptions, WriteOptions};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::path::Path;
use types::EthSpec;

/// A `leveldb`-backed `KeyValueStore`. Keys are namespaced by prefixing the column's short tag
/// (see [`DBColumn::as_str`]) onto the caller's key, since a single `leveldb::Database` has one
/// flat keyspace.
pub struct LevelDB<E: EthSpec> {
    db: Mutex<Database<BytesKey>>,
    _phantom: PhantomData<E>,
}

/// A `db-key::Key` impl over an owned byte vector, so arbitrary namespaced keys can be used with
/// `leveldb`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
struct BytesKey(Vec<u8>);

impl Key for BytesKey {
    fn from_u8(key: &[u8]) -> Self {
        BytesKey(key.to_vec())
    }

    fn as_slice<T, F: Fn(&[u8]) -> T>(&self, f: F) -> T {
        f(&self.0)
    }
}

fn namespaced_key(column: DBColumn, key: &[u8]) -> BytesKey {
    let mut buf = Vec::with_capacity(column.as_str().len() + key.len());
    buf.extend_from_slice(column.as_str().as_bytes());
    buf.extend_from_slice(key);
    BytesKey(buf)
}

impl<E: EthSpec> LevelDB<E> {
    pub fn open(path: &Path) -> Result<Self, Error> {
        std::fs::create_dir_all(path).map_err(|e| Error::StorageFailure {
            column: "(open)",
            key: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut options = Options::new();
        options.create_if_missing = true;

        let db = Database::open(path, options).map_err(|e| Error::StorageFailure {
            column: "(open)",
            key: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            db: Mutex::new(db),
            _phantom: PhantomData,
        })
    }
}

impl<E: EthSpec> KeyValueStore<E> for LevelDB<E> {
    fn get_bytes(&self, column: DBColumn, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        metrics::inc_counter(&metrics::DISK_DB_READ_COUNT);
        self.db
            .lock()
            .get(ReadOptions::new(), namespaced_key(column, key))
            .map_err(|e| Error::StorageFailure {
                column: column.as_str(),
                key: hex::encode(key),
                message: e.to_string(),
            })
    }

    fn put_bytes(&self, column: DBColumn, key: &[u8], value: &[u8]) -> Result<(), Error> {
        metrics::inc_counter(&metrics::DISK_DB_WRITE_COUNT);
        self.db
            .lock()
            .put(WriteOptions::new(), namespaced_key(column, key), value)
            .map_err(|e| Error::StorageFailure {
                column: column.as_str(),
                key: hex::encode(key),
                message: e.to_string(),
            })
    }

    fn key_delete(&self, column: DBColumn, key: &[u8]) -> Result<(), Error> {
        self.db
            .lock()
            .delete(WriteOptions::new(), namespaced_key(column, key))
            .map_err(|e| Error::StorageFailure {
                column: column.as_str(),
                key: hex::encode(key),
                message: e.to_string(),
            })
    }

    fn do_atomically(&self, ops: Vec<KeyValueStoreOp>) -> Result<(), Error> {
        let mut batch = Writebatch::new();
        for op in &ops {
            match op {
                KeyValueStoreOp::PutKeyValue(column, key, value) => {
                    batch.put(namespaced_key(*column, key), value);
                }
                KeyValueStoreOp::DeleteKey(column, key) => {
                    batch.delete(namespaced_key(*column, key));
                }
            }
        }
        self.db
            .lock()
            .write(WriteOptions::new(), &batch)
            .map_err(|e| Error::StorageFailure {
                column: "(batch)",
                key: String::new(),
                message: e.to_string(),
            })
    }

    fn keys_iter(&self, column: DBColumn) -> Result<Vec<Vec<u8>>, Error> {
        let prefix = column.as_str().as_bytes();
        Ok(self
            .db
            .lock()
            .keys_iter(ReadOptions::new())
            .filter_map(|k| {
                k.0.strip_prefix(prefix)
                    .map(|rest| rest.to_vec())
            })
            .collect())
    }
}
