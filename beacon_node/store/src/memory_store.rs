use crate::columns::DBColumn;
use crate::item_store::{KeyValueStore, KeyValueStoreOp};
use crate::Error;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use types::EthSpec;

/// An in-memory `KeyValueStore`, used as both the hot and cold side in tests so they don't need
/// a real LevelDB directory.
pub struct MemoryStore<E: EthSpec> {
    db: RwLock<BTreeMap<(DBColumn, Vec<u8>), Vec<u8>>>,
    _phantom: PhantomData<E>,
}

impl<E: EthSpec> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            db: RwLock::new(BTreeMap::new()),
            _phantom: PhantomData,
        }
    }
}

impl<E: EthSpec> MemoryStore<E> {
    pub fn open() -> Self {
        Self::default()
    }
}

impl<E: EthSpec> KeyValueStore<E> for MemoryStore<E> {
    fn get_bytes(&self, column: DBColumn, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.db.read().get(&(column, key.to_vec())).cloned())
    }

    fn put_bytes(&self, column: DBColumn, key: &[u8], value: &[u8]) -> Result<(), Error> {
        self.db
            .write()
            .insert((column, key.to_vec()), value.to_vec());
        Ok(())
    }

    fn key_delete(&self, column: DBColumn, key: &[u8]) -> Result<(), Error> {
        self.db.write().remove(&(column, key.to_vec()));
        Ok(())
    }

    fn do_atomically(&self, ops: Vec<KeyValueStoreOp>) -> Result<(), Error> {
        let mut db = self.db.write();
        for op in ops {
            match op {
                KeyValueStoreOp::PutKeyValue(column, key, value) => {
                    db.insert((column, key), value);
                }
                KeyValueStoreOp::DeleteKey(column, key) => {
                    db.remove(&(column, key));
                }
            }
        }
        Ok(())
    }

    fn keys_iter(&self, column: DBColumn) -> Result<Vec<Vec<u8>>, Error> {
        Ok(self
            .db
            .read()
            .keys()
            .filter(|(c, _)| *c == column)
            .map(|(_, k)| k.clone())
            .collect())
    }
}
