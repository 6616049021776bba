//! Nullable store — thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use vesta_store::{StoreError, TrustStore};
use vesta_types::TrustId;

/// An in-memory trust store for testing.
pub struct NullStore {
    settings: Mutex<HashMap<u64, Vec<u8>>>,
    statuses: Mutex<HashMap<u64, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(HashMap::new()),
            statuses: Mutex::new(HashMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustStore for NullStore {
    fn get_setting(&self, id: TrustId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.settings.lock().unwrap().get(&id.as_u64()).cloned())
    }

    fn put_setting(&self, id: TrustId, setting: &[u8]) -> Result<(), StoreError> {
        self.settings
            .lock()
            .unwrap()
            .insert(id.as_u64(), setting.to_vec());
        Ok(())
    }

    fn iter_settings(&self) -> Result<Vec<(TrustId, Vec<u8>)>, StoreError> {
        Ok(self
            .settings
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (TrustId::new(*id), bytes.clone()))
            .collect())
    }

    fn get_status(&self, id: TrustId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.statuses.lock().unwrap().get(&id.as_u64()).cloned())
    }

    fn put_status(&self, id: TrustId, status: &[u8]) -> Result<(), StoreError> {
        self.statuses
            .lock()
            .unwrap()
            .insert(id.as_u64(), status.to_vec());
        Ok(())
    }

    fn iter_statuses(&self) -> Result<Vec<(TrustId, Vec<u8>)>, StoreError> {
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (TrustId::new(*id), bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
