//! Storage trait for persisting trust registry state.

use crate::StoreError;
use vesta_types::TrustId;

/// Store trait for persisting the trust registry to durable storage.
///
/// Uses opaque `Vec<u8>` values so the store doesn't depend on the
/// `vesta-trust` crate (which would create a circular dependency). The
/// registry serializes/deserializes its own types.
pub trait TrustStore {
    fn get_setting(&self, id: TrustId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_setting(&self, id: TrustId, setting: &[u8]) -> Result<(), StoreError>;
    fn iter_settings(&self) -> Result<Vec<(TrustId, Vec<u8>)>, StoreError>;

    fn get_status(&self, id: TrustId) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_status(&self, id: TrustId, status: &[u8]) -> Result<(), StoreError>;
    fn iter_statuses(&self) -> Result<Vec<(TrustId, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
