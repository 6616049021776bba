//! Durable keyed storage of trust configuration and status.

use std::collections::HashMap;

use crate::error::TrustError;
use crate::record::{TrustSetting, TrustStatus};
use vesta_types::{AccountAddress, Timestamp, TrustId};

/// The trust registry — settings, statuses, and reverse indices.
///
/// Settings are immutable after creation; statuses are mutated only through
/// [`commit_status`](Self::commit_status). Ids are allocated sequentially
/// starting at 1 and never reused. The reverse indices are append-only and
/// preserve insertion order.
pub struct TrustRegistry {
    next_id: u64,
    settings: HashMap<TrustId, TrustSetting>,
    statuses: HashMap<TrustId, TrustStatus>,
    by_settlor: HashMap<AccountAddress, Vec<TrustId>>,
    by_beneficiary: HashMap<AccountAddress, Vec<TrustId>>,
}

impl TrustRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            settings: HashMap::new(),
            statuses: HashMap::new(),
            by_settlor: HashMap::new(),
            by_beneficiary: HashMap::new(),
        }
    }

    /// Create a new trust from its immutable configuration.
    ///
    /// The only validation performed is that `release_time` is strictly in
    /// the future; everything else is accepted as caller-supplied.
    pub fn create(&mut self, setting: TrustSetting, now: Timestamp) -> Result<TrustId, TrustError> {
        if !setting.release_time.is_after(now) {
            return Err(TrustError::ReleaseTimeNotFuture {
                release: setting.release_time,
                now,
            });
        }

        let id = TrustId::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(TrustError::Arithmetic)?;

        self.statuses.insert(id, TrustStatus::new(setting.release_time));
        self.by_settlor
            .entry(setting.settlor.clone())
            .or_default()
            .push(id);
        self.by_beneficiary
            .entry(setting.beneficiary.clone())
            .or_default()
            .push(id);
        self.settings.insert(id, setting);

        Ok(id)
    }

    /// The immutable configuration of a trust.
    pub fn setting(&self, id: TrustId) -> Option<&TrustSetting> {
        self.settings.get(&id)
    }

    /// The current status of a trust.
    pub fn status(&self, id: TrustId) -> Option<&TrustStatus> {
        self.statuses.get(&id)
    }

    /// Trusts funded by `settlor`, in creation order.
    pub fn trusts_by_settlor(&self, settlor: &AccountAddress) -> &[TrustId] {
        self.by_settlor.get(settlor).map_or(&[], Vec::as_slice)
    }

    /// Trusts receivable by `beneficiary`, in creation order.
    pub fn trusts_by_beneficiary(&self, beneficiary: &AccountAddress) -> &[TrustId] {
        self.by_beneficiary
            .get(beneficiary)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of trusts ever created.
    pub fn trust_count(&self) -> u64 {
        self.next_id - 1
    }

    /// Replace a trust's status wholesale.
    ///
    /// This is the engine's commit point: the engine stages its mutation on
    /// a copy and writes it back here only after the gateway succeeded.
    pub(crate) fn commit_status(&mut self, id: TrustId, status: TrustStatus) {
        self.statuses.insert(id, status);
    }
}

impl Default for TrustRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustRegistry {
    /// Persist the registry to a trust store.
    ///
    /// Reverse indices are derivable from the settings and are not stored.
    pub fn save_to_store(&self, store: &dyn vesta_store::TrustStore) -> Result<(), TrustError> {
        let id_bytes = self.next_id.to_be_bytes();
        store
            .put_meta(b"next_trust_id", &id_bytes)
            .map_err(|e| TrustError::Storage(e.to_string()))?;

        for (id, setting) in &self.settings {
            let bytes =
                bincode::serialize(setting).map_err(|e| TrustError::Storage(e.to_string()))?;
            store
                .put_setting(*id, &bytes)
                .map_err(|e| TrustError::Storage(e.to_string()))?;
        }
        for (id, status) in &self.statuses {
            let bytes =
                bincode::serialize(status).map_err(|e| TrustError::Storage(e.to_string()))?;
            store
                .put_status(*id, &bytes)
                .map_err(|e| TrustError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Restore a registry from a trust store.
    ///
    /// Indices are rebuilt in id order; ids are sequential, so this
    /// reproduces the original insertion order. The allocation counter is
    /// floored at one past the highest stored id — a missing or stale
    /// `next_trust_id` meta key must never let a restored registry reuse
    /// an id that already names a trust.
    pub fn load_from_store(store: &dyn vesta_store::TrustStore) -> Result<Self, TrustError> {
        let stored_next_id = match store
            .get_meta(b"next_trust_id")
            .map_err(|e| TrustError::Storage(e.to_string()))?
        {
            Some(bytes) if bytes.len() >= 8 => {
                u64::from_be_bytes(bytes[..8].try_into().map_err(|_| TrustError::Arithmetic)?)
            }
            _ => 1,
        };

        let mut entries: Vec<(TrustId, TrustSetting)> = Vec::new();
        for (id, bytes) in store
            .iter_settings()
            .map_err(|e| TrustError::Storage(e.to_string()))?
        {
            let setting: TrustSetting =
                bincode::deserialize(&bytes).map_err(|e| TrustError::Storage(e.to_string()))?;
            entries.push((id, setting));
        }
        entries.sort_by_key(|(id, _)| *id);
        let highest_id = entries.last().map_or(0, |(id, _)| id.as_u64());

        let mut registry = Self::new();
        registry.next_id = stored_next_id.max(
            highest_id.checked_add(1).ok_or(TrustError::Arithmetic)?,
        );
        for (id, setting) in entries {
            registry
                .by_settlor
                .entry(setting.settlor.clone())
                .or_default()
                .push(id);
            registry
                .by_beneficiary
                .entry(setting.beneficiary.clone())
                .or_default()
                .push(id);
            registry.settings.insert(id, setting);
        }

        for (id, bytes) in store
            .iter_statuses()
            .map_err(|e| TrustError::Storage(e.to_string()))?
        {
            let status: TrustStatus =
                bincode::deserialize(&bytes).map_err(|e| TrustError::Storage(e.to_string()))?;
            registry.statuses.insert(id, status);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesta_types::{Amount, AssetId};

    fn test_address(n: u8) -> AccountAddress {
        AccountAddress::new(format!("vst_{:0>60}", n))
    }

    fn test_setting(settlor: u8, beneficiary: u8, release: u64) -> TrustSetting {
        TrustSetting {
            settlor: test_address(settlor),
            asset: AssetId::Native,
            deposit_amount: Amount::new(100),
            deposit_count: 2,
            withdraw_count: 2,
            release_time: Timestamp::new(release),
            beneficiary: test_address(beneficiary),
            revocable: true,
        }
    }

    #[test]
    fn create_allocates_sequential_ids() {
        let mut registry = TrustRegistry::new();
        let now = Timestamp::new(100);

        let a = registry.create(test_setting(1, 2, 1000), now).unwrap();
        let b = registry.create(test_setting(1, 3, 1000), now).unwrap();
        let c = registry.create(test_setting(4, 2, 1000), now).unwrap();

        assert_eq!(a, TrustId::new(1));
        assert_eq!(b, TrustId::new(2));
        assert_eq!(c, TrustId::new(3));
        assert_eq!(registry.trust_count(), 3);
    }

    #[test]
    fn create_rejects_non_future_release_time() {
        let mut registry = TrustRegistry::new();
        let now = Timestamp::new(1000);

        let at_now = registry.create(test_setting(1, 2, 1000), now);
        assert!(matches!(
            at_now.unwrap_err(),
            TrustError::ReleaseTimeNotFuture { .. }
        ));

        let in_past = registry.create(test_setting(1, 2, 999), now);
        assert!(matches!(
            in_past.unwrap_err(),
            TrustError::ReleaseTimeNotFuture { .. }
        ));

        // A rejected creation allocates nothing.
        assert_eq!(registry.trust_count(), 0);
    }

    #[test]
    fn new_trust_starts_at_zero_with_release_gate() {
        let mut registry = TrustRegistry::new();
        let id = registry
            .create(test_setting(1, 2, 5000), Timestamp::new(100))
            .unwrap();

        let status = registry.status(id).unwrap();
        assert_eq!(status.balance, Amount::ZERO);
        assert_eq!(status.deposited_count, 0);
        assert_eq!(status.withdrawn_count, 0);
        assert_eq!(status.next_withdraw_time, Timestamp::new(5000));
        assert!(!status.revoked);
    }

    #[test]
    fn reverse_indices_preserve_creation_order() {
        let mut registry = TrustRegistry::new();
        let now = Timestamp::new(100);

        let a = registry.create(test_setting(1, 2, 1000), now).unwrap();
        let b = registry.create(test_setting(1, 3, 1000), now).unwrap();
        let c = registry.create(test_setting(4, 2, 1000), now).unwrap();

        assert_eq!(registry.trusts_by_settlor(&test_address(1)), &[a, b]);
        assert_eq!(registry.trusts_by_settlor(&test_address(4)), &[c]);
        assert_eq!(registry.trusts_by_beneficiary(&test_address(2)), &[a, c]);
        assert_eq!(registry.trusts_by_beneficiary(&test_address(3)), &[b]);
        assert!(registry.trusts_by_settlor(&test_address(9)).is_empty());
    }

    #[test]
    fn settlor_as_own_beneficiary_is_accepted() {
        let mut registry = TrustRegistry::new();
        let id = registry
            .create(test_setting(1, 1, 1000), Timestamp::new(100))
            .unwrap();

        assert_eq!(registry.trusts_by_settlor(&test_address(1)), &[id]);
        assert_eq!(registry.trusts_by_beneficiary(&test_address(1)), &[id]);
    }

    /// In-memory store whose meta table loses writes, mimicking a backend
    /// restored from a partial snapshot.
    struct MetaLossStore {
        settings: std::sync::Mutex<HashMap<u64, Vec<u8>>>,
        statuses: std::sync::Mutex<HashMap<u64, Vec<u8>>>,
    }

    impl MetaLossStore {
        fn new() -> Self {
            Self {
                settings: std::sync::Mutex::new(HashMap::new()),
                statuses: std::sync::Mutex::new(HashMap::new()),
            }
        }
    }

    impl vesta_store::TrustStore for MetaLossStore {
        fn get_setting(&self, id: TrustId) -> Result<Option<Vec<u8>>, vesta_store::StoreError> {
            Ok(self.settings.lock().unwrap().get(&id.as_u64()).cloned())
        }

        fn put_setting(&self, id: TrustId, setting: &[u8]) -> Result<(), vesta_store::StoreError> {
            self.settings
                .lock()
                .unwrap()
                .insert(id.as_u64(), setting.to_vec());
            Ok(())
        }

        fn iter_settings(&self) -> Result<Vec<(TrustId, Vec<u8>)>, vesta_store::StoreError> {
            Ok(self
                .settings
                .lock()
                .unwrap()
                .iter()
                .map(|(id, bytes)| (TrustId::new(*id), bytes.clone()))
                .collect())
        }

        fn get_status(&self, id: TrustId) -> Result<Option<Vec<u8>>, vesta_store::StoreError> {
            Ok(self.statuses.lock().unwrap().get(&id.as_u64()).cloned())
        }

        fn put_status(&self, id: TrustId, status: &[u8]) -> Result<(), vesta_store::StoreError> {
            self.statuses
                .lock()
                .unwrap()
                .insert(id.as_u64(), status.to_vec());
            Ok(())
        }

        fn iter_statuses(&self) -> Result<Vec<(TrustId, Vec<u8>)>, vesta_store::StoreError> {
            Ok(self
                .statuses
                .lock()
                .unwrap()
                .iter()
                .map(|(id, bytes)| (TrustId::new(*id), bytes.clone()))
                .collect())
        }

        fn get_meta(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, vesta_store::StoreError> {
            Ok(None)
        }

        fn put_meta(&self, _key: &[u8], _value: &[u8]) -> Result<(), vesta_store::StoreError> {
            Ok(())
        }
    }

    #[test]
    fn reload_without_meta_key_never_reuses_ids() {
        let mut registry = TrustRegistry::new();
        let now = Timestamp::new(100);
        let a = registry.create(test_setting(1, 2, 1000), now).unwrap();
        let b = registry.create(test_setting(3, 4, 1000), now).unwrap();

        let store = MetaLossStore::new();
        registry.save_to_store(&store).unwrap();

        let mut restored = TrustRegistry::load_from_store(&store).unwrap();
        let c = restored.create(test_setting(5, 6, 1000), now).unwrap();

        // Allocation resumes past every stored id even though the counter
        // was not persisted, and the original trusts survive untouched.
        assert_eq!(c, TrustId::new(3));
        assert_eq!(restored.trust_count(), 3);
        assert_eq!(restored.setting(a), registry.setting(a));
        assert_eq!(restored.setting(b), registry.setting(b));
        assert_eq!(restored.status(a), registry.status(a));
    }

    #[test]
    fn reload_from_empty_store_starts_fresh() {
        let store = MetaLossStore::new();
        let mut restored = TrustRegistry::load_from_store(&store).unwrap();
        assert_eq!(restored.trust_count(), 0);

        let id = restored
            .create(test_setting(1, 2, 1000), Timestamp::new(100))
            .unwrap();
        assert_eq!(id, TrustId::new(1));
    }

    #[test]
    fn zero_installment_counts_are_accepted() {
        let mut registry = TrustRegistry::new();
        let mut setting = test_setting(1, 2, 1000);
        setting.deposit_count = 0;
        setting.withdraw_count = 0;

        let id = registry.create(setting, Timestamp::new(100)).unwrap();
        let stored = registry.setting(id).unwrap();
        assert_eq!(stored.deposit_count, 0);
        assert_eq!(stored.withdraw_count, 0);
    }
}
