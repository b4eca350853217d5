use async_trait::async_trait;
use doorstep_core::{
    entities::*,
    repositories::{AddressRepository, PersistenceError},
};
use parking_lot::Mutex;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, PersistenceError>;

/// Keeps the addresses of all accounts in memory.
///
/// Every non-empty credential identifies its own account.
#[derive(Debug, Default)]
pub struct InMemoryAddressRepository {
    accounts: Mutex<HashMap<String, Vec<AddressSlot>>>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn account_key(credential: &BearerToken) -> Result<String> {
    let key = credential.as_str().trim();
    if key.is_empty() {
        return Err(PersistenceError::Unauthenticated);
    }
    Ok(key.to_owned())
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn list(&self, credential: &BearerToken) -> Result<Vec<AddressSlot>> {
        let key = account_key(credential)?;
        Ok(self.accounts.lock().get(&key).cloned().unwrap_or_default())
    }

    async fn create(&self, credential: &BearerToken, slot: &AddressSlot) -> Result<AddressSlot> {
        let key = account_key(credential)?;
        let mut accounts = self.accounts.lock();
        let slots = accounts.entry(key).or_default();
        slots.retain(|s| s.slot_type != slot.slot_type);
        slots.push(slot.clone());
        Ok(slot.clone())
    }
}
