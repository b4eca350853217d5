// Device-local storage.
// The address book depends only on this port. Whether the data
// survives a restart is decided by the injected implementation.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait PersistencePort: Send + Sync {
    fn load_slot(&self, slot_type: SlotType) -> Result<Option<AddressSlot>>;
    fn save_slot(&self, slot: &AddressSlot) -> Result<()>;

    fn load_active(&self) -> Result<Option<SlotType>>;
    fn save_active(&self, slot_type: Option<SlotType>) -> Result<()>;
}
