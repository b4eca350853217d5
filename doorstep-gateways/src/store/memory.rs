use doorstep_core::{
    entities::*,
    store::{PersistencePort, Result},
};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Storage that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<SlotType, AddressSlot>>,
    active: RwLock<Option<SlotType>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistencePort for MemoryStore {
    fn load_slot(&self, slot_type: SlotType) -> Result<Option<AddressSlot>> {
        Ok(self.slots.read().get(&slot_type).cloned())
    }

    fn save_slot(&self, slot: &AddressSlot) -> Result<()> {
        self.slots.write().insert(slot.slot_type, slot.clone());
        Ok(())
    }

    fn load_active(&self) -> Result<Option<SlotType>> {
        Ok(*self.active.read())
    }

    fn save_active(&self, slot_type: Option<SlotType>) -> Result<()> {
        *self.active.write() = slot_type;
        Ok(())
    }
}
