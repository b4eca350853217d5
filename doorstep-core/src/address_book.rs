//! In-memory state of the address slots of a single user session.

use crate::{
    entities::*,
    util::validate::{AutoCorrect, Validate, ValidationError},
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("The {0} address is not available")]
pub struct InvalidSelection(pub SlotType);

#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    slots: BTreeMap<SlotType, AddressSlot>,
    active: Option<SlotType>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a slot, replacing the previous slot of the same type.
    ///
    /// The first successfully stored slot becomes the active
    /// selection if none has been made yet.
    pub fn set_slot(&mut self, slot: AddressSlot) -> Result<(), ValidationError> {
        let slot = slot.auto_correct();
        slot.validate()?;
        let slot_type = slot.slot_type;
        log::debug!("Storing {slot_type} address: {}", slot.formatted_address);
        self.slots.insert(slot_type, slot);
        if self.active.is_none() {
            self.active = Some(slot_type);
        }
        Ok(())
    }

    /// Stores the named slots loaded from the repository.
    ///
    /// A loaded slot overwrites the slot of the same type. Slots
    /// missing from `slots` are kept. Invalid entries are skipped. Returns the number of stored slots.
    pub fn load_named<I>(&mut self, slots: I) -> usize
    where
        I: IntoIterator<Item = AddressSlot>,
    {
        let mut count = 0;
        for slot in slots {
            if !slot.slot_type.is_named() {
                log::warn!("Ignoring {} address received from the repository", slot.slot_type);
                continue;
            }
            let slot = slot.auto_correct();
            if let Err(err) = slot.validate() {
                log::warn!("Ignoring invalid {} address: {err}", slot.slot_type);
                continue;
            }
            self.slots.insert(slot.slot_type, slot);
            count += 1;
        }
        self.ensure_valid_active();
        count
    }

    pub fn select_active(&mut self, slot_type: SlotType) -> Result<(), InvalidSelection> {
        if !self.is_selectable(slot_type) {
            return Err(InvalidSelection(slot_type));
        }
        self.active = Some(slot_type);
        Ok(())
    }

    /// Chooses the active selection after the slots have been loaded.
    ///
    /// A remembered selection wins if it still refers to a valid slot.
    /// Otherwise the first valid slot in load order is selected.
    pub fn resolve_on_load(&mut self, remembered: Option<SlotType>) -> Option<SlotType> {
        self.active = remembered
            .filter(|t| self.is_selectable(*t))
            .or_else(|| SlotType::load_order().find(|t| self.is_selectable(*t)));
        self.active
    }

    pub fn slot(&self, slot_type: SlotType) -> Option<&AddressSlot> {
        self.slots.get(&slot_type)
    }

    pub fn slots(&self) -> impl Iterator<Item = &AddressSlot> {
        self.slots.values()
    }

    pub fn active_slot_type(&self) -> Option<SlotType> {
        self.active
    }

    pub fn active(&self) -> Option<&AddressSlot> {
        self.active.and_then(|t| self.slot(t))
    }

    pub fn is_selectable(&self, slot_type: SlotType) -> bool {
        self.slot(slot_type).is_some_and(AddressSlot::is_valid)
    }

    fn ensure_valid_active(&mut self) {
        if let Some(active) = self.active {
            if !self.is_selectable(active) {
                log::debug!("Active {active} address is no longer available");
                self.active = None;
            }
        }
    }
}
