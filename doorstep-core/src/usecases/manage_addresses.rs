use super::{prelude::*, CoordinateAcquirer, ReverseGeocodeResolver};
use crate::{
    address_book::{AddressBook, InvalidSelection},
    util::{
        format::format_manual_entry,
        validate::{AutoCorrect, Validate},
    },
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Where named address slots are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Named slots are stored in the account.
    Account,
    /// Named slots are only kept in memory and get lost on restart.
    LocalOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub active: Option<SlotType>,
    pub sync_mode: SyncMode,
    /// Number of named slots received from the account
    pub loaded: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    Located(AddressSlot),
    /// The caller lost interest before the address was resolved.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Synced,
    /// The current location is only stored for this session.
    SessionOnly,
    /// The slot has not been stored in the account and will be
    /// lost on restart.
    LocalOnly,
}

pub struct AddressBookPorts {
    pub acquirer: CoordinateAcquirer,
    pub resolver: ReverseGeocodeResolver,
    pub repository: Arc<dyn AddressRepository>,
    /// Session-scoped storage for the current location.
    pub session_store: Arc<dyn PersistencePort>,
    /// Durable device storage for the remembered selection.
    pub device_store: Arc<dyn PersistencePort>,
}

/// Keeps the address book of a single user session in sync
/// with the device and the account.
pub struct AddressBookManager {
    book: AddressBook,
    ports: AddressBookPorts,
    session: Session,
    sync_mode: SyncMode,
}

impl AddressBookManager {
    pub fn new(ports: AddressBookPorts, session: Session) -> Self {
        let sync_mode = if session.is_authenticated() {
            SyncMode::Account
        } else {
            SyncMode::LocalOnly
        };
        Self {
            book: AddressBook::new(),
            ports,
            session,
            sync_mode,
        }
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// The address that should be used for a pending request.
    pub fn active(&self) -> Option<&AddressSlot> {
        self.book.active()
    }

    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn load(&mut self) -> Result<LoadOutcome> {
        if let Some(current) = self.ports.session_store.load_slot(SlotType::Current)? {
            if let Err(err) = self.book.set_slot(current) {
                log::warn!("Discarding stored current address: {err}");
            }
        }
        let mut loaded = 0;
        if let Some(credential) = self.account_credential() {
            match self.ports.repository.list(&credential).await {
                Ok(slots) => {
                    loaded = self.book.load_named(slots);
                    log::debug!("Loaded {loaded} address(es) from the account");
                }
                Err(PersistenceError::Unauthenticated) => self.degrade_to_local_only(),
                Err(err) => return Err(err.into()),
            }
        }
        let remembered = self.ports.device_store.load_active()?;
        let active = self.book.resolve_on_load(remembered);
        if active != remembered {
            self.ports.device_store.save_active(active)?;
        }
        if active.is_none() {
            log::info!("No address available: a location must be set before proceeding");
        }
        Ok(LoadOutcome {
            active,
            sync_mode: self.sync_mode,
            loaded,
        })
    }

    /// Resolves the device position into the current address slot
    /// and selects it.
    pub async fn use_current_location(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<LocateOutcome> {
        let coord = match self.ports.acquirer.acquire(cancel).await {
            None => return Ok(LocateOutcome::Abandoned),
            Some(Ok(coord)) => coord,
            Some(Err(err)) => {
                log::warn!("Failed to acquire the current position: {err}");
                return Err(err.into());
            }
        };
        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            res = self.ports.resolver.resolve(coord) => Some(res),
        };
        let Some(resolved) = resolved else {
            log::debug!("Discarding the resolution of {coord}");
            return Ok(LocateOutcome::Abandoned);
        };
        let resolved = resolved?;
        if cancel.is_cancelled() {
            return Ok(LocateOutcome::Abandoned);
        }
        let slot = AddressSlot {
            slot_type: SlotType::Current,
            formatted_address: resolved.formatted_address,
            structured: None,
            source_coordinate: Some(resolved.coordinate),
        };
        let slot = self.store_current(slot)?;
        self.select_active(SlotType::Current)?;
        Ok(LocateOutcome::Located(slot))
    }

    /// Saves a manually entered address.
    pub async fn save_slot(
        &mut self,
        slot_type: SlotType,
        addr: StructuredAddress,
    ) -> Result<SaveOutcome> {
        let addr = addr.auto_correct();
        let formatted_address = if addr.is_empty() {
            String::new()
        } else {
            format_manual_entry(&addr)
        };
        let slot = AddressSlot {
            slot_type,
            formatted_address,
            structured: Some(addr),
            source_coordinate: None,
        }
        .auto_correct();
        slot.validate()?;

        if !slot_type.is_named() {
            self.store_current(slot)?;
            self.remember_active()?;
            return Ok(SaveOutcome::SessionOnly);
        }

        let outcome = match self.account_credential() {
            Some(credential) => match self.ports.repository.create(&credential, &slot).await {
                Ok(_) => SaveOutcome::Synced,
                Err(PersistenceError::Unauthenticated) => {
                    self.degrade_to_local_only();
                    SaveOutcome::LocalOnly
                }
                Err(err) => return Err(err.into()),
            },
            None => SaveOutcome::LocalOnly,
        };
        if outcome == SaveOutcome::LocalOnly {
            log::warn!("The {slot_type} address is not stored in an account and will be lost on restart");
        }
        self.book.set_slot(slot)?;
        self.remember_active()?;
        Ok(outcome)
    }

    /// Selects a slot and remembers the selection on the device.
    ///
    /// The book is left unchanged if the selection can't be stored.
    pub fn select_active(&mut self, slot_type: SlotType) -> Result<()> {
        if !self.book.is_selectable(slot_type) {
            return Err(InvalidSelection(slot_type).into());
        }
        self.ports.device_store.save_active(Some(slot_type))?;
        self.book.select_active(slot_type)?;
        Ok(())
    }

    fn store_current(&mut self, slot: AddressSlot) -> Result<AddressSlot> {
        debug_assert_eq!(SlotType::Current, slot.slot_type);
        let slot = slot.auto_correct();
        slot.validate()?;
        self.ports.session_store.save_slot(&slot)?;
        self.book.set_slot(slot.clone())?;
        Ok(slot)
    }

    fn remember_active(&self) -> Result<()> {
        self.ports
            .device_store
            .save_active(self.book.active_slot_type())?;
        Ok(())
    }

    fn account_credential(&self) -> Option<BearerToken> {
        match self.sync_mode {
            SyncMode::Account => self.session.credential.clone(),
            SyncMode::LocalOnly => None,
        }
    }

    fn degrade_to_local_only(&mut self) {
        log::warn!(
            "The account rejected the credential: addresses are kept on this device only until the next restart"
        );
        self.sync_mode = SyncMode::LocalOnly;
    }
}
