//! Test doubles shared by the use case tests.

use crate::{
    entities::*,
    gateways::{
        geocode::{GeocodeAttempt, GeocodeProviderAdapter, ProviderError},
        location::{LocationError, LocationSensor, PositionOptions, PositionReply},
        postal::{PostalArea, PostalCodeLookup},
    },
    repositories::{AddressRepository, PersistenceError},
    store::{self, PersistencePort},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    future, io,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

#[derive(Clone)]
enum SensorBehavior {
    Respond(Result<Coordinate, LocationError>),
    Drop,
    Silent,
}

#[derive(Clone)]
pub struct MockSensor {
    behavior: SensorBehavior,
    requests: Arc<AtomicUsize>,
    pending: Arc<Mutex<Vec<PositionReply>>>,
}

impl MockSensor {
    fn new(behavior: SensorBehavior) -> Self {
        Self {
            behavior,
            requests: Default::default(),
            pending: Default::default(),
        }
    }
    pub fn responding(res: Result<Coordinate, LocationError>) -> Self {
        Self::new(SensorBehavior::Respond(res))
    }
    pub fn dropping() -> Self {
        Self::new(SensorBehavior::Drop)
    }
    /// Keeps the request open forever.
    pub fn silent() -> Self {
        Self::new(SensorBehavior::Silent)
    }
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl LocationSensor for MockSensor {
    fn request_position(&self, _: &PositionOptions, reply: PositionReply) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            SensorBehavior::Respond(res) => {
                let _ = reply.send(*res);
            }
            SensorBehavior::Drop => drop(reply),
            SensorBehavior::Silent => self.pending.lock().unwrap().push(reply),
        }
    }
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, id: &str) {
        self.0.lock().unwrap().push(id.to_owned());
    }
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

enum AdapterBehavior {
    Answer(String),
    Empty,
    Fail(ProviderError),
    Hang,
}

pub struct MockAdapter {
    id: String,
    calls: CallLog,
    behavior: AdapterBehavior,
    aborted: Arc<AtomicBool>,
}

impl MockAdapter {
    fn new(id: &str, calls: &CallLog, behavior: AdapterBehavior) -> Self {
        Self {
            id: id.into(),
            calls: calls.clone(),
            behavior,
            aborted: Default::default(),
        }
    }
    pub fn answering(id: &str, calls: &CallLog, formatted: &str) -> Self {
        Self::new(id, calls, AdapterBehavior::Answer(formatted.into()))
    }
    pub fn empty(id: &str, calls: &CallLog) -> Self {
        Self::new(id, calls, AdapterBehavior::Empty)
    }
    pub fn failing(id: &str, calls: &CallLog, err: ProviderError) -> Self {
        Self::new(id, calls, AdapterBehavior::Fail(err))
    }
    pub fn hanging(id: &str, calls: &CallLog) -> Self {
        Self::new(id, calls, AdapterBehavior::Hang)
    }
    /// Set when a pending request has been dropped before completion.
    pub fn aborted_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.aborted)
    }
}

struct AbortGuard(Arc<AtomicBool>);

impl Drop for AbortGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl GeocodeProviderAdapter for MockAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<GeocodeAttempt, ProviderError> {
        self.calls.push(&self.id);
        let formatted_address = match &self.behavior {
            AdapterBehavior::Answer(formatted) => Some(formatted.clone()),
            AdapterBehavior::Empty => None,
            AdapterBehavior::Fail(err) => return Err(err.clone()),
            AdapterBehavior::Hang => {
                let _guard = AbortGuard(Arc::clone(&self.aborted));
                future::pending::<()>().await;
                unreachable!()
            }
        };
        Ok(GeocodeAttempt {
            provider_id: self.id.clone(),
            formatted_address,
            raw_payload: format!(r#"{{"query":"{coord}"}}"#),
        })
    }
}

pub struct MockPostalCodes(HashMap<&'static str, (&'static str, &'static str)>);

impl Default for MockPostalCodes {
    fn default() -> Self {
        Self(
            [
                ("110001", ("New Delhi", "Delhi")),
                ("400001", ("Mumbai", "Maharashtra")),
            ]
            .into_iter()
            .collect(),
        )
    }
}

impl PostalCodeLookup for MockPostalCodes {
    fn lookup(&self, postal_code: &str) -> Option<PostalArea> {
        self.0.get(postal_code).map(|(city, state)| PostalArea {
            city: (*city).into(),
            state: (*state).into(),
        })
    }
}

/// An in-memory address service that accepts a single credential.
pub struct MockRepo {
    pub accepted: BearerToken,
    pub slots: Mutex<Vec<AddressSlot>>,
    pub offline: AtomicBool,
    pub requests: AtomicUsize,
}

impl MockRepo {
    pub fn accepting(token: &str) -> Self {
        Self {
            accepted: BearerToken::new(token),
            slots: Default::default(),
            offline: Default::default(),
            requests: Default::default(),
        }
    }
    pub fn with_slots(self, slots: Vec<AddressSlot>) -> Self {
        *self.slots.lock().unwrap() = slots;
        self
    }
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
    fn check(&self, credential: &BearerToken) -> Result<(), PersistenceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(PersistenceError::NetworkFailure("connection refused".into()));
        }
        if credential != &self.accepted {
            return Err(PersistenceError::Unauthenticated);
        }
        Ok(())
    }
}

#[async_trait]
impl AddressRepository for MockRepo {
    async fn list(&self, credential: &BearerToken) -> Result<Vec<AddressSlot>, PersistenceError> {
        self.check(credential)?;
        Ok(self.slots.lock().unwrap().clone())
    }

    async fn create(
        &self,
        credential: &BearerToken,
        slot: &AddressSlot,
    ) -> Result<AddressSlot, PersistenceError> {
        self.check(credential)?;
        let mut slots = self.slots.lock().unwrap();
        slots.retain(|s| s.slot_type != slot.slot_type);
        slots.push(slot.clone());
        Ok(slot.clone())
    }
}

#[derive(Default)]
pub struct MockStore {
    pub slots: Mutex<HashMap<SlotType, AddressSlot>>,
    pub active: Mutex<Option<SlotType>>,
    /// Makes every write fail.
    pub read_only: AtomicBool,
}

impl MockStore {
    fn check_writable(&self) -> store::Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
        }
        Ok(())
    }
}

impl PersistencePort for MockStore {
    fn load_slot(&self, slot_type: SlotType) -> store::Result<Option<AddressSlot>> {
        Ok(self.slots.lock().unwrap().get(&slot_type).cloned())
    }
    fn save_slot(&self, slot: &AddressSlot) -> store::Result<()> {
        self.check_writable()?;
        self.slots
            .lock()
            .unwrap()
            .insert(slot.slot_type, slot.clone());
        Ok(())
    }
    fn load_active(&self) -> store::Result<Option<SlotType>> {
        Ok(*self.active.lock().unwrap())
    }
    fn save_active(&self, slot_type: Option<SlotType>) -> store::Result<()> {
        self.check_writable()?;
        *self.active.lock().unwrap() = slot_type;
        Ok(())
    }
}
