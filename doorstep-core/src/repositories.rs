// Remote access traits.
// The address repository is owned by another service and
// reached over the network. It only knows the named slots
// of an account; the current location never leaves the device.

use crate::entities::*;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("The credential is missing or has been rejected")]
    Unauthenticated,
    #[error("The address service could not be reached: {0}")]
    NetworkFailure(String),
}

type Result<T> = std::result::Result<T, PersistenceError>;

#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// All named slots of the account.
    async fn list(&self, credential: &BearerToken) -> Result<Vec<AddressSlot>>;

    /// Stores a named slot, replacing any previous slot of the same type.
    async fn create(&self, credential: &BearerToken, slot: &AddressSlot) -> Result<AddressSlot>;
}
