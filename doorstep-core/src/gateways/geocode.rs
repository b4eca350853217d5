use crate::entities::Coordinate;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("No address found")]
    NoAddress,
}

/// The outcome of a single provider request.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeAttempt {
    pub provider_id       : String,
    pub formatted_address : Option<String>,
    pub raw_payload       : String,
}

/// A third-party reverse geocoding service.
///
/// Implementations only know how to call their own endpoint
/// and how to translate its response into a formatted address.
#[async_trait]
pub trait GeocodeProviderAdapter: Send + Sync {
    fn id(&self) -> &str;

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<GeocodeAttempt, ProviderError>;
}
