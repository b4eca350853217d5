use crate::{
    entities::Coordinate,
    gateways::geocode::{GeocodeProviderAdapter, ProviderError},
    util::format::normalize_formatted,
};
use std::time::Duration;
use thiserror::Error;
use tokio::time;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(
        "None of the geocoding providers could resolve the position{}",
        .0.as_ref().map(|err| format!(" (last error: {err})")).unwrap_or_default()
    )]
    AllProvidersExhausted(Option<ProviderError>),
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub provider_id       : String,
    pub formatted_address : String,
    pub coordinate        : Coordinate,
}

struct Provider {
    adapter: Box<dyn GeocodeProviderAdapter>,
    timeout: Duration,
}

/// Resolves a coordinate by asking the providers one after another.
///
/// Providers are never asked concurrently: the list is ordered by
/// preference and the first usable answer ends the search.
pub struct ReverseGeocodeResolver {
    providers: Vec<Provider>,
    default_timeout: Duration,
}

impl Default for ReverseGeocodeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER_TIMEOUT)
    }
}

impl ReverseGeocodeResolver {
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            providers: vec![],
            default_timeout,
        }
    }

    pub fn with_adapter<A>(self, adapter: A) -> Self
    where
        A: GeocodeProviderAdapter + 'static,
    {
        let timeout = self.default_timeout;
        self.with_adapter_timeout(adapter, timeout)
    }

    pub fn with_adapter_timeout<A>(mut self, adapter: A, timeout: Duration) -> Self
    where
        A: GeocodeProviderAdapter + 'static,
    {
        self.push(Box::new(adapter), Some(timeout));
        self
    }

    /// Appends a provider with the lowest priority so far.
    pub fn push(&mut self, adapter: Box<dyn GeocodeProviderAdapter>, timeout: Option<Duration>) {
        let timeout = timeout.unwrap_or(self.default_timeout);
        log::debug!("Register geocoding provider {} (timeout = {timeout:?})", adapter.id());
        self.providers.push(Provider { adapter, timeout });
    }

    pub fn provider_ids(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.adapter.id())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub async fn resolve(&self, coord: Coordinate) -> Result<ResolvedAddress, ResolveError> {
        let mut last_error = None;
        for Provider { adapter, timeout } in &self.providers {
            let provider_id = adapter.id();
            log::debug!("Resolving {coord} with {provider_id}");
            // An elapsed attempt is dropped, which aborts the pending request.
            let attempt = match time::timeout(*timeout, adapter.reverse_geocode(coord)).await {
                Ok(attempt) => attempt,
                Err(_) => Err(ProviderError::Timeout(*timeout)),
            };
            let formatted_address = attempt.and_then(|attempt| {
                attempt
                    .formatted_address
                    .as_deref()
                    .and_then(normalize_formatted)
                    .ok_or(ProviderError::NoAddress)
            });
            match formatted_address {
                Ok(formatted_address) => {
                    log::info!("Resolved {coord} with {provider_id}: {formatted_address}");
                    return Ok(ResolvedAddress {
                        provider_id: provider_id.to_owned(),
                        formatted_address,
                        coordinate: coord,
                    });
                }
                Err(err) => {
                    log::warn!("Geocoding provider {provider_id} failed to resolve {coord}: {err}");
                    last_error = Some(err);
                }
            }
        }
        Err(ResolveError::AllProvidersExhausted(last_error))
    }
}
