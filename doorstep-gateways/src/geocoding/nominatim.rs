use super::{attempt, lat_lng, parse, street_line};
use async_trait::async_trait;
use doorstep_core::{
    entities::Coordinate,
    gateways::geocode::{GeocodeAttempt, GeocodeProviderAdapter, ProviderError},
    util::format::join_components,
};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Reverse geocoding with the community run OpenStreetMap Nominatim service.
///
/// The usage policy asks for an identifying user agent and at most
/// one request per second, so this adapter should be the last resort.
pub struct Nominatim {
    client: Client,
    base_url: String,
}

impl Nominatim {
    pub const ID: &'static str = "nominatim";

    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl GeocodeProviderAdapter for Nominatim {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<GeocodeAttempt, ProviderError> {
        let (lat, lng) = lat_lng(coord);
        let request = self.client.get(&self.base_url).query(&[
            ("format", "jsonv2"),
            ("lat", lat.as_str()),
            ("lon", lng.as_str()),
            ("addressdetails", "1"),
        ]);
        attempt(Self::ID, request, translate).await
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    display_name: Option<String>,
    address: Option<Address>,
    /// Set instead of an address if nothing was found.
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Address {
    house_number: Option<String>,
    road: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

fn translate(body: &str) -> Result<Option<String>, ProviderError> {
    let Response {
        display_name,
        address,
        error,
    } = parse(body)?;
    if let Some(error) = error {
        log::debug!("Nominatim: {error}");
        return Ok(None);
    }
    let composed = address.and_then(|a| {
        let street = street_line(a.house_number.as_deref(), a.road.as_deref());
        let locality = a.city.or(a.town).or(a.village);
        join_components([
            street.as_deref(),
            a.suburb.as_deref(),
            locality.as_deref(),
            a.state.as_deref(),
            a.postcode.as_deref(),
            a.country.as_deref(),
        ])
    });
    Ok(composed.or(display_name))
}
