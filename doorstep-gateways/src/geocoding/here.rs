use super::{attempt, lat_lng, parse, street_line};
use async_trait::async_trait;
use doorstep_core::{
    entities::Coordinate,
    gateways::geocode::{GeocodeAttempt, GeocodeProviderAdapter, ProviderError},
    util::format::join_components,
};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://revgeocode.search.hereapi.com/v1/revgeocode";

/// Reverse geocoding with the HERE geocoding & search API.
pub struct Here {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Here {
    pub const ID: &'static str = "here";

    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl GeocodeProviderAdapter for Here {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<GeocodeAttempt, ProviderError> {
        let (lat, lng) = lat_lng(coord);
        let at = format!("{lat},{lng}");
        let request = self.client.get(&self.base_url).query(&[
            ("at", at.as_str()),
            ("limit", "1"),
            ("apiKey", self.api_key.as_str()),
        ]);
        attempt(Self::ID, request, translate).await
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Address {
    label: Option<String>,
    house_number: Option<String>,
    street: Option<String>,
    district: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country_name: Option<String>,
}

fn translate(body: &str) -> Result<Option<String>, ProviderError> {
    let Response { items } = parse(body)?;
    let Some(Item { title, address: a }) = items.into_iter().next() else {
        return Ok(None);
    };
    let street = street_line(a.house_number.as_deref(), a.street.as_deref());
    let composed = join_components([
        street.as_deref(),
        a.district.as_deref(),
        a.city.as_deref(),
        a.state.as_deref(),
        a.postal_code.as_deref(),
        a.country_name.as_deref(),
    ]);
    Ok(composed.or(a.label).or(title))
}
