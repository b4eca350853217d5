use super::{attempt, lat_lng, parse};
use async_trait::async_trait;
use doorstep_core::{
    entities::Coordinate,
    gateways::geocode::{GeocodeAttempt, GeocodeProviderAdapter, ProviderError},
    util::format::join_components,
};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Reverse geocoding with the free client-side API of bigdatacloud.net.
///
/// The answers only contain the locality, no street.
pub struct BigDataCloud {
    client: Client,
    base_url: String,
}

impl BigDataCloud {
    pub const ID: &'static str = "bigdatacloud";

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
impl GeocodeProviderAdapter for BigDataCloud {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<GeocodeAttempt, ProviderError> {
        let (lat, lng) = lat_lng(coord);
        let request = self.client.get(&self.base_url).query(&[
            ("latitude", lat.as_str()),
            ("longitude", lng.as_str()),
            ("localityLanguage", "en"),
        ]);
        attempt(Self::ID, request, translate).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    locality: Option<String>,
    city: Option<String>,
    principal_subdivision: Option<String>,
    postcode: Option<String>,
    country_name: Option<String>,
}

fn translate(body: &str) -> Result<Option<String>, ProviderError> {
    let r: Response = parse(body)?;
    // Only the country is known for positions off the coast
    if r.locality.is_none() && r.city.is_none() && r.principal_subdivision.is_none() {
        return Ok(None);
    }
    let locality = r.locality.as_deref().filter(|l| Some(*l) != r.city.as_deref());
    Ok(join_components([
        locality,
        r.city.as_deref(),
        r.principal_subdivision.as_deref(),
        r.postcode.as_deref(),
        r.country_name.as_deref(),
    ]))
}
