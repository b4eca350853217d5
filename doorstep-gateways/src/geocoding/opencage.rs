use super::{attempt, lat_lng, parse, street_line};
use async_trait::async_trait;
use doorstep_core::{
    entities::Coordinate,
    gateways::geocode::{GeocodeAttempt, GeocodeProviderAdapter, ProviderError},
    util::format::join_components,
};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Reverse geocoding with opencagedata.com.
pub struct OpenCage {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenCage {
    pub const ID: &'static str = "opencage";

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
impl GeocodeProviderAdapter for OpenCage {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn reverse_geocode(&self, coord: Coordinate) -> Result<GeocodeAttempt, ProviderError> {
        let (lat, lng) = lat_lng(coord);
        let query = format!("{lat},{lng}");
        let request = self.client.get(&self.base_url).query(&[
            ("q", query.as_str()),
            ("key", self.api_key.as_str()),
            ("no_annotations", "1"),
            ("limit", "1"),
        ]);
        attempt(Self::ID, request, translate).await
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    results: Vec<ResponseResult>,
}

#[derive(Debug, Deserialize)]
struct ResponseResult {
    #[serde(default)]
    components: Components,
    formatted: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Components {
    house_number: Option<String>,
    road: Option<String>,
    neighbourhood: Option<String>,
    suburb: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

fn translate(body: &str) -> Result<Option<String>, ProviderError> {
    let Response { results } = parse(body)?;
    let Some(ResponseResult {
        components: c,
        formatted,
    }) = results.into_iter().next()
    else {
        return Ok(None);
    };
    let street = street_line(c.house_number.as_deref(), c.road.as_deref());
    let locality = c.city.or(c.town).or(c.village);
    let composed = join_components([
        street.as_deref(),
        c.suburb.as_deref().or(c.neighbourhood.as_deref()),
        locality.as_deref(),
        c.state.as_deref(),
        c.postcode.as_deref(),
        c.country.as_deref(),
    ]);
    Ok(composed.or(formatted))
}
