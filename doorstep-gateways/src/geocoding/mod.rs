//! Reverse geocoding adapters for third-party HTTP services.

use doorstep_core::{
    entities::Coordinate,
    gateways::geocode::{GeocodeAttempt, ProviderError},
};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

mod bigdatacloud;
mod here;
mod nominatim;
mod opencage;

pub use self::{bigdatacloud::BigDataCloud, here::Here, nominatim::Nominatim, opencage::OpenCage};

/// Sends a request and returns the body of a successful response.
async fn fetch(request: RequestBuilder) -> Result<String, ProviderError> {
    let response = request.send().await.map_err(http_error)?;
    let status = response.status();
    let body = response.text().await.map_err(http_error)?;
    if !status.is_success() {
        log::debug!("Unexpected response ({status}): {body}");
        return Err(ProviderError::Http(status.to_string()));
    }
    Ok(body)
}

fn http_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Http(err.without_url().to_string())
}

fn parse<T>(body: &str) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|err| ProviderError::MalformedPayload(err.to_string()))
}

async fn attempt<F>(
    provider_id: &str,
    request: RequestBuilder,
    translate: F,
) -> Result<GeocodeAttempt, ProviderError>
where
    F: FnOnce(&str) -> Result<Option<String>, ProviderError>,
{
    let raw_payload = fetch(request).await?;
    let formatted_address = translate(&raw_payload)?;
    Ok(GeocodeAttempt {
        provider_id: provider_id.to_owned(),
        formatted_address,
        raw_payload,
    })
}

fn lat_lng(coord: Coordinate) -> (String, String) {
    (coord.latitude.to_string(), coord.longitude.to_string())
}

/// Glues a house number to its street.
fn street_line(house_number: Option<&str>, street: Option<&str>) -> Option<String> {
    let house_number = house_number.map(str::trim).filter(|s| !s.is_empty());
    let street = street.map(str::trim).filter(|s| !s.is_empty());
    match (house_number, street) {
        (Some(nr), Some(street)) => Some(format!("{nr} {street}")),
        (None, Some(street)) => Some(street.to_owned()),
        (Some(nr), None) => Some(nr.to_owned()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_house_number_and_street() {
        assert_eq!(
            Some("12 MG Road".to_owned()),
            street_line(Some("12"), Some(" MG Road"))
        );
        assert_eq!(Some("Janpath".to_owned()), street_line(Some(" "), Some("Janpath")));
        assert_eq!(None, street_line(None, Some("")));
    }

    #[test]
    fn reject_malformed_json() {
        let res: Result<serde_json::Value, _> = parse("<html>");
        assert!(matches!(res, Err(ProviderError::MalformedPayload(_))));
    }
}
