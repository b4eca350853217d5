use async_trait::async_trait;
use doorstep_boundary as json;
use doorstep_core::{
    entities::*,
    repositories::{AddressRepository, PersistenceError},
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type Result<T> = std::result::Result<T, PersistenceError>;

/// Client of the remote address API.
pub struct HttpAddressRepository {
    client: Client,
    base_url: String,
}

impl HttpAddressRepository {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn addresses_url(&self) -> String {
        format!("{}/addresses", self.base_url)
    }

    async fn send<T>(&self, credential: &BearerToken, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .bearer_auth(credential.as_str())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(network_failure)?;
        into_json(response).await
    }
}

async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(network_failure)
    } else {
        let err = response.json::<json::Error>().await.ok();
        Err(status_error(status, err))
    }
}

fn status_error(status: StatusCode, err: Option<json::Error>) -> PersistenceError {
    if status == StatusCode::UNAUTHORIZED {
        return PersistenceError::Unauthenticated;
    }
    let msg = match err {
        Some(json::Error { message, .. }) if !message.is_empty() => format!("{status}: {message}"),
        _ => status.to_string(),
    };
    PersistenceError::NetworkFailure(msg)
}

fn network_failure(err: reqwest::Error) -> PersistenceError {
    PersistenceError::NetworkFailure(err.without_url().to_string())
}

fn from_json_slots(slots: Vec<json::AddressSlot>) -> Vec<AddressSlot> {
    slots
        .into_iter()
        .filter_map(|slot| {
            AddressSlot::try_from(slot)
                .inspect_err(|err| log::warn!("Skipping invalid address from the API: {err}"))
                .ok()
        })
        .collect()
}

#[async_trait]
impl AddressRepository for HttpAddressRepository {
    async fn list(&self, credential: &BearerToken) -> Result<Vec<AddressSlot>> {
        let request = self.client.get(self.addresses_url());
        let slots: Vec<json::AddressSlot> = self.send(credential, request).await?;
        log::debug!("Received {} address(es) from the API", slots.len());
        Ok(from_json_slots(slots))
    }

    async fn create(&self, credential: &BearerToken, slot: &AddressSlot) -> Result<AddressSlot> {
        debug_assert!(slot.slot_type.is_named());
        let body = json::AddressSlot::from(slot.clone());
        let request = self.client.post(self.addresses_url()).json(&body);
        let created: json::AddressSlot = self.send(credential, request).await?;
        AddressSlot::try_from(created).map_err(|err| {
            PersistenceError::NetworkFailure(format!("Invalid response from the API: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_unauthorized_status() {
        assert_eq!(
            PersistenceError::Unauthenticated,
            status_error(StatusCode::UNAUTHORIZED, None)
        );
    }

    #[test]
    fn map_other_status_codes_to_network_failures() {
        let err = json::Error {
            http_status: 503,
            message: "Maintenance".into(),
        };
        assert_eq!(
            PersistenceError::NetworkFailure("503 Service Unavailable: Maintenance".into()),
            status_error(StatusCode::SERVICE_UNAVAILABLE, Some(err))
        );
        assert_eq!(
            PersistenceError::NetworkFailure("403 Forbidden".into()),
            status_error(StatusCode::FORBIDDEN, None)
        );
    }

    #[test]
    fn skip_invalid_slots() {
        let valid = json::AddressSlot {
            slot_type: json::SlotType::Home,
            formatted_address: "1 Rajaji Salai, Chennai, Tamil Nadu - 600001".into(),
            address_line: Some("1 Rajaji Salai".into()),
            city: Some("Chennai".into()),
            state: Some("Tamil Nadu".into()),
            postal_code: Some("600001".into()),
            landmark: None,
            latitude: None,
            longitude: None,
        };
        let half_a_coordinate = json::AddressSlot {
            slot_type: json::SlotType::Work,
            latitude: Some(13.08),
            ..valid.clone()
        };
        let slots = from_json_slots(vec![valid, half_a_coordinate]);
        assert_eq!(1, slots.len());
        assert_eq!(SlotType::Home, slots[0].slot_type);
    }

    #[test]
    fn trim_trailing_slash_of_base_url() {
        let repo = HttpAddressRepository::new(Client::new(), "https://api.example.com/v1/");
        assert_eq!("https://api.example.com/v1/addresses", repo.addresses_url());
    }
}
