use std::time::Duration;

pub mod addresses;
pub mod geocoding;
pub mod location;
pub mod postal_codes;
pub mod store;

pub use reqwest::Client as HttpClient;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Upper bound for establishing a connection.
///
/// Callers enforce the timeout of the whole request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// A HTTP client that is shared by all gateways.
pub fn http_client() -> reqwest::Result<HttpClient> {
    HttpClient::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}
