use duration_str::deserialize_option_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("doorstep.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub location: Option<Location>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub addresses: Option<Addresses>,
    pub store: Option<Store>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Location {
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
    pub high_accuracy: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub fix_delay: Option<Duration>,
}

impl Default for Location {
    fn default() -> Self {
        Config::default().location.expect("Location configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub default_timeout: Option<Duration>,
    #[serde(default)]
    pub providers: Vec<GeocodingGateway>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Opencage,
    Here,
    Bigdatacloud,
    Nominatim,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub opencage: Option<Provider>,
    pub here: Option<Provider>,
    pub bigdatacloud: Option<Provider>,
    pub nominatim: Option<Provider>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Provider {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Addresses {
    pub api_base_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Store {
    pub device_dir: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Config::default().store.expect("Store configuration")
    }
}
