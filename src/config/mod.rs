use anyhow::{anyhow, bail, Result};
use doorstep_entities::geo::Coordinate;
use std::{
    collections::HashSet,
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "doorstep.toml";

const ENV_NAME_ADDRESS_API_URL: &str = "DOORSTEP_ADDRESS_API_URL";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";
const ENV_NAME_HERE_API_KEY: &str = "HERE_API_KEY";

pub struct Config {
    pub location: Location,
    pub geocoding: Geocoding,
    pub addresses: Addresses,
    pub store: Store,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!("{} not found => load default configuration.", file_path.display());
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        apply_env_overrides(&mut raw_config, |name| env::var(name).ok());
        Self::try_from(raw_config)
    }
}

fn apply_env_overrides<F>(cfg: &mut raw::Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    let gateway = cfg.gateway.get_or_insert_with(Default::default);
    if let Some(api_key) = var(ENV_NAME_OPENCAGE_API_KEY) {
        gateway.opencage.get_or_insert_with(Default::default).api_key = Some(api_key);
    }
    if let Some(api_key) = var(ENV_NAME_HERE_API_KEY) {
        gateway.here.get_or_insert_with(Default::default).api_key = Some(api_key);
    }
    if let Some(url) = var(ENV_NAME_ADDRESS_API_URL) {
        cfg.addresses.get_or_insert_with(Default::default).api_base_url = Some(url);
    }
}

pub struct Location {
    pub timeout: Duration,
    pub high_accuracy: bool,
    /// Reported instead of asking a positioning device.
    pub fixed_position: Option<Coordinate>,
    pub fix_delay: Option<Duration>,
}

pub struct Geocoding {
    pub default_timeout: Duration,
    /// Ordered by preference
    pub providers: Vec<GeocodingProvider>,
}

pub struct GeocodingProvider {
    pub gateway: GeocodingGateway,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodingGateway {
    OpenCage {
        api_key: String,
        api_base_url: Option<String>,
    },
    Here {
        api_key: String,
        api_base_url: Option<String>,
    },
    BigDataCloud {
        api_base_url: Option<String>,
    },
    Nominatim {
        api_base_url: Option<String>,
    },
}

pub enum Addresses {
    Api { base_url: String },
    /// For local testing purposes
    InMemory,
}

pub struct Store {
    /// File system directory for data that survives a restart.
    pub device_dir: PathBuf,
}

const fn gateway_name(gw: raw::GeocodingGateway) -> &'static str {
    match gw {
        raw::GeocodingGateway::Opencage => "opencage",
        raw::GeocodingGateway::Here => "here",
        raw::GeocodingGateway::Bigdatacloud => "bigdatacloud",
        raw::GeocodingGateway::Nominatim => "nominatim",
    }
}

fn try_geocoding_provider(
    gw_name: raw::GeocodingGateway,
    gateway: &raw::Gateway,
) -> Option<GeocodingProvider> {
    let name = gateway_name(gw_name);
    let raw::Provider {
        api_key,
        api_base_url,
        timeout,
    } = match gw_name {
        raw::GeocodingGateway::Opencage => gateway.opencage.clone(),
        raw::GeocodingGateway::Here => gateway.here.clone(),
        raw::GeocodingGateway::Bigdatacloud => gateway.bigdatacloud.clone(),
        raw::GeocodingGateway::Nominatim => gateway.nominatim.clone(),
    }
    .unwrap_or_default();
    let api_key = api_key.filter(|key| !key.trim().is_empty());
    let gateway = match gw_name {
        raw::GeocodingGateway::Opencage | raw::GeocodingGateway::Here => {
            let Some(api_key) = api_key else {
                log::warn!("Missing API key for geocoding provider '{name}' => skipped");
                return None;
            };
            if gw_name == raw::GeocodingGateway::Opencage {
                GeocodingGateway::OpenCage {
                    api_key,
                    api_base_url,
                }
            } else {
                GeocodingGateway::Here {
                    api_key,
                    api_base_url,
                }
            }
        }
        raw::GeocodingGateway::Bigdatacloud => GeocodingGateway::BigDataCloud { api_base_url },
        raw::GeocodingGateway::Nominatim => GeocodingGateway::Nominatim { api_base_url },
    };
    Some(GeocodingProvider { gateway, timeout })
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            location,
            geocoding,
            gateway,
            addresses,
            store,
        } = from;

        let raw::Location {
            timeout,
            high_accuracy,
            latitude,
            longitude,
            fix_delay,
        } = location.unwrap_or_default();
        let fixed_position = match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::try_new(lat, lng)?),
            (None, None) => None,
            _ => bail!("A fixed position requires both latitude and longitude"),
        };
        let location = Location {
            timeout: timeout.ok_or_else(|| anyhow!("Missing location timeout"))?,
            high_accuracy: high_accuracy.unwrap_or(true),
            fixed_position,
            fix_delay,
        };

        let raw::Geocoding {
            default_timeout,
            providers: provider_names,
        } = geocoding.unwrap_or_default();
        let default_timeout =
            default_timeout.ok_or_else(|| anyhow!("Missing default geocoding timeout"))?;
        let mut seen = HashSet::new();
        if let Some(dup) = provider_names.iter().find(|gw| !seen.insert(**gw)) {
            bail!("Geocoding provider '{}' is listed twice", gateway_name(*dup));
        }
        let gateway = gateway.unwrap_or_default();
        let providers: Vec<_> = provider_names
            .into_iter()
            .filter_map(|gw_name| try_geocoding_provider(gw_name, &gateway))
            .collect();
        if providers.is_empty() {
            log::warn!("No geocoding provider configured: positions cannot be resolved");
        }
        let geocoding = Geocoding {
            default_timeout,
            providers,
        };

        let raw::Addresses { api_base_url } = addresses.unwrap_or_default();
        let addresses = match api_base_url.filter(|url| !url.trim().is_empty()) {
            Some(base_url) => Addresses::Api { base_url },
            None => {
                log::info!("No address API configured => keep addresses in memory");
                Addresses::InMemory
            }
        };

        let raw::Store { device_dir } = store.unwrap_or_default();
        let store = Store { device_dir };

        Ok(Self {
            location,
            geocoding,
            addresses,
            store,
        })
    }
}
