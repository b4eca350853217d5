use crate::config::{self, Addresses, GeocodingGateway};
use anyhow::Result;
use doorstep_core::{
    entities::*,
    gateways::{
        geocode::GeocodeProviderAdapter,
        location::{LocationSensor, PositionOptions},
    },
    repositories::AddressRepository,
    usecases::{AddressBookManager, AddressBookPorts, CoordinateAcquirer, ReverseGeocodeResolver},
};
use doorstep_gateways::{
    addresses::{HttpAddressRepository, InMemoryAddressRepository},
    geocoding::{BigDataCloud, Here, Nominatim, OpenCage},
    http_client,
    location::StaticSensor,
    store::{JsonFileStore, MemoryStore},
    HttpClient,
};
use std::sync::Arc;

pub fn address_book_manager(
    cfg: &config::Config,
    session: Session,
    position: Option<Coordinate>,
) -> Result<AddressBookManager> {
    let client = http_client()?;
    let device_store = JsonFileStore::try_new(&cfg.store.device_dir)?;
    log::debug!("Device store: {}", device_store.path().display());
    let ports = AddressBookPorts {
        acquirer: coordinate_acquirer(&cfg.location, position),
        resolver: geocode_resolver(&cfg.geocoding, &client),
        repository: address_repository(&cfg.addresses, &client),
        session_store: Arc::new(MemoryStore::new()),
        device_store: Arc::new(device_store),
    };
    Ok(AddressBookManager::new(ports, session))
}

fn coordinate_acquirer(cfg: &config::Location, position: Option<Coordinate>) -> CoordinateAcquirer {
    let options = PositionOptions {
        timeout: cfg.timeout,
        high_accuracy: cfg.high_accuracy,
    };
    let sensor = position.or(cfg.fixed_position).map(|coord| {
        log::info!("Use static position {coord}");
        let sensor = StaticSensor::fixed(coord);
        let sensor = match cfg.fix_delay {
            Some(delay) => sensor.with_delay(delay),
            None => sensor,
        };
        Arc::new(sensor) as Arc<dyn LocationSensor>
    });
    if sensor.is_none() {
        log::warn!("No position configured: location services are unavailable");
    }
    CoordinateAcquirer::new(sensor, options)
}

fn geocode_resolver(cfg: &config::Geocoding, client: &HttpClient) -> ReverseGeocodeResolver {
    let mut resolver = ReverseGeocodeResolver::new(cfg.default_timeout);
    for provider in &cfg.providers {
        resolver.push(geocoding_adapter(&provider.gateway, client), provider.timeout);
    }
    resolver
}

fn geocoding_adapter(gw: &GeocodingGateway, client: &HttpClient) -> Box<dyn GeocodeProviderAdapter> {
    let client = client.clone();
    match gw.clone() {
        GeocodingGateway::OpenCage {
            api_key,
            api_base_url,
        } => {
            let adapter = OpenCage::new(client, api_key);
            Box::new(match api_base_url {
                Some(url) => adapter.with_base_url(url),
                None => adapter,
            })
        }
        GeocodingGateway::Here {
            api_key,
            api_base_url,
        } => {
            let adapter = Here::new(client, api_key);
            Box::new(match api_base_url {
                Some(url) => adapter.with_base_url(url),
                None => adapter,
            })
        }
        GeocodingGateway::BigDataCloud { api_base_url } => {
            let adapter = BigDataCloud::new(client);
            Box::new(match api_base_url {
                Some(url) => adapter.with_base_url(url),
                None => adapter,
            })
        }
        GeocodingGateway::Nominatim { api_base_url } => {
            let adapter = Nominatim::new(client);
            Box::new(match api_base_url {
                Some(url) => adapter.with_base_url(url),
                None => adapter,
            })
        }
    }
}

fn address_repository(cfg: &Addresses, client: &HttpClient) -> Arc<dyn AddressRepository> {
    match cfg {
        Addresses::Api { base_url } => {
            log::info!("Use address API at {base_url}");
            Arc::new(HttpAddressRepository::new(client.clone(), base_url))
        }
        Addresses::InMemory => {
            log::warn!("Addresses are not stored in an account and will be lost on exit");
            Arc::new(InMemoryAddressRepository::new())
        }
    }
}
