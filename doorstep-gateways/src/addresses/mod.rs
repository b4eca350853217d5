mod http;
mod memory;

pub use self::{http::HttpAddressRepository, memory::InMemoryAddressRepository};
