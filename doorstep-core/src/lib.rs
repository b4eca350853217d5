pub mod address_book;
pub mod gateways;
pub mod repositories;
pub mod store;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use doorstep_entities::{address::*, geo::*, session::*, slot::*};
}
