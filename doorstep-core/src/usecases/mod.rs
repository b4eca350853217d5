mod acquire_coordinate;
mod autofill;
mod error;
mod manage_addresses;
mod resolve_address;

#[cfg(test)]
pub mod tests;

pub use self::{
    acquire_coordinate::*, autofill::*, error::Error, manage_addresses::*, resolve_address::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*, store::*};
}
