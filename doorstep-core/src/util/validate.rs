use crate::entities::*;
use itertools::Itertools;
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

/// A slot could not be saved because required fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields: {}", .0.iter().join(", "))]
pub struct ValidationError(pub Vec<AddressField>);

impl ValidationError {
    pub fn missing_fields(&self) -> &[AddressField] {
        &self.0
    }
}

impl Validate for AddressSlot {
    type Error = ValidationError;
    fn validate(&self) -> Result<(), Self::Error> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(missing))
        }
    }
}

impl AutoCorrect for StructuredAddress {
    fn auto_correct(mut self) -> Self {
        self.address_line = self.address_line.trim().to_owned();
        self.city = self.city.trim().to_owned();
        self.state = self.state.trim().to_owned();
        self.postal_code = self.postal_code.trim().to_owned();
        self.landmark = self
            .landmark
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty());
        self
    }
}

impl AutoCorrect for AddressSlot {
    fn auto_correct(mut self) -> Self {
        self.formatted_address = self.formatted_address.trim().to_owned();
        self.structured = self
            .structured
            .map(AutoCorrect::auto_correct)
            .filter(|s| !s.is_empty());
        self
    }
}
