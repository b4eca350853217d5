use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

use crate::{address::*, geo::*};

/// The named address records tracked per user.
///
/// The declaration order is the fallback order used when
/// an active selection has to be chosen on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumCount, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SlotType {
    Home,
    Work,
    Other,
    Current,
}

impl SlotType {
    /// Named slots are account-scoped and require a complete
    /// structured address. `Current` is device-local.
    pub const fn is_named(self) -> bool {
        !matches!(self, Self::Current)
    }

    pub fn load_order() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn named() -> impl Iterator<Item = Self> {
        Self::iter().filter(|t| t.is_named())
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct AddressSlot {
    pub slot_type         : SlotType,
    pub formatted_address : String,
    pub structured        : Option<StructuredAddress>,
    pub source_coordinate : Option<Coordinate>,
}

impl AddressSlot {
    /// Fields that prevent this slot from being considered valid.
    pub fn missing_fields(&self) -> Vec<AddressField> {
        let mut missing = if self.slot_type.is_named() {
            self.structured
                .as_ref()
                .map(StructuredAddress::missing_fields)
                .unwrap_or_else(|| {
                    vec![
                        AddressField::AddressLine,
                        AddressField::City,
                        AddressField::State,
                        AddressField::PostalCode,
                    ]
                })
        } else {
            vec![]
        };
        if self.formatted_address.trim().is_empty() {
            missing.push(AddressField::FormattedAddress);
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
