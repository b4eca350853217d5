use strum::{Display, EnumIter};

/// The structured fields of a manually entered address.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredAddress {
    pub address_line : String,
    pub city         : String,
    pub state        : String,
    pub postal_code  : String,
    pub landmark     : Option<String>,
}

/// Fields that can be reported as missing when an address slot is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum AddressField {
    AddressLine,
    City,
    State,
    PostalCode,
    FormattedAddress,
}

impl StructuredAddress {
    /// Required fields that are empty or contain only whitespace,
    /// in display order.
    pub fn missing_fields(&self) -> Vec<AddressField> {
        let required = [
            (AddressField::AddressLine, &self.address_line),
            (AddressField::City, &self.city),
            (AddressField::State, &self.state),
            (AddressField::PostalCode, &self.postal_code),
        ];
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == 4
            && self.landmark.as_deref().map_or(true, |l| l.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_in_display_order() {
        let addr = StructuredAddress {
            address_line: " ".into(),
            city: "Pune".into(),
            state: "".into(),
            postal_code: "411001".into(),
            landmark: None,
        };
        assert_eq!(
            vec![AddressField::AddressLine, AddressField::State],
            addr.missing_fields()
        );
        assert!(!addr.is_complete());
    }

    #[test]
    fn field_names() {
        assert_eq!("addressLine", AddressField::AddressLine.to_string());
        assert_eq!("postalCode", AddressField::PostalCode.to_string());
        assert_eq!("formattedAddress", AddressField::FormattedAddress.to_string());
    }

    #[test]
    fn empty_address() {
        assert!(StructuredAddress::default().is_empty());
        let addr = StructuredAddress {
            landmark: Some("Clock tower".into()),
            ..Default::default()
        };
        assert!(!addr.is_empty());
    }
}
