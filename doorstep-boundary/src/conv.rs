use super::*;
use doorstep_entities as e;
use thiserror::Error;

impl From<e::slot::SlotType> for SlotType {
    fn from(from: e::slot::SlotType) -> Self {
        use e::slot::SlotType as E;
        match from {
            E::Home => Self::Home,
            E::Work => Self::Work,
            E::Other => Self::Other,
            E::Current => Self::Current,
        }
    }
}

impl From<SlotType> for e::slot::SlotType {
    fn from(from: SlotType) -> Self {
        use SlotType as B;
        match from {
            B::Home => Self::Home,
            B::Work => Self::Work,
            B::Other => Self::Other,
            B::Current => Self::Current,
        }
    }
}

impl From<e::slot::AddressSlot> for AddressSlot {
    fn from(from: e::slot::AddressSlot) -> Self {
        let e::slot::AddressSlot {
            slot_type,
            formatted_address,
            structured,
            source_coordinate,
        } = from;
        let (address_line, city, state, postal_code, landmark) = match structured {
            Some(s) => (
                Some(s.address_line),
                Some(s.city),
                Some(s.state),
                Some(s.postal_code),
                s.landmark,
            ),
            None => (None, None, None, None, None),
        };
        Self {
            slot_type: slot_type.into(),
            formatted_address,
            address_line,
            city,
            state,
            postal_code,
            landmark,
            latitude: source_coordinate.map(|c| c.latitude),
            longitude: source_coordinate.map(|c| c.longitude),
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidAddressSlot {
    #[error(transparent)]
    Coordinate(#[from] e::geo::InvalidCoordinate),
    #[error("Incomplete coordinate")]
    IncompleteCoordinate,
}

impl TryFrom<AddressSlot> for e::slot::AddressSlot {
    type Error = InvalidAddressSlot;
    fn try_from(from: AddressSlot) -> Result<Self, Self::Error> {
        let AddressSlot {
            slot_type,
            formatted_address,
            address_line,
            city,
            state,
            postal_code,
            landmark,
            latitude,
            longitude,
        } = from;
        let source_coordinate = match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(e::geo::Coordinate::try_new(lat, lng)?),
            (None, None) => None,
            _ => return Err(InvalidAddressSlot::IncompleteCoordinate),
        };
        let structured = if address_line.is_none()
            && city.is_none()
            && state.is_none()
            && postal_code.is_none()
        {
            None
        } else {
            Some(e::address::StructuredAddress {
                address_line: address_line.unwrap_or_default(),
                city: city.unwrap_or_default(),
                state: state.unwrap_or_default(),
                postal_code: postal_code.unwrap_or_default(),
                landmark,
            })
        };
        Ok(Self {
            slot_type: slot_type.into(),
            formatted_address,
            structured,
            source_coordinate,
        })
    }
}

impl From<Option<e::slot::SlotType>> for ActiveSelection {
    fn from(from: Option<e::slot::SlotType>) -> Self {
        Self {
            slot_type: from.map(Into::into),
        }
    }
}

impl From<ActiveSelection> for Option<e::slot::SlotType> {
    fn from(from: ActiveSelection) -> Self {
        from.slot_type.map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_named_slot_from_api() {
        let json = r#"{
            "slotType": "work",
            "formattedAddress": "12 MG Road, Bengaluru, Karnataka - 560001",
            "addressLine": "12 MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "postalCode": "560001"
        }"#;
        let dto: AddressSlot = serde_json::from_str(json).unwrap();
        let slot = e::slot::AddressSlot::try_from(dto).unwrap();
        assert_eq!(e::slot::SlotType::Work, slot.slot_type);
        assert_eq!("Bengaluru", slot.structured.as_ref().unwrap().city);
        assert!(slot.structured.unwrap().landmark.is_none());
        assert!(slot.source_coordinate.is_none());
    }

    #[test]
    fn serialize_current_slot_without_structured_fields() {
        let slot = e::slot::AddressSlot {
            slot_type: e::slot::SlotType::Current,
            formatted_address: "Colaba, Mumbai".into(),
            structured: None,
            source_coordinate: e::geo::Coordinate::try_new(18.9067, 72.8147).ok(),
        };
        let json = serde_json::to_value(AddressSlot::from(slot)).unwrap();
        assert_eq!("current", json["slotType"]);
        assert_eq!(18.9067, json["latitude"]);
        assert!(json.get("addressLine").is_none());
    }

    #[test]
    fn reject_half_a_coordinate() {
        let dto = AddressSlot {
            slot_type: SlotType::Current,
            formatted_address: "x".into(),
            address_line: None,
            city: None,
            state: None,
            postal_code: None,
            landmark: None,
            latitude: Some(1.0),
            longitude: None,
        };
        assert!(matches!(
            e::slot::AddressSlot::try_from(dto),
            Err(InvalidAddressSlot::IncompleteCoordinate)
        ));
    }
}
