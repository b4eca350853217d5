pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::slot_builder::*;

pub mod slot_builder {

    use super::*;
    use crate::{address::*, geo::*, slot::*};

    #[derive(Debug)]
    pub struct AddressSlotBuild {
        slot: AddressSlot,
    }

    impl AddressSlotBuild {
        pub fn slot_type(mut self, slot_type: SlotType) -> Self {
            self.slot.slot_type = slot_type;
            self
        }
        pub fn formatted_address(mut self, formatted: &str) -> Self {
            self.slot.formatted_address = formatted.into();
            self
        }
        pub fn address(
            mut self,
            address_line: &str,
            city: &str,
            state: &str,
            postal_code: &str,
        ) -> Self {
            self.slot.structured = Some(StructuredAddress {
                address_line: address_line.into(),
                city: city.into(),
                state: state.into(),
                postal_code: postal_code.into(),
                landmark: None,
            });
            self
        }
        pub fn landmark(mut self, landmark: &str) -> Self {
            if let Some(ref mut s) = self.slot.structured {
                s.landmark = Some(landmark.into());
            }
            self
        }
        pub fn coordinate(mut self, lat: f64, lng: f64) -> Self {
            self.slot.source_coordinate = Some(Coordinate::try_new(lat, lng).unwrap());
            self
        }
        pub fn finish(self) -> AddressSlot {
            self.slot
        }
    }

    impl Builder for AddressSlot {
        type Build = AddressSlotBuild;
        fn build() -> Self::Build {
            AddressSlotBuild {
                slot: AddressSlot {
                    slot_type: SlotType::Home,
                    formatted_address: "".into(),
                    structured: None,
                    source_coordinate: None,
                },
            }
        }
    }
}
