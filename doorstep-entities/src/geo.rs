use std::fmt;
use thiserror::Error;

pub type Degrees = f64;

const LAT_DEG_MAX: Degrees = 90.0;
const LNG_DEG_MAX: Degrees = 180.0;

/// A WGS 84 position reported by a location sensor.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude  : Degrees,
    pub longitude : Degrees,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid coordinate ({latitude}, {longitude})")]
pub struct InvalidCoordinate {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl Coordinate {
    pub fn try_new(latitude: Degrees, longitude: Degrees) -> Result<Self, InvalidCoordinate> {
        let coord = Self {
            latitude,
            longitude,
        };
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= LAT_DEG_MAX
            && self.longitude.abs() <= LNG_DEG_MAX
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        assert!(Coordinate::try_new(28.6139, 77.209).is_ok());
        assert!(Coordinate::try_new(-90.0, 180.0).is_ok());
        assert!(Coordinate::try_new(0.0, 0.0).is_ok());
    }

    #[test]
    fn invalid_coordinates() {
        assert!(Coordinate::try_new(90.1, 0.0).is_err());
        assert!(Coordinate::try_new(0.0, -180.5).is_err());
        assert!(Coordinate::try_new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn display_as_query_pair() {
        let c = Coordinate::try_new(19.07609, 72.877426).unwrap();
        assert_eq!("19.076090,72.877426", c.to_string());
    }
}
