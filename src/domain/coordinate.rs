//! Validated latitude/longitude pair.

use serde::Serialize;
use utoipa::ToSchema;

use super::geo;
use crate::error::HubError;

/// A point on the Earth's surface in decimal degrees.
///
/// Both components are finite, latitude lies in `[-90, 90]` and longitude
/// in `[-180, 180]`. The only way to obtain a `Coordinate` is through
/// [`Coordinate::new`], so out-of-range values never reach the distance
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validates and builds a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidArgument`] if either component is not
    /// finite or falls outside its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, HubError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(HubError::InvalidArgument(format!(
                "latitude must be a number between -90 and 90, got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(HubError::InvalidArgument(format!(
                "longitude must be a number between -180 and 180, got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        geo::distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let Err(err) = Coordinate::new(95.0, 0.0) else {
            panic!("latitude 95 must be rejected");
        };
        assert!(matches!(err, HubError::InvalidArgument(_)));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let Err(err) = Coordinate::new(0.0, -180.5) else {
            panic!("longitude -180.5 must be rejected");
        };
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn distance_delegates_to_haversine() {
        let (Ok(paris), Ok(london)) = (
            Coordinate::new(48.8566, 2.3522),
            Coordinate::new(51.5074, -0.1278),
        ) else {
            panic!("valid coordinates");
        };
        assert!((paris.distance_km(&london) - 343.5).abs() < 1.0);
    }
}
