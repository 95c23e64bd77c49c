//! Great-circle distance on a spherical Earth.
//!
//! [`distance_km`] implements the Haversine formula over a sphere of
//! radius [`EARTH_RADIUS_KM`]. It ignores ellipsoidal flattening, which is
//! fine for ranking events at campus or city scale.
//!
//! [`SearchBand`] is a cheap pre-filter: an exact spherical bounding band
//! around an origin that contains every point within a given radius.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest possible great-circle distance (half the circumference).
pub const MAX_DISTANCE_KM: f64 = std::f64::consts::PI * EARTH_RADIUS_KM;

/// Haversine distance in kilometres between two points given in degrees.
///
/// Performs no validation: callers must reject out-of-range or
/// non-finite inputs beforehand. `NaN` inputs yield `NaN`.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    // Rounding can push `a` just past 1 for antipodal pairs.
    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Relative slack applied to the band so rounding never excludes a point
/// that the Haversine pass would keep.
const BAND_SLACK: f64 = 1e-9;

/// Bounding band around an origin containing the disc of a given radius.
///
/// The latitude bound is exact along a meridian. The longitude bound is
/// the maximal longitude offset reachable within the radius at the
/// origin's latitude; it is dropped when the disc touches a pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBand {
    origin_lat: f64,
    origin_lon: f64,
    lat_delta: f64,
    lon_delta: Option<f64>,
}

impl SearchBand {
    /// Builds the band around `(lat, lon)` for `radius_km`.
    #[must_use]
    pub fn new(lat: f64, lon: f64, radius_km: f64) -> Self {
        let angular = radius_km / EARTH_RADIUS_KM;
        let lat_delta = angular.to_degrees() * (1.0 + BAND_SLACK) + BAND_SLACK;

        let reaches_pole = lat + lat_delta >= 90.0 || lat - lat_delta <= -90.0;
        let lon_delta = if reaches_pole || angular >= std::f64::consts::FRAC_PI_2 {
            None
        } else {
            let ratio = angular.sin() / lat.to_radians().cos();
            if ratio >= 1.0 {
                None
            } else {
                Some(ratio.asin().to_degrees() * (1.0 + BAND_SLACK) + BAND_SLACK)
            }
        };

        Self {
            origin_lat: lat,
            origin_lon: lon,
            lat_delta,
            lon_delta,
        }
    }

    /// Returns `true` if `(lat, lon)` may lie within the radius.
    ///
    /// A `false` answer is definitive; a `true` answer still needs the
    /// exact distance check.
    #[must_use]
    pub fn may_contain(&self, lat: f64, lon: f64) -> bool {
        if (lat - self.origin_lat).abs() > self.lat_delta {
            return false;
        }
        match self.lon_delta {
            None => true,
            Some(limit) => {
                let raw = (lon - self.origin_lon).abs() % 360.0;
                let shortest = if raw > 180.0 { 360.0 - raw } else { raw };
                shortest <= limit
            }
        }
    }
}
