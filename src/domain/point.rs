use std::fmt;

/// A named location on a river, lagoon or wetland.
///
/// Coordinates are WGS84 degrees and are stored exactly as given: nothing is
/// validated, so an empty name or an out-of-range latitude is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterPoint {
    name: String,
    lat: f64,
    lng: f64,
}

impl WaterPoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            lat: latitude,
            lng: longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position as a (lat, lng) pair
    pub fn position(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for WaterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.name, self.lat, self.lng)
    }
}
