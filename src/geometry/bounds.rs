use geo::{BoundingRect, MultiPoint, Point};

/// Geographic bounding box in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Smallest box containing every (lat, lng) position.
    ///
    /// Returns `None` for an empty slice, since an empty box cannot be fitted.
    pub fn from_positions(positions: &[(f64, f64)]) -> Option<Self> {
        let points: MultiPoint<f64> = positions
            .iter()
            .map(|&(lat, lng)| Point::new(lng, lat))
            .collect();

        let rect = points.bounding_rect()?;

        Some(Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        })
    }

    /// Grow the box on every side by `ratio` of its own height and width.
    ///
    /// Mirrors Leaflet's `LatLngBounds.pad`: a ratio of 0.5 doubles both
    /// spans around the same centre. Negative ratios shrink the box.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lng_buffer = (self.east - self.west).abs() * ratio;

        Self {
            south: self.south - lat_buffer,
            west: self.west - lng_buffer,
            north: self.north + lat_buffer,
            east: self.east + lng_buffer,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Corners as `[[south, west], [north, east]]`, the array form Leaflet accepts
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }

    /// GeoJSON bbox order: `[west, south, east, north]`
    pub fn to_bbox(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}
