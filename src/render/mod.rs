//! Drawing commands for the map collaborator and the surfaces that record them.

pub mod driver;
pub mod geojson;
pub mod leaflet;
pub mod style;

use thiserror::Error;

use crate::geometry::LatLngBounds;

pub use driver::{RenderSummary, popup_html, render_route};
pub use geojson::GeoJsonCollector;
pub use leaflet::LeafletPage;
pub use style::{MarkerIcon, PolylineStyle, TileLayerOptions};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid map container id: {0:?}")]
    InvalidContainer(String),
    #[error("map has not been created")]
    MapNotCreated,
    #[error("unknown layer: {0}")]
    UnknownLayer(usize),
    #[error("failed to serialize map data")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to a layer added to a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerId(pub usize);

/// Operations the rendering driver issues to a map library.
///
/// Positions are (lat, lng) pairs. Every operation other than `create_map`
/// fails with [`RenderError::MapNotCreated`] until a map exists.
pub trait MapSurface {
    fn create_map(
        &mut self,
        container_id: &str,
        center: (f64, f64),
        zoom: u8,
    ) -> Result<(), RenderError>;

    fn add_tile_layer(
        &mut self,
        url_template: &str,
        options: &TileLayerOptions,
    ) -> Result<LayerId, RenderError>;

    fn draw_polyline(
        &mut self,
        coords: &[(f64, f64)],
        style: &PolylineStyle,
    ) -> Result<LayerId, RenderError>;

    fn add_marker(&mut self, position: (f64, f64), icon: &MarkerIcon)
    -> Result<LayerId, RenderError>;

    fn bind_popup(&mut self, layer: LayerId, content: &str) -> Result<(), RenderError>;

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<(), RenderError>;
}

/// Container ids end up as HTML `id` attributes, which may not be empty or
/// contain whitespace.
pub fn validate_container_id(container_id: &str) -> Result<(), RenderError> {
    if container_id.is_empty() || container_id.chars().any(char::is_whitespace) {
        return Err(RenderError::InvalidContainer(container_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_container_id() {
        assert!(validate_container_id("map").is_ok());
        assert!(validate_container_id("water-map_1").is_ok());
        assert!(matches!(
            validate_container_id(""),
            Err(RenderError::InvalidContainer(_))
        ));
        assert!(matches!(
            validate_container_id("my map"),
            Err(RenderError::InvalidContainer(_))
        ));
    }
}
