use super::style::escape_html;
use super::{MapSurface, MarkerIcon, RenderError};
use crate::config::MapSettings;
use crate::domain::{WaterPoint, WaterRoute};
use crate::geometry::LatLngBounds;

/// What was drawn for a route
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub markers: usize,
    pub polyline_vertices: usize,
    /// Padded bounds the view was fitted to, if the route had any points
    pub bounds: Option<LatLngBounds>,
}

/// Popup body for the point at zero-based `index` on the route
pub fn popup_html(index: usize, point: &WaterPoint) -> String {
    format!("<strong>{}. {}</strong>", index + 1, escape_html(point.name()))
}

/// Draw a route onto a map surface.
///
/// # Order of operations
/// 1. Create the map centred on `settings.center`
/// 2. Add the tile layer
/// 3. Draw the route as one polyline, in route order
/// 4. Add a numbered marker with a popup for each point
/// 5. Fit the view to the route's bounds, padded by `settings.padding`
///
/// An empty route still gets a map and tiles; it has no bounds to fit.
pub fn render_route<S: MapSurface>(
    surface: &mut S,
    route: &WaterRoute,
    settings: &MapSettings,
) -> Result<RenderSummary, RenderError> {
    surface.create_map(&settings.container_id, settings.center, settings.zoom)?;
    surface.add_tile_layer(&settings.tiles.url_template, &settings.tiles.options())?;

    let positions = route.positions();
    surface.draw_polyline(&positions, &settings.route_style)?;

    for (index, point) in route.iter().enumerate() {
        let marker = surface.add_marker(point.position(), &MarkerIcon::numbered(index + 1))?;
        surface.bind_popup(marker, &popup_html(index, point))?;
    }

    let bounds = LatLngBounds::from_positions(&positions).map(|b| b.pad(settings.padding));
    if let Some(ref padded) = bounds {
        surface.fit_bounds(padded)?;
    }

    Ok(RenderSummary {
        markers: route.len(),
        polyline_vertices: positions.len(),
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LayerId, LeafletPage, PolylineStyle, TileLayerOptions};

    /// Surface that logs every call it receives
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
        layers: usize,
    }

    impl RecordingSurface {
        fn next_layer(&mut self) -> LayerId {
            self.layers += 1;
            LayerId(self.layers - 1)
        }
    }

    impl MapSurface for RecordingSurface {
        fn create_map(
            &mut self,
            container_id: &str,
            center: (f64, f64),
            zoom: u8,
        ) -> Result<(), RenderError> {
            self.calls
                .push(format!("map {} {:?} {}", container_id, center, zoom));
            Ok(())
        }

        fn add_tile_layer(
            &mut self,
            url_template: &str,
            options: &TileLayerOptions,
        ) -> Result<LayerId, RenderError> {
            self.calls
                .push(format!("tiles {} {}", url_template, options.max_zoom));
            Ok(self.next_layer())
        }

        fn draw_polyline(
            &mut self,
            coords: &[(f64, f64)],
            style: &PolylineStyle,
        ) -> Result<LayerId, RenderError> {
            self.calls
                .push(format!("polyline {:?} {}", coords, style.color));
            Ok(self.next_layer())
        }

        fn add_marker(
            &mut self,
            position: (f64, f64),
            icon: &MarkerIcon,
        ) -> Result<LayerId, RenderError> {
            self.calls.push(format!("marker {:?} {}", position, icon.html));
            Ok(self.next_layer())
        }

        fn bind_popup(&mut self, layer: LayerId, content: &str) -> Result<(), RenderError> {
            self.calls.push(format!("popup {} {}", layer.0, content));
            Ok(())
        }

        fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<(), RenderError> {
            self.calls.push(format!("fit {:?}", bounds.corners()));
            Ok(())
        }
    }

    fn sample_route() -> WaterRoute {
        WaterRoute::new(&[
            WaterPoint::new("A", 4.0, -74.0),
            WaterPoint::new("B", 5.0, -74.1),
            WaterPoint::new("C", 4.5, -74.2),
        ])
    }

    #[test]
    fn test_command_order() {
        let mut surface = RecordingSurface::default();
        let summary =
            render_route(&mut surface, &sample_route(), &MapSettings::default()).unwrap();

        assert_eq!(
            surface.calls,
            vec![
                "map map (4.65, -74.1) 11".to_string(),
                "tiles https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png 19".to_string(),
                "polyline [(5.0, -74.1), (4.5, -74.2), (4.0, -74.0)] #2563eb".to_string(),
                r#"marker (5.0, -74.1) <div class="custom-label">1</div>"#.to_string(),
                "popup 2 <strong>1. B</strong>".to_string(),
                r#"marker (4.5, -74.2) <div class="custom-label">2</div>"#.to_string(),
                "popup 3 <strong>2. C</strong>".to_string(),
                r#"marker (4.0, -74.0) <div class="custom-label">3</div>"#.to_string(),
                "popup 4 <strong>3. A</strong>".to_string(),
                format!("fit {:?}", summary.bounds.unwrap().corners()),
            ]
        );
        assert_eq!(summary.markers, 3);
        assert_eq!(summary.polyline_vertices, 3);
    }

    #[test]
    fn test_bounds_are_padded() {
        let mut surface = RecordingSurface::default();
        let settings = MapSettings {
            padding: 1.0,
            ..MapSettings::default()
        };
        let summary = render_route(&mut surface, &sample_route(), &settings).unwrap();
        let bounds = summary.bounds.unwrap();

        assert!((bounds.south - 3.0).abs() < 1e-9);
        assert!((bounds.north - 6.0).abs() < 1e-9);
        assert!((bounds.west - -74.4).abs() < 1e-9);
        assert!((bounds.east - -73.8).abs() < 1e-9);
    }

    #[test]
    fn test_empty_route_skips_fit() {
        let mut surface = RecordingSurface::default();
        let summary =
            render_route(&mut surface, &WaterRoute::new(&[]), &MapSettings::default()).unwrap();

        assert_eq!(summary.markers, 0);
        assert!(summary.bounds.is_none());
        assert_eq!(surface.calls.len(), 3);
        assert!(surface.calls.iter().all(|c| !c.starts_with("fit")));
    }

    #[test]
    fn test_popup_escapes_name() {
        let point = WaterPoint::new("Lago <Azul> & Co", 0.0, 0.0);
        assert_eq!(
            popup_html(4, &point),
            "<strong>5. Lago &lt;Azul&gt; &amp; Co</strong>"
        );
    }

    #[test]
    fn test_invalid_container_propagates() {
        let mut page = LeafletPage::new();
        let settings = MapSettings {
            container_id: String::new(),
            ..MapSettings::default()
        };
        let result = render_route(&mut page, &sample_route(), &settings);
        assert!(matches!(result, Err(RenderError::InvalidContainer(_))));
    }

    #[test]
    fn test_leaflet_page_end_to_end() {
        let mut page = LeafletPage::new();
        render_route(&mut page, &sample_route(), &MapSettings::default()).unwrap();
        let script = page.script();

        let first = script.find("1. B").unwrap();
        let second = script.find("2. C").unwrap();
        let third = script.find("3. A").unwrap();
        assert!(first < second && second < third);
        assert!(script.ends_with(");"));
        assert!(script.lines().last().unwrap().starts_with("map.fitBounds("));
    }
}
