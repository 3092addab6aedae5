use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::style::{MARKER_SIZE, escape_html};
use super::{
    LayerId, MapSurface, MarkerIcon, PolylineStyle, RenderError, TileLayerOptions,
    validate_container_id,
};
use crate::geometry::LatLngBounds;

const LEAFLET_VERSION: &str = "1.9.4";

/// Class that sizes the map container; ids are not usable as CSS selectors
const CONTAINER_CLASS: &str = "watermap-container";

/// Records drawing commands as Leaflet JavaScript and renders them into a
/// standalone HTML page.
#[derive(Debug, Default)]
pub struct LeafletPage {
    container_id: Option<String>,
    script: Vec<String>,
    layer_count: usize,
}

impl LeafletPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded script, one statement per line
    pub fn script(&self) -> String {
        self.script.join("\n")
    }

    pub fn to_html(&self, title: &str) -> Result<String, RenderError> {
        let container_id = self
            .container_id
            .as_deref()
            .ok_or(RenderError::MapNotCreated)?;
        let title = escape_html(title);
        let container = escape_html(container_id);
        let badge = MARKER_SIZE;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>
html, body {{ height: 100%; margin: 0; }}
.{CONTAINER_CLASS} {{ height: 100%; }}
.custom-label {{
  width: {badge}px;
  height: {badge}px;
  line-height: {badge}px;
  box-sizing: border-box;
  border: 2px solid #fff;
  border-radius: 50%;
  background: #2563eb;
  color: #fff;
  font: bold 13px sans-serif;
  text-align: center;
  box-shadow: 0 0 4px rgba(0, 0, 0, 0.4);
}}
</style>
</head>
<body>
<div id="{container}" class="{CONTAINER_CLASS}"></div>
<script>
{script}
</script>
</body>
</html>
"#,
            script = self.script()
        ))
    }

    pub fn write_html(&self, path: &Path, title: &str) -> Result<()> {
        let html = self.to_html(title)?;
        let file = File::create(path)
            .with_context(|| format!("Failed to create HTML file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(html.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn ensure_map(&self) -> Result<(), RenderError> {
        if self.container_id.is_none() {
            return Err(RenderError::MapNotCreated);
        }
        Ok(())
    }

    fn push_layer(&mut self, constructor: String) -> LayerId {
        let id = LayerId(self.layer_count);
        self.layer_count += 1;
        self.script.push(format!(
            "const layer{} = {}.addTo(map);",
            id.0, constructor
        ));
        id
    }
}

/// Serialize a value as a JavaScript literal that is safe inside `<script>`
fn js<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn latlng((lat, lng): (f64, f64)) -> Result<String, RenderError> {
    js(&[lat, lng])
}

impl MapSurface for LeafletPage {
    fn create_map(
        &mut self,
        container_id: &str,
        center: (f64, f64),
        zoom: u8,
    ) -> Result<(), RenderError> {
        validate_container_id(container_id)?;
        self.script.push(format!(
            "const map = L.map({}).setView({}, {});",
            js(container_id)?,
            latlng(center)?,
            zoom
        ));
        self.container_id = Some(container_id.to_string());
        Ok(())
    }

    fn add_tile_layer(
        &mut self,
        url_template: &str,
        options: &TileLayerOptions,
    ) -> Result<LayerId, RenderError> {
        self.ensure_map()?;
        let constructor = format!("L.tileLayer({}, {})", js(url_template)?, js(options)?);
        Ok(self.push_layer(constructor))
    }

    fn draw_polyline(
        &mut self,
        coords: &[(f64, f64)],
        style: &PolylineStyle,
    ) -> Result<LayerId, RenderError> {
        self.ensure_map()?;
        let points: Vec<[f64; 2]> = coords.iter().map(|&(lat, lng)| [lat, lng]).collect();
        let constructor = format!("L.polyline({}, {})", js(&points)?, js(style)?);
        Ok(self.push_layer(constructor))
    }

    fn add_marker(
        &mut self,
        position: (f64, f64),
        icon: &MarkerIcon,
    ) -> Result<LayerId, RenderError> {
        self.ensure_map()?;
        let constructor = format!(
            "L.marker({}, {{ icon: L.divIcon({}) }})",
            latlng(position)?,
            js(icon)?
        );
        Ok(self.push_layer(constructor))
    }

    fn bind_popup(&mut self, layer: LayerId, content: &str) -> Result<(), RenderError> {
        self.ensure_map()?;
        if layer.0 >= self.layer_count {
            return Err(RenderError::UnknownLayer(layer.0));
        }
        self.script
            .push(format!("layer{}.bindPopup({});", layer.0, js(content)?));
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<(), RenderError> {
        self.ensure_map()?;
        self.script
            .push(format!("map.fitBounds({});", js(&bounds.corners())?));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn page_with_map() -> LeafletPage {
        let mut page = LeafletPage::new();
        page.create_map("map", (4.65, -74.1), 11).unwrap();
        page
    }

    #[test]
    fn test_create_map_statement() {
        let page = page_with_map();
        assert_eq!(
            page.script(),
            r#"const map = L.map("map").setView([4.65,-74.1], 11);"#
        );
    }

    #[test]
    fn test_requires_map() {
        let mut page = LeafletPage::new();
        let err = page
            .add_marker((4.65, -74.1), &MarkerIcon::numbered(1))
            .unwrap_err();
        assert!(matches!(err, RenderError::MapNotCreated));
        assert!(matches!(
            page.to_html("t"),
            Err(RenderError::MapNotCreated)
        ));
    }

    #[test]
    fn test_invalid_container() {
        let mut page = LeafletPage::new();
        assert!(matches!(
            page.create_map("", (0.0, 0.0), 3),
            Err(RenderError::InvalidContainer(_))
        ));
        assert!(page.script().is_empty());
    }

    #[test]
    fn test_layers_and_popup() {
        let mut page = page_with_map();
        let polyline = page
            .draw_polyline(&[(5.0, -74.1), (4.0, -74.0)], &PolylineStyle::default())
            .unwrap();
        let marker = page
            .add_marker((5.0, -74.1), &MarkerIcon::numbered(1))
            .unwrap();
        page.bind_popup(marker, "<strong>1. B</strong>").unwrap();

        assert_eq!(polyline, LayerId(0));
        assert_eq!(marker, LayerId(1));

        let script = page.script();
        assert!(script.contains(
            r##"const layer0 = L.polyline([[5.0,-74.1],[4.0,-74.0]], {"color":"#2563eb","weight":5.0,"opacity":0.75}).addTo(map);"##
        ));
        assert!(script.contains(r#"layer1.bindPopup("<strong>1. B<\/strong>");"#));
    }

    #[test]
    fn test_bind_popup_unknown_layer() {
        let mut page = page_with_map();
        assert!(matches!(
            page.bind_popup(LayerId(3), "x"),
            Err(RenderError::UnknownLayer(3))
        ));
    }

    #[test]
    fn test_script_close_tag_is_escaped() {
        let mut page = page_with_map();
        let marker = page
            .add_marker((0.0, 0.0), &MarkerIcon::numbered(1))
            .unwrap();
        page.bind_popup(marker, "</script><script>alert(1)").unwrap();
        assert!(!page.script().contains("</script>"));
    }

    #[test]
    fn test_fit_bounds() {
        let mut page = page_with_map();
        let bounds = LatLngBounds {
            south: 1.0,
            west: 2.0,
            north: 3.0,
            east: 4.0,
        };
        page.fit_bounds(&bounds).unwrap();
        assert!(
            page.script()
                .ends_with("map.fitBounds([[1.0,2.0],[3.0,4.0]]);")
        );
    }

    #[test]
    fn test_write_html() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.html");

        let page = page_with_map();
        page.write_html(&path, "Agua & Bogotá").unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Agua &amp; Bogotá</title>"));
        assert!(html.contains(r#"<div id="map" class="watermap-container"></div>"#));
        assert!(html.contains(".watermap-container { height: 100%; }"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains(".custom-label"));
    }

    #[test]
    fn test_container_sized_for_any_valid_id() {
        for id in ["a.b", "1map", "agua:bogota"] {
            let mut page = LeafletPage::new();
            page.create_map(id, (4.65, -74.1), 11).unwrap();

            let html = page.to_html("t").unwrap();
            assert!(html.contains(&format!(
                r#"<div id="{}" class="watermap-container"></div>"#,
                id
            )));
            assert!(!html.contains(&format!("#{} {{", id)));
            assert!(html.contains(".watermap-container { height: 100%; }"));
        }
    }
}
