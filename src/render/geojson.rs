use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{
    LayerId, MapSurface, MarkerIcon, PolylineStyle, RenderError, TileLayerOptions,
    validate_container_id,
};
use crate::geometry::LatLngBounds;

#[derive(Debug)]
enum Layer {
    Tiles,
    Feature(usize),
}

/// Records drawing commands as a GeoJSON `FeatureCollection`.
///
/// The route line becomes a `LineString` feature and every marker a `Point`
/// feature. Map settings and tile layers are kept in a top-level `map`
/// member; the fitted view becomes the collection `bbox`.
///
/// Coordinates are passed through unchecked. A NaN or infinite coordinate
/// serializes as `null`, which GeoJSON readers will reject.
#[derive(Debug, Default)]
pub struct GeoJsonCollector {
    map: Option<JsonObject>,
    tile_layers: Vec<JsonValue>,
    features: Vec<Feature>,
    layers: Vec<Layer>,
    bbox: Option<Vec<f64>>,
}

impl GeoJsonCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_feature_collection(&self) -> Result<FeatureCollection, RenderError> {
        let mut map = self.map.clone().ok_or(RenderError::MapNotCreated)?;
        map.insert(
            "tileLayers".to_string(),
            JsonValue::Array(self.tile_layers.clone()),
        );

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("map".to_string(), JsonValue::Object(map));

        Ok(FeatureCollection {
            bbox: self.bbox.clone(),
            features: self.features.clone(),
            foreign_members: Some(foreign_members),
        })
    }

    pub fn write_geojson(&self, path: &Path) -> Result<()> {
        let collection = self.to_feature_collection()?;
        let file = File::create(path)
            .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &collection)
            .context("Failed to serialize GeoJSON")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn ensure_map(&self) -> Result<(), RenderError> {
        if self.map.is_none() {
            return Err(RenderError::MapNotCreated);
        }
        Ok(())
    }

    fn push(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    fn push_feature(&mut self, geometry: Value, properties: JsonObject) -> LayerId {
        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(geometry)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
        self.push(Layer::Feature(self.features.len() - 1))
    }
}

// GeoJSON positions are [longitude, latitude]
fn position((lat, lng): (f64, f64)) -> Vec<f64> {
    vec![lng, lat]
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<JsonObject, RenderError> {
    match serde_json::to_value(value)? {
        JsonValue::Object(object) => Ok(object),
        other => {
            let mut object = JsonObject::new();
            object.insert("value".to_string(), other);
            Ok(object)
        }
    }
}

impl MapSurface for GeoJsonCollector {
    fn create_map(
        &mut self,
        container_id: &str,
        center: (f64, f64),
        zoom: u8,
    ) -> Result<(), RenderError> {
        validate_container_id(container_id)?;
        let mut map = JsonObject::new();
        map.insert("container".to_string(), JsonValue::from(container_id));
        map.insert("center".to_string(), JsonValue::from(position(center)));
        map.insert("zoom".to_string(), JsonValue::from(zoom));
        self.map = Some(map);
        Ok(())
    }

    fn add_tile_layer(
        &mut self,
        url_template: &str,
        options: &TileLayerOptions,
    ) -> Result<LayerId, RenderError> {
        self.ensure_map()?;
        let mut layer = to_object(options)?;
        layer.insert("urlTemplate".to_string(), JsonValue::from(url_template));
        self.tile_layers.push(JsonValue::Object(layer));
        Ok(self.push(Layer::Tiles))
    }

    fn draw_polyline(
        &mut self,
        coords: &[(f64, f64)],
        style: &PolylineStyle,
    ) -> Result<LayerId, RenderError> {
        self.ensure_map()?;
        let line = coords.iter().copied().map(position).collect();
        let mut properties = to_object(style)?;
        properties.insert("role".to_string(), JsonValue::from("route"));
        Ok(self.push_feature(Value::LineString(line), properties))
    }

    fn add_marker(
        &mut self,
        latlng: (f64, f64),
        icon: &MarkerIcon,
    ) -> Result<LayerId, RenderError> {
        self.ensure_map()?;
        let mut properties = JsonObject::new();
        properties.insert("role".to_string(), JsonValue::from("marker"));
        properties.insert("icon".to_string(), serde_json::to_value(icon)?);
        Ok(self.push_feature(Value::Point(position(latlng)), properties))
    }

    fn bind_popup(&mut self, layer: LayerId, content: &str) -> Result<(), RenderError> {
        self.ensure_map()?;
        match self.layers.get(layer.0) {
            Some(Layer::Feature(index)) => {
                self.features[*index].set_property("popup", content);
                Ok(())
            }
            // Tile layers carry no feature to attach the popup to
            Some(Layer::Tiles) => Ok(()),
            None => Err(RenderError::UnknownLayer(layer.0)),
        }
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<(), RenderError> {
        self.ensure_map()?;
        self.bbox = Some(bounds.to_bbox().to_vec());
        Ok(())
    }
}
