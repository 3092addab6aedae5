use serde::{Deserialize, Serialize};

pub const DEFAULT_ROUTE_COLOR: &str = "#2563eb";
pub const DEFAULT_ROUTE_WEIGHT: f64 = 5.0;
pub const DEFAULT_ROUTE_OPACITY: f64 = 0.75;

/// Marker badge dimensions in pixels
pub const MARKER_SIZE: u32 = 28;

fn default_color() -> String {
    DEFAULT_ROUTE_COLOR.to_string()
}
fn default_weight() -> f64 {
    DEFAULT_ROUTE_WEIGHT
}
fn default_opacity() -> f64 {
    DEFAULT_ROUTE_OPACITY
}

/// Stroke style for the route line. Field names match Leaflet's path options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            weight: default_weight(),
            opacity: default_opacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    pub max_zoom: u8,
    pub attribution: String,
}

/// HTML marker icon, serialized as Leaflet `divIcon` options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub class_name: String,
    pub html: String,
    pub icon_size: [i32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

impl MarkerIcon {
    /// Round badge showing the 1-based position of a point on the route
    pub fn numbered(number: usize) -> Self {
        let size = MARKER_SIZE as i32;
        Self {
            class_name: String::new(),
            html: format!(r#"<div class="custom-label">{}</div>"#, number),
            icon_size: [size, size],
            icon_anchor: [size / 2, size / 2],
            popup_anchor: [0, -size / 2],
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
