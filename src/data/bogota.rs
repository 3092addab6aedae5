//! Representative rivers, lagoons and wetlands in and around Bogotá.
//!
//! Coordinates are approximate.

use crate::domain::WaterPoint;

/// Map centre used when no other centre is configured
pub const BOGOTA_CENTER: (f64, f64) = (4.65, -74.10);

/// Zoom level that frames the city on first load
pub const BOGOTA_ZOOM: u8 = 11;

const RIVERS: &[(&str, f64, f64)] = &[
    ("Nacimiento Río Bogotá (Alto del Sol)", 4.508, -74.190),
    ("Estación Hidrométrica Bosa", 4.596, -74.191),
    ("Puente La Virgen (Kennedy)", 4.626, -74.130),
    ("Centro de Bogotá (Parque Tercer Milenio)", 4.611, -74.080),
    ("Puente de Guadua (Usaquén)", 4.737, -74.028),
    // Outside the city, kept as a downstream reference
    ("Desembocadura Río Bogotá en Río Magdalena", 8.91, -74.79),
];

const POLLUTED_RIVERS: &[(&str, f64, f64)] = &[
    ("Río Salitre", 4.634, -74.086),
    ("Río Fucha", 4.590, -74.090),
    ("Río Tunjuelo", 4.590, -74.180),
    ("Río Torca", 4.688, -74.063),
];

const WETLANDS: &[(&str, f64, f64)] = &[
    ("Laguna Tibanica", 4.5246, -74.1805),
    ("Humedal La Conejera", 4.7201, -74.1034),
    ("Humedal Juan Amarillo", 4.7223, -74.1056),
    ("Humedal Santa María del Lago", 4.8224, -74.0513),
    ("Humedal El Burro", 4.7067, -74.0932),
    ("Quebrada La Vieja", 4.6948, -74.0703),
];

/// The full list in declaration order: rivers, polluted rivers, then wetlands.
pub fn water_points() -> Vec<WaterPoint> {
    RIVERS
        .iter()
        .chain(POLLUTED_RIVERS)
        .chain(WETLANDS)
        .map(|&(name, lat, lng)| WaterPoint::new(name, lat, lng))
        .collect()
}
