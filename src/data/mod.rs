pub mod bogota;

pub use bogota::{BOGOTA_CENTER, BOGOTA_ZOOM, water_points};
