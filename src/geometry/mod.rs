pub mod bounds;

pub use bounds::LatLngBounds;
