pub mod point;
pub mod route;

pub use point::WaterPoint;
pub use route::WaterRoute;
