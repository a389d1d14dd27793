pub mod meter;
pub mod user;

pub use meter::{GeoPoint, MeterType, SyntheticMeter};
pub use user::{Role, SyntheticUser};
