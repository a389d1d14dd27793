pub mod domain;

pub use domain::{GeoPoint, MeterType, Role, SyntheticMeter, SyntheticUser};
