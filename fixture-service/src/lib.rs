pub mod config;
pub mod generator;
pub mod observability;
pub mod render;

pub use generator::{FixtureError, FixtureSet};
