//! CLI command implementations.

pub mod common;
pub mod curve;
pub mod generate;
pub mod params;
pub mod process;
