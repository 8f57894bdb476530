//! Configuration management for the grid simulator

pub mod settings;

pub use settings::{CameraConfig, CliOverrides, GridConfig, Settings, SimulationConfig};
