//! Configuration settings for the grid simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cells per side; the grid is `size` x `size`
    pub size: usize,
    /// Cells created per construction tick
    pub batch_size: usize,
    /// World distance between neighboring cell visuals
    pub spacing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Delay between generation steps while running
    pub step_delay_ms: u64,
    /// Pause between construction batches
    pub build_tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// View change per scroll step, in cells
    pub zoom_speed: f32,
    /// Camera movement per pan input, in cells
    pub pan_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                size: 50,
                batch_size: 10,
                spacing: 0.01,
            },
            simulation: SimulationConfig {
                step_delay_ms: 100,
                build_tick_ms: 5,
            },
            camera: CameraConfig {
                zoom_speed: 1.0,
                pan_speed: 1.0,
            },
        }
    }
}

impl SimulationConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn build_tick(&self) -> Duration {
        Duration::from_millis(self.build_tick_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.size == 0 {
            anyhow::bail!("Grid size must be positive");
        }

        if self.grid.batch_size == 0 {
            anyhow::bail!("Construction batch size must be positive");
        }

        if !(self.grid.spacing > 0.0) {
            anyhow::bail!("Cell spacing must be positive, got {}", self.grid.spacing);
        }

        if !(self.camera.zoom_speed > 0.0) || !(self.camera.pan_speed > 0.0) {
            anyhow::bail!("Camera zoom and pan speeds must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.grid.size = size;
        }
        if let Some(batch_size) = cli_overrides.batch_size {
            self.grid.batch_size = batch_size;
        }
        if let Some(step_delay_ms) = cli_overrides.step_delay_ms {
            self.simulation.step_delay_ms = step_delay_ms;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub batch_size: Option<usize>,
    pub step_delay_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.batch_size, 10);
        assert_eq!(settings.simulation.step_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.grid.size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.spacing = -0.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.grid.batch_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.grid.size = 12;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        let yaml = "grid:\n  size: 0\n  batch_size: 10\n  spacing: 0.01\n\
                    simulation:\n  step_delay_ms: 1\n  build_tick_ms: 1\n\
                    camera:\n  zoom_speed: 1.0\n  pan_speed: 1.0\n";
        std::fs::write(&path, yaml).unwrap();

        assert!(Settings::from_file(&path).is_err());
        assert!(Settings::from_file(temp_dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            size: Some(8),
            batch_size: None,
            step_delay_ms: Some(0),
        });

        assert_eq!(settings.grid.size, 8);
        assert_eq!(settings.grid.batch_size, 10);
        assert_eq!(settings.simulation.step_delay_ms, 0);
    }
}
