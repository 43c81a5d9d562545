use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Process-lifetime render parameters, fixed at startup.
///
/// Every component takes a copy; nothing mutates the config after the
/// audio stream is opened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Peak amplitude of a single voice, 0.0 to 1.0.
    pub amplitude: f32,
    /// Attack ramp length in seconds.
    pub attack: f32,
    /// Release ramp length in seconds.
    pub release: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            amplitude: 0.3,
            attack: 0.01,
            release: 0.1,
        }
    }
}

impl RenderConfig {
    /// Load the config file if one exists, otherwise fall back to defaults.
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Self::default()),
        };

        let file = File::open(&path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config: RenderConfig = serde_json::from_reader(file)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("polytone").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.sample_rate > 0, "sample_rate must be positive");
        anyhow::ensure!(
            self.amplitude.is_finite() && (0.0..=1.0).contains(&self.amplitude),
            "amplitude must be in 0.0..=1.0"
        );
        anyhow::ensure!(
            self.attack >= 0.0 && self.release >= 0.0,
            "attack and release must be non-negative"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_parameters() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.amplitude, 0.3);
        assert_eq!(config.attack, 0.01);
        assert_eq!(config.release, 0.1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"sample_rate": 48000}"#).unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.amplitude, 0.3);
    }

    #[test]
    fn validate_rejects_out_of_range_amplitude() {
        let config = RenderConfig {
            amplitude: 1.5,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
