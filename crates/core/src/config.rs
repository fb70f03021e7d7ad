use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{PropagationStrategy, ThresholdGrid};
use crate::model::{WeightTable, WeightsConfig};

/// Serializable configuration for a calibration run.
///
/// Every field has a default matching the reference behaviour, so an empty
/// config file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Decay factor per edge kind.
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Thresholds swept during calibration.
    #[serde(default)]
    pub grid: ThresholdGrid,
    /// Relaxation order used by the slice engine.
    #[serde(default)]
    pub strategy: PropagationStrategy,
}

impl CalibrationConfig {
    /// Check weights and grid without building anything.
    pub fn validate(&self) -> Result<()> {
        WeightTable::try_from(&self.weights).context("Invalid weights in config")?;
        self.grid.validate().context("Invalid threshold grid in config")?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }
}

/// Load a calibration config from YAML (`.yaml`/`.yml`) or JSON (`.json`).
pub fn load_config(path: impl AsRef<Path>) -> Result<CalibrationConfig> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;

    let config: CalibrationConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse config JSON at {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse config YAML at {}", path.display()))?,
        other => {
            return Err(anyhow!(
                "Unsupported config extension {:?} for {} (expected yaml, yml or json)",
                other.unwrap_or(""),
                path.display()
            ))
        }
    };
    config.validate()?;
    Ok(config)
}
