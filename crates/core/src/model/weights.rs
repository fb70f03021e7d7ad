use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EdgeKind;

/// Factor used for labels absent from the table.
pub const DEFAULT_DECAY: f64 = 0.1;

/// Reference factors indexed by `EdgeKind` code 1..=6.
const REFERENCE_FACTORS: [f64; 6] = [0.1, 0.3, 0.5, 0.7, 0.9, 1.0];

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("Decay factor for {kind} must lie in (0, 1], got {factor}")]
    FactorOutOfRange { kind: &'static str, factor: f64 },
}

/// Decay factor per edge kind.
///
/// Every factor lies in (0, 1], which keeps relevance non-increasing along
/// any propagation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    factors: [f64; 6],
    default: f64,
}

impl WeightTable {
    /// Build a table from factors ordered by kind code 1..=6.
    pub fn new(factors: [f64; 6], default: f64) -> Result<Self, WeightError> {
        for (kind, factor) in EdgeKind::KNOWN.iter().zip(factors) {
            check_factor(kind.as_str(), factor)?;
        }
        check_factor("default", default)?;
        Ok(Self { factors, default })
    }

    /// The 1.0 / 0.9 / 0.7 / 0.5 / 0.3 / 0.1 table for kinds 6..1.
    pub fn reference() -> Self {
        Self { factors: REFERENCE_FACTORS, default: DEFAULT_DECAY }
    }

    pub fn decay(&self, kind: EdgeKind) -> f64 {
        match kind.ordinal() {
            Some(slot) => self.factors[slot],
            None => self.default,
        }
    }

    pub fn default_factor(&self) -> f64 {
        self.default
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::reference()
    }
}

fn check_factor(kind: &'static str, factor: f64) -> Result<(), WeightError> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(())
    } else {
        Err(WeightError::FactorOutOfRange { kind, factor })
    }
}

/// Serializable form of the weight table, one named field per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "defaults::data")]
    pub data: f64,
    #[serde(default = "defaults::inter_agent_data")]
    pub inter_agent_data: f64,
    #[serde(default = "defaults::return_dep")]
    pub return_dep: f64,
    #[serde(default = "defaults::procedure_call")]
    pub procedure_call: f64,
    #[serde(default = "defaults::inter_agent_message")]
    pub inter_agent_message: f64,
    #[serde(default = "defaults::control")]
    pub control: f64,
    /// Factor for unrecognized kinds.
    #[serde(default = "defaults::default_factor")]
    pub default: f64,
}

mod defaults {
    pub fn data() -> f64 {
        1.0
    }
    pub fn inter_agent_data() -> f64 {
        0.9
    }
    pub fn return_dep() -> f64 {
        0.7
    }
    pub fn procedure_call() -> f64 {
        0.5
    }
    pub fn inter_agent_message() -> f64 {
        0.3
    }
    pub fn control() -> f64 {
        0.1
    }
    pub fn default_factor() -> f64 {
        super::DEFAULT_DECAY
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            data: defaults::data(),
            inter_agent_data: defaults::inter_agent_data(),
            return_dep: defaults::return_dep(),
            procedure_call: defaults::procedure_call(),
            inter_agent_message: defaults::inter_agent_message(),
            control: defaults::control(),
            default: defaults::default_factor(),
        }
    }
}

impl TryFrom<&WeightsConfig> for WeightTable {
    type Error = WeightError;

    fn try_from(config: &WeightsConfig) -> Result<Self, Self::Error> {
        WeightTable::new(
            [
                config.control,
                config.inter_agent_message,
                config.procedure_call,
                config.return_dep,
                config.inter_agent_data,
                config.data,
            ],
            config.default,
        )
    }
}

impl TryFrom<WeightsConfig> for WeightTable {
    type Error = WeightError;

    fn try_from(config: WeightsConfig) -> Result<Self, Self::Error> {
        WeightTable::try_from(&config)
    }
}
