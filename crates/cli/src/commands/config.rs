use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use dgslice_core::analysis::PropagationStrategy;
use dgslice_core::config::{load_config, CalibrationConfig};

/// Command-line spelling of the propagation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Fifo,
    BestFirst,
    Phased,
}

impl From<StrategyArg> for PropagationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Fifo => PropagationStrategy::Fifo,
            StrategyArg::BestFirst => PropagationStrategy::BestFirst,
            StrategyArg::Phased => PropagationStrategy::Phased,
        }
    }
}

/// Resolve the effective config: file (or defaults), then CLI override.
pub fn resolve_config(
    config_path: Option<&str>,
    strategy_override: Option<StrategyArg>,
) -> Result<CalibrationConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => CalibrationConfig::default(),
    };
    if let Some(strategy) = strategy_override {
        config.strategy = strategy.into();
    }
    Ok(config)
}

/// Write the reference configuration as YAML.
pub fn init_config_command(path: &str, force: bool) -> Result<()> {
    let path = Path::new(path);
    if path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (rerun with --force to overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }

    let yaml = CalibrationConfig::default().to_yaml()?;
    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;

    println!("Wrote reference config:");
    println!("  Path: {}", path.display());
    Ok(())
}
