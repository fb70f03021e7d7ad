use anyhow::{Context, Result};
use dgslice_core::analysis::{validate_threshold, SliceEngine};
use dgslice_core::model::WeightTable;
use dgslice_core::source::{FileSource, GraphSource};
use tracing::warn;

use crate::commands::{resolve_config, StrategyArg};

/// Compute and print a single dependency slice.
pub fn slice_command(
    graph_path: &str,
    criterion: &str,
    threshold: f64,
    config_path: Option<&str>,
    strategy: Option<StrategyArg>,
    json: bool,
) -> Result<()> {
    validate_threshold(threshold).context("Invalid --threshold")?;
    let config = resolve_config(config_path, strategy)?;
    let weights = WeightTable::try_from(&config.weights)?;
    let graph = FileSource::new(graph_path).load()?;
    if !graph.contains(criterion) {
        warn!(criterion, graph = graph_path, "criterion does not occur in the graph");
    }

    let engine = SliceEngine::new(&weights).with_strategy(config.strategy);
    let slice = engine.try_slice(&graph, criterion, threshold)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&slice)?);
        return Ok(());
    }

    println!(
        "Dependency slice for {} (tau = {:.2}, strategy = {}): {} node(s)",
        criterion,
        threshold,
        config.strategy.as_str(),
        slice.len()
    );
    if slice.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    let mut members: Vec<(&String, &f64)> = slice.relevance.iter().collect();
    members.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (node, weight) in members {
        println!("  - {node} [{weight:.4}]");
    }
    Ok(())
}
