use anyhow::Result;
use clap::{Parser, Subcommand};
use dgslice::commands::{
    calibrate_command, init_config_command, matrix_command, slice_command, CalibrateOutputs,
    StrategyArg,
};

/// Relevance-weighted dependency slicing CLI.
///
/// This CLI is a thin wrapper around `dgslice-core` (exposed in code as `dgslice_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "dgslice",
    version,
    about = "Relevance-weighted dependency slicing with knee-point threshold calibration",
    long_about = None
)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the dependency slice of one criterion at a fixed threshold.
    Slice {
        /// Graph description file (whitespace-delimited token format).
        #[arg(long)]
        graph: String,

        /// Criterion node the slice is computed for.
        #[arg(long)]
        criterion: String,

        /// Minimum relevance a node needs to stay in the slice.
        #[arg(long, default_value_t = 0.0)]
        threshold: f64,

        /// Optional YAML/JSON config with weights and strategy.
        #[arg(long)]
        config: Option<String>,

        /// Override the propagation strategy from the config.
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Sweep the threshold grid and pick the knee point for each criterion.
    ///
    /// This will:
    /// - Compute the unthresholded baseline slice.
    /// - Record slice size and compression at every grid threshold.
    /// - Report the threshold of maximum curvature (tau_opt).
    Calibrate {
        /// Graph description file (whitespace-delimited token format).
        #[arg(long)]
        graph: String,

        /// Criterion node; repeat to calibrate several criteria.
        #[arg(long = "criterion", required = true)]
        criteria: Vec<String>,

        /// Optional YAML/JSON config with weights, grid and strategy.
        #[arg(long)]
        config: Option<String>,

        /// Override the propagation strategy from the config.
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Emit the JSON report instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Append a text bar chart annotated at the knee.
        #[arg(long, default_value_t = false)]
        plot: bool,

        /// Write an SVG curve plot to this path.
        #[arg(long)]
        svg: Option<String>,

        /// Write the JSON report to this path.
        #[arg(long)]
        out: Option<String>,
    },

    /// Show the indexed vertex list and dependency matrix of a graph.
    Matrix {
        /// Graph description file (whitespace-delimited token format).
        #[arg(long)]
        graph: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the reference calibration config as YAML.
    InitConfig {
        /// Destination path.
        #[arg(long, default_value = "dgslice.yaml")]
        path: String,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dgslice::init_tracing(cli.verbose);

    match cli.command {
        Command::Slice { graph, criterion, threshold, config, strategy, json } => {
            slice_command(&graph, &criterion, threshold, config.as_deref(), strategy, json)?
        }
        Command::Calibrate { graph, criteria, config, strategy, json, plot, svg, out } => {
            let outputs = CalibrateOutputs { json, plot, svg, out };
            calibrate_command(&graph, &criteria, config.as_deref(), strategy, &outputs)?
        }
        Command::Matrix { graph, json } => matrix_command(&graph, json)?,
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
