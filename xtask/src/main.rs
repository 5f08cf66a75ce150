//! xtask - Development task runner for ordcollections
//!
//! Usage:
//!   cargo run -p xtask -- feature-matrix [options]

mod feature_matrix;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for ordcollections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test every feature flag on its own and in the advertised combinations
    FeatureMatrix(feature_matrix::FeatureMatrixArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::FeatureMatrix(args) => feature_matrix::run(&args),
    }
}
