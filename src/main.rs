use anyhow::Result;
use clap::Parser;
use meetmap::cli::{Cli, Commands};
use meetmap::commands::analyze::{analyze_export, AnalyzeConfig};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            team,
            now,
        } => analyze_export(AnalyzeConfig {
            path,
            format: format.into(),
            output,
            team,
            now,
        }),
        Commands::Init { force } => meetmap::commands::init::init_config(force),
    }
}
