mod commands;
mod settings;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use settings::GuardrailArgs;

#[derive(Parser)]
#[command(name = "vista", about = "Image ingestion and orientation tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    guardrails: GuardrailArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an image (file or URL) and show its metadata
    Info(commands::info::InfoArgs),
    /// Print the EXIF orientation tag of a JPEG file
    Orientation(commands::orientation::OrientationArgs),
    /// Load an image and write the upright raster
    Export(commands::export::ExportArgs),
    /// Print or save the default guardrail config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &cli.guardrails),
        Commands::Orientation(args) => commands::orientation::run(args),
        Commands::Export(args) => commands::export::run(args, &cli.guardrails),
        Commands::Config(args) => commands::config::run(args, &cli.guardrails),
    }
}
