use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    describe::{self, DescribeArgs},
    points::{self, PointsArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_FILTER: &str = "spg=info";

#[derive(Parser, Debug)]
#[command(name = "spg", about = "Scan point generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit the points of a scan description, one per line.
    Points(PointsArgs),
    /// Print size, shape and descriptor digest of a scan description.
    Describe(DescribeArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Points(args) => points::run(&args),
        Command::Describe(args) => describe::run(&args),
    }
}
