//! QuiltKit - quilt block design toolkit
//!
//! Validates block documents, prints their geometry and checks unit
//! placements from the command line.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quiltkit::cli::{
    CliResult, GeometryArgs, MigrateArgs, NewArgs, PlaceArgs, UnitsArgs, ValidateArgs,
};

/// QuiltKit - quilt block design toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty block file
    New(NewArgs),
    /// Validate a block file
    Validate(ValidateArgs),
    /// Print the drawable triangles of a block
    Geometry(GeometryArgs),
    /// List registered unit types
    Units(UnitsArgs),
    /// Check a unit placement without modifying the block
    Place(PlaceArgs),
    /// Rewrite a block file in the current format
    Migrate(MigrateArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::New(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Geometry(args) => args.execute(),
            Self::Units(args) => args.execute(),
            Self::Place(args) => args.execute(),
            Self::Migrate(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}
