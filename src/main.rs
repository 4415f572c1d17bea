//! SponsorLens - sponsorship exposure analytics from the command line
//!
//! Filters a synthetic exposure dataset across rightsholders, sponsors,
//! placements, platforms and seasons, and derives totals, breakdowns, presets
//! and mock insights from the result.

use clap::{Parser, Subcommand};
use sponsorlens::cli::{
    CatalogArgs, CliResult, ConfigArgs, ExitCode, ExportArgs, FilterArgs, SessionArgs,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SponsorLens - sponsorship exposure analytics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the selectable options of each filter dimension
    Catalog(CatalogArgs),
    /// Filter the dataset and print the dashboard report
    Filter(FilterArgs),
    /// Export the filtered records as CSV
    Export(ExportArgs),
    /// Run a scripted dashboard session (presets, edit mode, insights)
    Session(SessionArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Catalog(args) => args.execute(),
            Self::Filter(args) => args.execute(),
            Self::Export(args) => args.execute(),
            Self::Session(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match cli.command.execute() {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code
        }
    };

    std::process::exit(code.code());
}
