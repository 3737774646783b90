//! CLI application for verifying tables parsed from fund-industry PDF reports.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, parse, report, text};

/// Fund report parser - extract tables from the four German fund-industry reports
#[derive(Parser)]
#[command(name = "fondsreport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the batch of four report PDFs
    Report(report::ReportArgs),

    /// Show the text extracted from a PDF
    Text(text::TextArgs),

    /// Run a single table parser on a plain-text file
    Parse(parse::ParseArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Report(args) => report::run(args, config_path),
        Commands::Text(args) => text::run(args, config_path),
        Commands::Parse(args) => parse::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
