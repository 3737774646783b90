//! Parse command - run one table parser on a plain-text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use fondsreport_core::ReportKind;

use super::config::load_config;
use super::report::render_table;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Which report the text comes from
    #[arg(value_enum)]
    kind: KindArg,

    /// Plain-text input, e.g. from `fondsreport text`
    #[arg(required = true)]
    input: PathBuf,

    /// Print all rows as JSON instead of a preview
    #[arg(long)]
    json: bool,

    /// Number of leading rows to show (overrides config)
    #[arg(short, long)]
    preview: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Fund volume (PDF 1)
    Volume,
    /// Net inflows by category (PDF 2)
    Categories,
    /// Net inflows by target group (PDF 3)
    TargetGroups,
    /// Management companies (PDF 4)
    Companies,
}

impl From<KindArg> for ReportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Volume => ReportKind::FundVolume,
            KindArg::Categories => ReportKind::CategoryFlows,
            KindArg::TargetGroups => ReportKind::TargetGroupFlows,
            KindArg::Companies => ReportKind::ManagementCompanies,
        }
    }
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let kind = ReportKind::from(args.kind);

    let text = fs::read_to_string(&args.input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.input.display(), e))?;

    let table = kind.parse(&text, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("{} Table could NOT be recognized.", style("✗").red());
        return Ok(());
    }

    println!(
        "{} {}: {} rows",
        style("✓").green(),
        kind,
        table.len()
    );
    print!(
        "{}",
        render_table(&table, args.preview.unwrap_or(config.report.preview_rows))
    );

    Ok(())
}
