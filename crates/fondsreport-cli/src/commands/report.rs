//! Report command - parse the batch of four fund reports.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use fondsreport_core::report::BATCH_SIZE;
use fondsreport_core::{
    BatchOutcome, CachedExtractor, Document, DocumentReport, DocumentStatus, PdfTextExtractor,
    ReportDriver, ReportKind, Table,
};

use super::config::load_config;

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// The four PDFs, in order: fund volume, flows by category,
    /// flows by target group, management companies
    #[arg(num_args = 0..)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Number of leading rows to show per table (overrides config)
    #[arg(short, long)]
    preview: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with table previews
    Text,
    /// JSON with all parsed rows
    Json,
    /// CSV status summary, one line per document
    Csv,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: &'a BatchOutcome,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    if args.inputs.len() != BATCH_SIZE {
        info!("Got {} input files, nothing to do", args.inputs.len());
        println!("{} {}", style("ℹ").blue(), BatchOutcome::instructions());
        return Ok(());
    }

    let config = load_config(config_path)?;
    let preview_rows = args.preview.unwrap_or(config.report.preview_rows);

    let mut documents = Vec::with_capacity(BATCH_SIZE);
    for path in &args.inputs {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        documents.push(Document::from_path(path)?);
    }

    let pb = ProgressBar::new(BATCH_SIZE as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let extractor = CachedExtractor::new(
        PdfTextExtractor::new().with_lopdf_fallback(config.pdf.fallback_to_lopdf),
    );
    let driver = ReportDriver::new(extractor).with_config(config);

    let mut reports = Vec::with_capacity(BATCH_SIZE);
    for (document, kind) in documents.iter().zip(ReportKind::ALL) {
        pb.set_message(document.name.clone());
        reports.push(driver.process(document, kind));
        pb.inc(1);
    }
    let outcome = BatchOutcome::Processed { reports };

    pb.finish_and_clear();

    let output = match args.format {
        OutputFormat::Text => format_text(&outcome, preview_rows),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonReport {
            generated_at: Utc::now(),
            outcome: &outcome,
        })?,
        OutputFormat::Csv => format_csv(&outcome)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn status_name(status: &DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Recognized { .. } => "recognized",
        DocumentStatus::NotRecognized => "not_recognized",
        DocumentStatus::Failed { .. } => "error",
    }
}

pub fn format_text(outcome: &BatchOutcome, preview_rows: usize) -> String {
    let reports = match outcome {
        BatchOutcome::WrongCount { .. } => return BatchOutcome::instructions(),
        BatchOutcome::Processed { reports } => reports,
    };

    let mut output = String::new();
    for report in reports {
        output.push_str(&format_document(report, preview_rows));
        output.push('\n');
    }
    output
}

fn format_document(report: &DocumentReport, preview_rows: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style(report.kind).bold()));
    output.push_str(&format!("File: {}\n", report.filename));

    match &report.status {
        DocumentStatus::Recognized { table } => {
            output.push_str(&format!(
                "{} Table recognized ({} rows)\n",
                style("✓").green(),
                table.len()
            ));
            output.push_str(&render_table(table, preview_rows));
        }
        DocumentStatus::NotRecognized => {
            output.push_str(&format!(
                "{} Table could NOT be recognized.\n",
                style("✗").red()
            ));
        }
        DocumentStatus::Failed { message } => {
            output.push_str(&format!(
                "{} Parsing failed: {}\n",
                style("✗").red(),
                message
            ));
        }
    }

    output
}

/// Render the leading rows as an aligned text table.
pub fn render_table(table: &Table, preview_rows: usize) -> String {
    let columns = table.columns();
    let rows = table.preview(preview_rows);

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    // Names left-aligned, numbers right-aligned
    let is_text = |i: usize| matches!(columns[i], "Category" | "CompanyName");
    let render_row = |cells: Vec<String>| -> String {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if is_text(i) {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect();
        format!("  {}\n", line.join("  ").trim_end())
    };

    let mut output = render_row(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        output.push_str(&render_row(row));
    }
    if table.len() > preview_rows {
        output.push_str(&format!("  ... {} more rows\n", table.len() - preview_rows));
    }
    output
}

fn format_csv(outcome: &BatchOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["position", "label", "filename", "status", "rows", "error"])?;

    if let BatchOutcome::Processed { reports } = outcome {
        for report in reports {
            let error = match &report.status {
                DocumentStatus::Failed { message } => message.as_str(),
                _ => "",
            };
            wtr.write_record([
                report.kind.position().to_string().as_str(),
                report.kind.label(),
                report.filename.as_str(),
                status_name(&report.status),
                report.row_count().to_string().as_str(),
                error,
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
