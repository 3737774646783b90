//! Text command - show the text extracted from a PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use fondsreport_core::{Document, PdfExtractor, PdfProcessor};

use super::config::load_config;

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Only extract this page (1-indexed)
    #[arg(long)]
    page: Option<u32>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let document = Document::from_path(&args.input)?;

    let mut extractor = PdfExtractor::new().with_lopdf_fallback(config.pdf.fallback_to_lopdf);
    extractor.load(&document.data)?;
    debug!("{} has {} pages", document.name, extractor.page_count());

    let text = match args.page {
        Some(page) => extractor.extract_page_text(page)?,
        None => extractor.extract_text()?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &text)?;
        println!(
            "{} Text written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", text);
    }

    Ok(())
}
