//! Invoice Collect CLI tool
//!
//! Collects a directory of invoice PDFs into a single two-up PDF with a
//! trailing price summary page.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use invoice_collect::collect::{collect_invoices, CollectOptions};
use invoice_collect::pdf::{PdfiumRasterizer, RenderOptions};

/// Invoice Collect - Merge invoice PDFs two per page and total their prices
#[derive(Parser)]
#[command(name = "invoice-collect")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Collect every invoice in ./invoices into one file
    invoice-collect -i invoices -o collected.pdf

    # Write out.pdf into an existing directory
    invoice-collect -i invoices -o reports/

    # Use a pdfium library that is not installed system-wide
    invoice-collect -i invoices -o collected.pdf --pdfium-dir vendor/pdfium/lib")]
struct Cli {
    /// Input Invoice Directory
    #[arg(short, long)]
    input: PathBuf,

    /// Output pdf file path (an existing directory receives out.pdf)
    #[arg(short, long)]
    output: PathBuf,

    /// Directory containing the pdfium shared library
    #[arg(long)]
    pdfium_dir: Option<PathBuf>,

    /// Show per-page progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = CollectOptions::new(cli.input, cli.output);

    // Checked before binding pdfium so a bad path fails fast
    if !options.input_dir.exists() {
        anyhow::bail!(invoice_collect::Error::InputDirNotFound(options.input_dir));
    }

    let rasterizer = PdfiumRasterizer::new(&RenderOptions {
        library_dir: cli.pdfium_dir,
    })
    .context("Could not load the pdfium library; pass --pdfium-dir or install libpdfium")?;

    let report = collect_invoices(&options, &rasterizer)?;
    let output = std::fs::canonicalize(&report.output_path).unwrap_or(report.output_path);

    println!("Invoice is saved to {}", output.display());

    Ok(())
}
