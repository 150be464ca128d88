//! End-to-end invoice collection

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::error::{Error, Result};
use crate::layout::Padding;
use crate::pdf::{append_summary_page, format_total, place_pair_on_page, InvoiceDocument, Rasterizer};
use crate::scan::collect_valid_pdfs;

/// File name used when the output path is a directory
pub const DEFAULT_OUTPUT_NAME: &str = "out.pdf";

/// Options for a collection run
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Directory containing the invoice PDFs
    pub input_dir: PathBuf,
    /// Output PDF file path, or a directory to write `out.pdf` into
    pub output_path: PathBuf,
    /// Padding applied to every page and image box
    pub padding: Padding,
}

impl CollectOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            padding: Padding::default(),
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct CollectReport {
    /// Where the PDF was written
    pub output_path: PathBuf,
    /// Number of input PDFs that were placed
    pub invoice_count: usize,
    /// Pages in the output, including the summary page
    pub page_count: usize,
    /// Sum of all extracted prices
    pub total: f32,
}

/// Resolve the effective output file and make sure its directory exists
///
/// An existing directory resolves to `<dir>/out.pdf`.
pub fn resolve_output_path(path: &Path) -> Result<PathBuf> {
    let output = if path.is_dir() {
        path.join(DEFAULT_OUTPUT_NAME)
    } else {
        path.to_path_buf()
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(output)
}

/// Collect every invoice in the input directory into one PDF
///
/// Invoices are placed two per page in directory-listing order, followed
/// by a page with the total price. Nothing is written if the input
/// directory is missing.
///
/// # Example
///
/// ```no_run
/// use invoice_collect::collect::{collect_invoices, CollectOptions};
/// use invoice_collect::pdf::{PdfiumRasterizer, RenderOptions};
///
/// let rasterizer = PdfiumRasterizer::new(&RenderOptions::default())?;
/// let options = CollectOptions::new("invoices", "out/collected.pdf");
/// let report = collect_invoices(&options, &rasterizer)?;
/// println!("{}", report.total);
/// # Ok::<(), invoice_collect::Error>(())
/// ```
pub fn collect_invoices(options: &CollectOptions, rasterizer: &dyn Rasterizer) -> Result<CollectReport> {
    if !options.input_dir.exists() {
        return Err(Error::InputDirNotFound(options.input_dir.clone()));
    }

    let output_path = resolve_output_path(&options.output_path)?;
    let files = collect_valid_pdfs(&options.input_dir)?;
    info!("Found {} invoice PDFs in {}", files.len(), options.input_dir.display());

    let mut doc = InvoiceDocument::new();
    let mut total = 0.0;
    for pair in files.chunks(2) {
        let file_a = pair.first().map(PathBuf::as_path);
        let file_b = pair.get(1).map(PathBuf::as_path);
        total += place_pair_on_page(&mut doc, rasterizer, file_a, file_b, &options.padding)?;
    }

    let summary = format_total(total);
    info!("{}", summary);
    append_summary_page(&mut doc, &summary, &options.padding)?;

    let page_count = doc.page_count();
    doc.save(&output_path)?;
    info!("Wrote {} pages to {}", page_count, output_path.display());

    Ok(CollectReport {
        output_path,
        invoice_count: files.len(),
        page_count,
        total,
    })
}
