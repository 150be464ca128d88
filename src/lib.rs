//! Invoice Collect Library
//!
//! Collects a directory of single-invoice PDFs into one printable PDF.
//! This library provides functionality to:
//! - Find the PDF files in a directory
//! - Rasterize the first page of each invoice
//! - Read the invoice amount from its QR code
//! - Lay invoices out two per A4 page and append a total price page
//!
//! # Example
//!
//! ```no_run
//! use invoice_collect::collect::{collect_invoices, CollectOptions};
//! use invoice_collect::pdf::{PdfiumRasterizer, RenderOptions};
//!
//! let rasterizer = PdfiumRasterizer::new(&RenderOptions::default())
//!     .expect("PDFium not available");
//! let options = CollectOptions::new("invoices", "collected.pdf");
//!
//! collect_invoices(&options, &rasterizer).expect("Failed to collect invoices");
//! ```

pub mod error;
pub mod layout;
pub mod scan;
pub mod price;
pub mod pdf;
pub mod collect;

// Re-export commonly used items
pub use error::{Error, Result};
pub use collect::{collect_invoices, CollectOptions, CollectReport};
