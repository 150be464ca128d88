//! PDF rendering and output document composition

pub mod render;
pub mod create;
pub mod compose;

// Re-export commonly used items
pub use render::{PdfiumRasterizer, Rasterizer, RenderOptions, FIRST_PAGE, RENDER_SCALE};
pub use create::{InvoiceDocument, PageCanvas};
pub use compose::{append_summary_page, format_total, place_pair_on_page};
