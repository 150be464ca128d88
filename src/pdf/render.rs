//! PDF rasterization via pdfium

use std::path::{Path, PathBuf};
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;
use crate::error::{Error, Result};

/// Scale factor applied when rasterizing invoice pages
pub const RENDER_SCALE: f32 = 3.0;

/// Index of the only page that is ever rendered from an invoice
pub const FIRST_PAGE: u16 = 0;

/// Something that can turn a PDF page into a bitmap
pub trait Rasterizer {
    /// Render page `index` of the PDF at `path`
    fn render_page(&self, path: &Path, index: u16) -> Result<DynamicImage>;
}

/// Options for binding the pdfium library
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Directory holding the pdfium shared library. The current directory
    /// and the system library are tried when this is unset or fails.
    pub library_dir: Option<PathBuf>,
}

/// Rasterizer backed by the pdfium library
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind pdfium, trying `library_dir`, then `./`, then the system library
    pub fn new(options: &RenderOptions) -> Result<Self> {
        let local = |dir: &Path| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
        };

        let bindings = match &options.library_dir {
            Some(dir) => local(dir).or_else(|_| local(Path::new("./"))),
            None => local(Path::new("./")),
        }
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::PdfiumUnavailable(format!("{:?}", e)))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl Rasterizer for PdfiumRasterizer {
    /// Load the document fresh and render one page at [`RENDER_SCALE`]
    fn render_page(&self, path: &Path, index: u16) -> Result<DynamicImage> {
        let render_error = |e: PdfiumError| Error::Render {
            path: path.to_path_buf(),
            detail: format!("{:?}", e),
        };

        let document = self.pdfium.load_pdf_from_file(path, None).map_err(render_error)?;
        let pages = document.pages();
        let total = pages.len() as u16;
        if index >= total {
            return Err(Error::PageOutOfRange {
                path: path.to_path_buf(),
                page: index,
                total,
            });
        }

        let page = pages.get(index).map_err(render_error)?;
        let config = PdfRenderConfig::new().scale_page_by_factor(RENDER_SCALE);
        let bitmap = page.render_with_config(&config).map_err(render_error)?;
        let image = bitmap.as_image();

        debug!(
            "Rendered {} page {} → {}x{} px",
            path.display(),
            index + 1,
            image.width(),
            image.height()
        );

        Ok(image)
    }
}
