//! Two-up invoice pages and the price summary page

use std::path::Path;
use tracing::debug;
use crate::error::Result;
use crate::layout::{fit_in_box, half_boxes, Padding, Rect};
use crate::pdf::create::{InvoiceDocument, PageCanvas};
use crate::pdf::render::{Rasterizer, FIRST_PAGE};
use crate::price::extract_price;

/// Font size of the summary line
pub const SUMMARY_FONT_SIZE: f32 = 20.0;

/// Format the summary line for a total price
///
/// Whole amounts keep one fractional digit, so an empty run reads
/// `Price: $0.0`.
pub fn format_total(total: f32) -> String {
    format!("Price: ${:?}", total)
}

/// Place up to two invoices on one new page and return their summed price
///
/// `file_a` goes into the first half-box and `file_b` into the second; a
/// missing file leaves its half blank.
pub fn place_pair_on_page(
    doc: &mut InvoiceDocument,
    rasterizer: &dyn Rasterizer,
    file_a: Option<&Path>,
    file_b: Option<&Path>,
    padding: &Padding,
) -> Result<f32> {
    let (top, bottom) = half_boxes(&doc.page_size(), padding);
    let mut canvas = doc.begin_page();
    let mut subtotal = 0.0;

    for (file, target) in [(file_a, top), (file_b, bottom)] {
        if let Some(path) = file {
            subtotal += draw_invoice(doc, &mut canvas, rasterizer, path, &target)?;
        }
    }

    doc.finish_page(canvas)?;
    Ok(subtotal)
}

/// Render one invoice, read its price and draw it into `target`
fn draw_invoice(
    doc: &mut InvoiceDocument,
    canvas: &mut PageCanvas,
    rasterizer: &dyn Rasterizer,
    path: &Path,
    target: &Rect,
) -> Result<f32> {
    let image = rasterizer.render_page(path, FIRST_PAGE)?;
    let price = extract_price(&image, &path.display().to_string());

    let placement = fit_in_box(target, image.width() as f32, image.height() as f32);
    debug!("Placing {} at {:?}", path.display(), placement);
    canvas.draw_image(doc, &image, &placement)?;

    Ok(price)
}

/// Append a page holding only `text` in bold
pub fn append_summary_page(doc: &mut InvoiceDocument, text: &str, padding: &Padding) -> Result<()> {
    let mut canvas = doc.begin_page();
    canvas.show_text(text, SUMMARY_FONT_SIZE, padding.left, padding.top);
    doc.finish_page(canvas)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use crate::error::Error;

    /// Returns a solid image of fixed size for any path
    struct SolidRasterizer {
        width: u32,
        height: u32,
    }

    impl Rasterizer for SolidRasterizer {
        fn render_page(&self, _path: &Path, _index: u16) -> Result<DynamicImage> {
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                self.width,
                self.height,
                Rgb([240, 240, 240]),
            )))
        }
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn render_page(&self, path: &Path, _index: u16) -> Result<DynamicImage> {
            Err(Error::Render {
                path: path.to_path_buf(),
                detail: "broken".to_string(),
            })
        }
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(0.0), "Price: $0.0");
        assert_eq!(format_total(12.5), "Price: $12.5");
        assert_eq!(format_total(30.0), "Price: $30.0");
        assert_eq!(format_total(3.25), "Price: $3.25");
    }

    #[test]
    fn test_pair_without_qr_codes_prices_zero() {
        let mut doc = InvoiceDocument::new();
        let rasterizer = SolidRasterizer { width: 60, height: 80 };
        let a = Path::new("a.pdf");
        let b = Path::new("b.pdf");

        let subtotal = place_pair_on_page(
            &mut doc,
            &rasterizer,
            Some(a),
            Some(b),
            &Padding::default(),
        )
        .unwrap();

        assert_eq!(subtotal, 0.0);
        assert_eq!(doc.page_count(), 1);
    }

    /// Operands of every `cm` operator on the first page of a saved PDF
    fn image_matrices(doc: InvoiceDocument) -> Vec<Vec<f32>> {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("pair.pdf");
        doc.save(&output).unwrap();

        let loaded = lopdf::Document::load(&output).unwrap();
        let page_id = loaded.get_pages()[&1];
        let content = lopdf::content::Content::decode(&loaded.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "cm")
            .map(|op| op.operands.iter().map(|o| o.as_float().unwrap()).collect())
            .collect()
    }

    fn assert_placed(matrix: &[f32], expected: &Rect) {
        let wanted = [expected.width, 0.0, 0.0, expected.height, expected.x, expected.y];
        assert_eq!(matrix.len(), 6);
        for (got, want) in matrix.iter().zip(wanted) {
            assert!((got - want).abs() < 0.01, "matrix {:?} != {:?}", matrix, wanted);
        }
    }

    #[test]
    fn test_pair_placed_in_half_boxes() {
        let mut doc = InvoiceDocument::new();
        let padding = Padding::default();
        let (top, bottom) = half_boxes(&doc.page_size(), &padding);
        let wide = SolidRasterizer { width: 300, height: 100 };

        place_pair_on_page(&mut doc, &wide, Some(Path::new("a.pdf")), Some(Path::new("b.pdf")), &padding).unwrap();

        let matrices = image_matrices(doc);
        assert_eq!(matrices.len(), 2);
        // file_a in the box at padding.top, file_b half a page higher
        assert_placed(&matrices[0], &fit_in_box(&top, 300.0, 100.0));
        assert_placed(&matrices[1], &fit_in_box(&bottom, 300.0, 100.0));
        assert!(matrices[0][5] < matrices[1][5]);
    }

    #[test]
    fn test_lone_file_uses_first_half_box() {
        let mut doc = InvoiceDocument::new();
        let padding = Padding { left: 5.0, top: 30.0, right: 15.0, bottom: 20.0 };
        let (top, _) = half_boxes(&doc.page_size(), &padding);
        let tall = SolidRasterizer { width: 100, height: 400 };

        place_pair_on_page(&mut doc, &tall, Some(Path::new("a.pdf")), None, &padding).unwrap();

        let matrices = image_matrices(doc);
        assert_eq!(matrices.len(), 1);
        assert_placed(&matrices[0], &fit_in_box(&top, 100.0, 400.0));
    }

    #[test]
    fn test_single_file_leaves_half_blank() {
        let mut doc = InvoiceDocument::new();
        let rasterizer = SolidRasterizer { width: 60, height: 80 };
        let a = Path::new("a.pdf");

        place_pair_on_page(&mut doc, &rasterizer, Some(a), None, &Padding::default()).unwrap();
        place_pair_on_page(&mut doc, &rasterizer, None, None, &Padding::default()).unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_render_failure_adds_no_page() {
        let mut doc = InvoiceDocument::new();
        let a = Path::new("a.pdf");

        let result = place_pair_on_page(&mut doc, &FailingRasterizer, Some(a), None, &Padding::default());
        assert!(matches!(result, Err(Error::Render { .. })));
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_summary_page_appended() {
        let mut doc = InvoiceDocument::new();
        append_summary_page(&mut doc, &format_total(0.0), &Padding::default()).unwrap();
        assert_eq!(doc.page_count(), 1);
    }
}
