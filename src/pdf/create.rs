//! Output PDF creation using lopdf
//!
//! [`InvoiceDocument`] owns the document being built. Each page is drawn
//! through a [`PageCanvas`], which only becomes part of the document when
//! handed back to [`InvoiceDocument::finish_page`]; a canvas dropped on an
//! error path leaves the document untouched.

use std::path::Path;
use chrono::Local;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;
use crate::error::Result;
use crate::layout::{PageDimensions, Placement};

/// Resource name of the bold font on every page
pub const BOLD_FONT: &str = "F1";

/// JPEG quality used when embedding rendered invoices
pub const JPEG_QUALITY: u8 = 75;

/// A PDF under construction
pub struct InvoiceDocument {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_id: ObjectId,
    page_size: PageDimensions,
}

impl InvoiceDocument {
    /// Create an empty document with A4 pages
    pub fn new() -> Self {
        Self::with_page_size(PageDimensions::a4())
    }

    /// Create an empty document whose pages have the given size
    pub fn with_page_size(page_size: PageDimensions) -> Self {
        let mut doc = Document::with_version("1.5");
        // Reserve the page tree id so pages can point at their parent
        let pages_id = doc.new_object_id();
        let font_id = use_helvetica_bold_font(&mut doc);

        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            font_id,
            page_size,
        }
    }

    /// Size of every page in this document
    pub fn page_size(&self) -> PageDimensions {
        self.page_size
    }

    /// Number of finished pages
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Start drawing a new page
    pub fn begin_page(&self) -> PageCanvas {
        PageCanvas {
            operations: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }

    /// Close the canvas and append its page to the document
    pub fn finish_page(&mut self, canvas: PageCanvas) -> Result<ObjectId> {
        let content = Content {
            operations: canvas.operations,
        };
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut fonts = Dictionary::new();
        fonts.set(BOLD_FONT, Object::Reference(self.font_id));

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        resources.set("XObject", Object::Dictionary(canvas.xobjects));

        let media_box = self.page_size.media_box();
        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set("MediaBox", Object::Array(vec![
            Object::Real(media_box.x),
            Object::Real(media_box.y),
            Object::Real(media_box.width),
            Object::Real(media_box.height),
        ]));
        page.set("Resources", Object::Dictionary(resources));
        page.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(Object::Dictionary(page));
        self.page_ids.push(page_id);
        debug!("Finished page {}", self.page_ids.len());

        Ok(page_id)
    }

    /// Embed a bitmap as a JPEG image XObject
    fn add_jpeg_image(&mut self, image: &DynamicImage) -> Result<ObjectId> {
        let rgb = image.to_rgb8();
        let mut data = Vec::new();
        JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY).encode_image(&rgb)?;

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(rgb.width() as i64));
        dict.set("Height", Object::Integer(rgb.height() as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

        // Already DCT-compressed
        let stream = Stream::new(dict, data).with_compression(false);
        Ok(self.doc.add_object(Object::Stream(stream)))
    }

    /// Finish the page tree and write the document to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        let mut doc = self.into_document();
        doc.save(path)?;
        Ok(())
    }

    /// Finish the page tree, catalog and info dictionary
    fn into_document(self) -> Document {
        let mut doc = self.doc;

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));

        let created = Local::now().format("D:%Y%m%d%H%M%S").to_string();
        let mut info = Dictionary::new();
        info.set("Producer", Object::String(
            format!("invoice-collect {}", env!("CARGO_PKG_VERSION")).into_bytes(),
            StringFormat::Literal,
        ));
        info.set("CreationDate", Object::String(created.into_bytes(), StringFormat::Literal));
        let info_id = doc.add_object(Object::Dictionary(info));

        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));

        doc.compress();
        doc
    }
}

impl Default for InvoiceDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Drawing context for one page
///
/// Collects content operations and image resources until it is handed to
/// [`InvoiceDocument::finish_page`].
pub struct PageCanvas {
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

impl PageCanvas {
    /// Draw `image` scaled into `placement`
    pub fn draw_image(
        &mut self,
        doc: &mut InvoiceDocument,
        image: &DynamicImage,
        placement: &Placement,
    ) -> Result<()> {
        let image_id = doc.add_jpeg_image(image)?;
        let name = format!("Im{}", self.xobjects.len() + 1);
        self.xobjects.set(name.as_bytes(), Object::Reference(image_id));

        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new("cm", vec![
            Object::Real(placement.width),
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(placement.height),
            Object::Real(placement.x),
            Object::Real(placement.y),
        ]));
        self.operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        self.operations.push(Operation::new("Q", vec![]));

        Ok(())
    }

    /// Write a line of text in the bold font with its origin at (x, y)
    pub fn show_text(&mut self, text: &str, font_size: f32, x: f32, y: f32) {
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new("Tf", vec![
            Object::Name(BOLD_FONT.as_bytes().to_vec()),
            Object::Real(font_size),
        ]));
        self.operations.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        self.operations.push(Operation::new("ET", vec![]));
    }
}

/// Register Helvetica-Bold, one of the 14 standard PDF fonts
fn use_helvetica_bold_font(doc: &mut Document) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica-Bold".to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

    doc.add_object(Object::Dictionary(font))
}
