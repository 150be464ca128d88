//! Page layout calculations
//!
//! All coordinates are PDF points with the origin at the bottom-left
//! corner of the page.

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f32 {
        (self.0 * 72.0 / 25.4) as f32
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: Length::from_mm(210.0),
            height: Length::from_mm(297.0),
        }
    }

    /// The full page box
    pub fn media_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width.pt(), self.height.pt())
    }
}

/// Offsets applied inside the page box, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    /// Create padding with same value on all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// A box given by its lower-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Where a scaled image is drawn on the page
pub type Placement = Rect;

/// Compute the two image boxes of a two-up page
///
/// Both boxes share the padded width. Their height is half the page minus
/// the vertical padding, and the second box starts half a page above the
/// first. The offsets are taken from the full page height rather than from
/// an even split of the padded content area.
pub fn half_boxes(page: &PageDimensions, padding: &Padding) -> (Rect, Rect) {
    let page_box = page.media_box();
    let width = page_box.width - padding.left - padding.right;
    let height = page_box.height / 2.0 - padding.top - padding.bottom;

    let top = Rect::new(padding.left, padding.top, width, height);
    let bottom = Rect::new(
        padding.left,
        padding.top + page_box.height / 2.0,
        width,
        height,
    );

    (top, bottom)
}

/// Scale an image uniformly into `target` and anchor it to the far corner
///
/// The scale factor is `min(box_w / img_w, box_h / img_h)`, so the image
/// always fits. Any slack is left before the image on both axes.
pub fn fit_in_box(target: &Rect, image_width: f32, image_height: f32) -> Placement {
    let scale = (target.width / image_width).min(target.height / image_height);
    let width = image_width * scale;
    let height = image_height * scale;

    Rect::new(
        target.width - width + target.x,
        target.height - height + target.y,
        width,
        height,
    )
}
