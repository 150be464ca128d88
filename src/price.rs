//! Price extraction from invoice QR codes
//!
//! An invoice QR payload is a comma-separated record with the amount in
//! the fifth field, e.g. `01,10,code,number,12.50,20240101,...`. Nothing
//! else about the payload is validated.

use image::DynamicImage;
use thiserror::Error;
use tracing::{debug, warn};

/// Zero-based position of the price in the QR payload
pub const PRICE_FIELD: usize = 4;

/// Why a price could not be read from an image
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    /// No QR code could be detected and decoded
    #[error("no QR code found")]
    NoQrCode,

    /// The payload has too few comma-separated fields
    #[error("QR payload has {fields} fields, price field missing")]
    MissingField { fields: usize },

    /// The price field is not a finite number
    #[error("price field is not a number: {0:?}")]
    InvalidNumber(String),
}

/// Outcome of looking up the price on one invoice
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookup {
    Found(f32),
    NotFound(PriceError),
}

impl PriceLookup {
    /// Collapse to a plain amount, using 0.0 when nothing was found
    ///
    /// A genuine zero price cannot be told apart from a failed lookup.
    pub fn value(&self) -> f32 {
        match self {
            PriceLookup::Found(price) => *price,
            PriceLookup::NotFound(_) => 0.0,
        }
    }
}

/// Parse the price out of a decoded QR payload
pub fn parse_price_payload(payload: &str) -> Result<f32, PriceError> {
    let fields: Vec<&str> = payload.split(',').collect();
    let field = fields
        .get(PRICE_FIELD)
        .ok_or(PriceError::MissingField { fields: fields.len() })?;

    match field.trim().parse::<f32>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(PriceError::InvalidNumber(field.to_string())),
    }
}

/// Decode the first readable QR code in `image`
pub fn decode_qr(image: &DynamicImage) -> Option<String> {
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    prepared
        .detect_grids()
        .into_iter()
        .find_map(|grid| match grid.decode() {
            Ok((_meta, content)) => Some(content),
            Err(e) => {
                debug!("QR grid found but not decodable: {:?}", e);
                None
            }
        })
}

/// Decode the QR code in `image` and read its price
pub fn decode_price(image: &DynamicImage) -> Result<f32, PriceError> {
    let payload = decode_qr(image).ok_or(PriceError::NoQrCode)?;
    parse_price_payload(&payload)
}

/// Look up the price of one invoice image
pub fn lookup_price(image: &DynamicImage) -> PriceLookup {
    match decode_price(image) {
        Ok(price) => PriceLookup::Found(price),
        Err(e) => PriceLookup::NotFound(e),
    }
}

/// Read the price of an invoice, falling back to 0.0
///
/// Never fails: any problem is logged with `source` and yields 0.0.
pub fn extract_price(image: &DynamicImage, source: &str) -> f32 {
    let lookup = lookup_price(image);
    match &lookup {
        PriceLookup::Found(price) => debug!("Price {} read from {}", price, source),
        PriceLookup::NotFound(reason) => warn!("Can not get price from: {} ({})", source, reason),
    }
    lookup.value()
}
