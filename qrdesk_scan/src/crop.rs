use std::io::Cursor;

use image::{imageops, ImageError, ImageFormat, RgbaImage};

use qrdesk_core::EncodedImage;

use crate::decode::Quad;

/// Axis-aligned region of the source image. Coordinates are signed: a padded region may start before the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl CropRegion {
    /// Bounding box of `quad` grown by `padding` on every side, with no regard for the image bounds.
    /// # Example
    /// ```
    /// use qrdesk_scan::{CropRegion, Point, Quad};
    /// let quad = Quad([Point::new(5, 20), Point::new(50, 20), Point::new(50, 60), Point::new(5, 60)]);
    /// let region = CropRegion::padded(&quad, 10);
    /// assert_eq!(region, CropRegion { x: -5, y: 10, width: 65, height: 60 });
    /// ```
    pub fn padded(quad: &Quad, padding: u32) -> Self {
        let padding = i64::from(padding);
        let (min_x, max_x) = quad.x_span();
        let (min_y, max_y) = quad.y_span();
        Self {
            x: i64::from(min_x) - padding,
            y: i64::from(min_y) - padding,
            width: i64::from(max_x) - i64::from(min_x) + 2 * padding,
            height: i64::from(max_y) - i64::from(min_y) + 2 * padding,
        }
    }

    /// Whether the region lies entirely inside a `width`×`height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= i64::from(width)
            && self.y + self.height <= i64::from(height)
    }

    /// Intersect the region with a `width`×`height` image. Returns `None` if nothing is left.
    pub fn clamped(&self, width: u32, height: u32) -> Option<Self> {
        let x0 = self.x.clamp(0, i64::from(width));
        let y0 = self.y.clamp(0, i64::from(height));
        let x1 = (self.x + self.width).clamp(0, i64::from(width));
        let y1 = (self.y + self.height).clamp(0, i64::from(height));
        (x1 > x0 && y1 > y0).then_some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Cut the part of `source` around `quad` out and encode it as PNG. The padded region is clamped to the source; `None`
/// means it does not overlap the source at all.
pub fn crop_preview(
    source: &RgbaImage,
    quad: &Quad,
    padding: u32,
) -> Result<Option<EncodedImage>, ImageError> {
    let (width, height) = source.dimensions();
    let padded = CropRegion::padded(quad, padding);
    let Some(region) = padded.clamped(width, height) else {
        return Ok(None);
    };
    if !padded.fits_within(width, height) {
        tracing::debug!(?padded, ?region, "clamped crop region to the source image");
    }
    // Clamping keeps every coordinate within `0..=u32::MAX`.
    let cropped = imageops::crop_imm(
        source,
        region.x as u32,
        region.y as u32,
        region.width as u32,
        region.height as u32,
    )
    .to_image();
    let mut png = Vec::new();
    cropped.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(Some(EncodedImage::new(cropped.width(), cropped.height(), png)))
}
