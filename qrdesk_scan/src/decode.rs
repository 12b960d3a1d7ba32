use image::{GrayImage, ImageError, RgbaImage};
use itertools::Itertools;

/// Pixel position in the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Corners of a located symbol, as reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Smallest and largest x coordinate of the corners.
    pub fn x_span(&self) -> (i32, i32) {
        span(self.0.iter().map(|point| point.x))
    }

    /// Smallest and largest y coordinate of the corners.
    pub fn y_span(&self) -> (i32, i32) {
        span(self.0.iter().map(|point| point.y))
    }
}

fn span<I: Iterator<Item = i32>>(values: I) -> (i32, i32) {
    values.minmax().into_option().unwrap_or((0, 0))
}

/// A decoded symbol: its payload and where it was found. There is never one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub location: Quad,
}

/// Which polarities the decoder looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionAttempts {
    /// Dark modules on a light background only.
    DontInvert,
    /// Light modules on a dark background only.
    OnlyInvert,
    /// Both, dark-on-light first.
    AttemptBoth,
}

impl InversionAttempts {
    fn passes(self) -> &'static [bool] {
        match self {
            Self::DontInvert => &[false],
            Self::OnlyInvert => &[true],
            Self::AttemptBoth => &[false, true],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to decode QR code: {0}")]
    Decoder(String),
}

/// Something able to find and read a QR symbol in a bitmap.
pub trait SymbolDecoder {
    /// Look for a symbol in `pixels`. `Ok(None)` means no symbol could be read, damaged ones included; an error
    /// means the decoder itself failed.
    fn decode(
        &self,
        pixels: &RgbaImage,
        inversion: InversionAttempts,
    ) -> Result<Option<Decoded>, DecodeError>;
}

/// Decoder backed by the `rqrr` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_pass(luma: &GrayImage, inverted: bool) -> Option<Decoded> {
        let (width, height) = luma.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                let value = luma.get_pixel(x as u32, y as u32)[0];
                if inverted {
                    u8::MAX - value
                } else {
                    value
                }
            });
        let grids = prepared.detect_grids();
        tracing::debug!(grids = grids.len(), inverted, "detected candidate grids");
        for grid in grids {
            match grid.decode() {
                Ok((_, text)) => {
                    let location = Quad(grid.bounds.map(|corner| Point::new(corner.x, corner.y)));
                    return Some(Decoded { text, location });
                }
                // A damaged symbol is no symbol.
                Err(err) => tracing::debug!(%err, "grid did not decode"),
            }
        }
        None
    }
}

impl SymbolDecoder for RqrrDecoder {
    fn decode(
        &self,
        pixels: &RgbaImage,
        inversion: InversionAttempts,
    ) -> Result<Option<Decoded>, DecodeError> {
        let luma = image::imageops::grayscale(pixels);
        Ok(inversion
            .passes()
            .iter()
            .find_map(|&inverted| Self::decode_pass(&luma, inverted)))
    }
}

/// Draw encoded image `bytes` (PNG, JPEG, ...) onto an RGBA bitmap.
pub fn load_pixels(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
pub(crate) mod test {
    use image::{imageops, Rgba};
    use qrdesk_core::{Ecl, ModuleMatrix};
    use qrdesk_generate::{rasterize, QrcodeEncoder, SymbolEncoder};

    use super::*;

    fn symbol(text: &str, scale: u32) -> RgbaImage {
        let matrix = QrcodeEncoder::new().encode(text.as_bytes(), Ecl::M).unwrap();
        let gray = rasterize(&matrix, scale, 4);
        image::DynamicImage::ImageLuma8(gray).to_rgba8()
    }

    /// Symbol whose data area is overwritten with a checkerboard. The finder patterns survive.
    pub(crate) fn damaged_matrix(text: &str) -> ModuleMatrix {
        let matrix = QrcodeEncoder::new().encode(text.as_bytes(), Ecl::L).unwrap();
        let size = matrix.size();
        let damaged = (size / 4)..(size - size / 4);
        ModuleMatrix::from_fn(size, |row, col| {
            if damaged.contains(&row) && damaged.contains(&col) {
                (row + col) % 2 == 0
            } else {
                matrix.is_dark(row, col)
            }
        })
    }

    fn inverted(image: &RgbaImage) -> RgbaImage {
        let mut image = image.clone();
        imageops::invert(&mut image);
        image
    }

    #[test]
    fn test_quad_spans() {
        let quad = Quad([
            Point::new(10, 12),
            Point::new(50, 8),
            Point::new(52, 49),
            Point::new(9, 51),
        ]);
        assert_eq!(quad.x_span(), (9, 52));
        assert_eq!(quad.y_span(), (8, 51));
    }

    #[test]
    fn test_decodes_dark_on_light() {
        let image = symbol("https://example.com", 6);
        let decoded = RqrrDecoder::new()
            .decode(&image, InversionAttempts::DontInvert)
            .unwrap()
            .unwrap();
        assert_eq!(decoded.text, "https://example.com");
        let (min_x, max_x) = decoded.location.x_span();
        assert!(min_x >= 0 && (max_x as u32) <= image.width());
        assert!(max_x - min_x > 0);
    }

    #[test]
    fn test_blank_image_has_no_symbol() {
        let image = RgbaImage::from_pixel(120, 80, Rgba([255, 255, 255, 255]));
        let result = RqrrDecoder::new().decode(&image, InversionAttempts::AttemptBoth);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_damaged_symbol_is_not_found() {
        let matrix = damaged_matrix("a payload long enough for a version 3 symbol");
        let image = image::DynamicImage::ImageLuma8(rasterize(&matrix, 6, 4)).to_rgba8();
        let result = RqrrDecoder::new().decode(&image, InversionAttempts::AttemptBoth);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_light_on_dark_needs_inversion() {
        let image = inverted(&symbol("negative", 6));
        let decoder = RqrrDecoder::new();
        assert!(!matches!(
            decoder.decode(&image, InversionAttempts::DontInvert),
            Ok(Some(_))
        ));
        let decoded = decoder
            .decode(&image, InversionAttempts::OnlyInvert)
            .unwrap()
            .unwrap();
        assert_eq!(decoded.text, "negative");
        let decoded = decoder
            .decode(&image, InversionAttempts::AttemptBoth)
            .unwrap()
            .unwrap();
        assert_eq!(decoded.text, "negative");
    }

    #[test]
    fn test_load_pixels_rejects_garbage() {
        assert!(load_pixels(b"definitely not an image").is_err());
    }
}
