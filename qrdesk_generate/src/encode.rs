use qrcode::{Color, EcLevel, QrCode};

use qrdesk_core::{Ecl, ModuleMatrix};

/// Something able to turn bytes into a QR module matrix.
pub trait SymbolEncoder {
    /// Encode `data` at error correction level `ecl`.
    fn encode(&self, data: &[u8], ecl: Ecl) -> Result<ModuleMatrix, EncodeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("cannot encode {len} B of data with ECL {ecl}: {reason}")]
    Rejected {
        len: usize,
        ecl: Ecl,
        reason: String,
    },
}

/// Choose the error correction level for a payload of `byte_len` bytes: short payloads get the most robust level,
/// large ones trade robustness for capacity.
/// # Example
/// ```
/// use qrdesk_core::Ecl;
/// use qrdesk_generate::choose_error_correction;
/// assert_eq!(choose_error_correction(50), Ecl::H);
/// assert_eq!(choose_error_correction(600), Ecl::L);
/// ```
pub fn choose_error_correction(byte_len: usize) -> Ecl {
    match byte_len {
        501.. => Ecl::L,
        201..=500 => Ecl::M,
        101..=200 => Ecl::Q,
        _ => Ecl::H,
    }
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

impl QrcodeEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolEncoder for QrcodeEncoder {
    fn encode(&self, data: &[u8], ecl: Ecl) -> Result<ModuleMatrix, EncodeError> {
        let code = QrCode::with_error_correction_level(data, ec_level(ecl)).map_err(|err| {
            EncodeError::Rejected {
                len: data.len(),
                ecl,
                reason: err.to_string(),
            }
        })?;
        let width = code.width();
        let colors = code.to_colors();
        Ok(ModuleMatrix::from_fn(width, |row, col| {
            colors[row * width + col] == Color::Dark
        }))
    }
}

fn ec_level(ecl: Ecl) -> EcLevel {
    match ecl {
        Ecl::L => EcLevel::L,
        Ecl::M => EcLevel::M,
        Ecl::Q => EcLevel::Q,
        Ecl::H => EcLevel::H,
    }
}

/// Encode `text` byte for byte (UTF-8, multi-byte characters untouched) at the level chosen from its length.
pub fn encode_text<E: SymbolEncoder + ?Sized>(
    encoder: &E,
    text: &str,
) -> Result<(Ecl, ModuleMatrix), EncodeError> {
    let bytes = text.as_bytes();
    let ecl = choose_error_correction(bytes.len());
    tracing::debug!(bytes = bytes.len(), %ecl, "encoding text");
    let matrix = encoder.encode(bytes, ecl)?;
    Ok((ecl, matrix))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_correction_steps() {
        #[rustfmt::skip]
        let cases = [
            (0, Ecl::H), (50, Ecl::H), (100, Ecl::H),
            (101, Ecl::Q), (150, Ecl::Q), (200, Ecl::Q),
            (201, Ecl::M), (300, Ecl::M), (500, Ecl::M),
            (501, Ecl::L), (600, Ecl::L), (5000, Ecl::L),
        ];
        for (len, expected) in cases {
            assert_eq!(choose_error_correction(len), expected, "byte length {}", len);
        }
    }

    #[test]
    fn test_error_correction_is_monotonic() {
        let levels: Vec<Ecl> = (0..1000).map(choose_error_correction).collect();
        assert!(levels.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_qrcode_encoder_matrix() {
        let matrix = QrcodeEncoder::new().encode(b"HELLO", Ecl::H).unwrap();
        // Version 1 symbol.
        assert_eq!(matrix.size(), 21);
        // Top-left finder pattern: dark ring, light ring, dark core.
        assert!(matrix.is_dark(0, 0) && matrix.is_dark(0, 6) && matrix.is_dark(6, 0));
        assert!(!matrix.is_dark(1, 1) && !matrix.is_dark(5, 5));
        assert!(matrix.is_dark(3, 3));
    }

    #[test]
    fn test_qrcode_encoder_rejects_oversized_payload() {
        let data = vec![0xffu8; 3000];
        let err = QrcodeEncoder::new().encode(&data, Ecl::H).unwrap_err();
        assert!(matches!(err, EncodeError::Rejected { len: 3000, ecl: Ecl::H, .. }));
    }

    #[test]
    fn test_encode_text_uses_byte_length() {
        // 30 emoji are 30 characters but 120 bytes.
        let text = "😀".repeat(30);
        let (ecl, matrix) = encode_text(&QrcodeEncoder::new(), &text).unwrap();
        assert_eq!(ecl, Ecl::Q);
        assert!(matrix.size() > 21);
    }
}
