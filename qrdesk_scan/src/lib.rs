//! QR code scanner: takes an image from a drop, the file picker or a paste, decodes it through a [SymbolDecoder] and
//! previews the located symbol.

mod crop;
mod decode;
pub mod headless;
mod scanner;
mod source;

pub use crop::{crop_preview, CropRegion};
pub use decode::{
    load_pixels, DecodeError, Decoded, InversionAttempts, Point, Quad, RqrrDecoder, SymbolDecoder,
};
pub use scanner::{
    ScanError, ScanOutcome, ScannerConfig, ScannerController, ScannerEvent, ScannerTimeout,
    HIGHLIGHT, NO_QR_CODE,
};
pub use source::{ImageFile, ImageSource, IntakeError};
