//! QR code generator: validates text, encodes it through a [SymbolEncoder] and renders the resulting module matrix.

mod encode;
mod generator;
pub mod headless;
mod render;
mod validate;

pub use encode::{choose_error_correction, encode_text, EncodeError, QrcodeEncoder, SymbolEncoder};
pub use generator::{
    GeneratorConfig, GeneratorController, GeneratorEvent, GeneratorTimeout, MessageKind,
};
pub use render::{rasterize, AsciiRenderer, SvgRenderer};
pub use validate::{truncate, validate, Capacity, ValidationError};
