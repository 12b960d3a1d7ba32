//! Desktop QR toolkit: a generator turning text into QR symbols and a scanner reading them back from images.

pub use qrdesk_core as common;
pub use qrdesk_generate as generate;
pub use qrdesk_scan as scan;

pub use qrdesk_core::{Ecl, ModuleMatrix};
pub use qrdesk_generate::{GeneratorConfig, GeneratorController, QrcodeEncoder};
pub use qrdesk_scan::{RqrrDecoder, ScannerConfig, ScannerController};
