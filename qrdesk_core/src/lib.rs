//! Types shared by the qrdesk generator and scanner: module matrices, error correction levels and the
//! capabilities a controller is bound to.

pub mod dom;
mod ecl;
pub mod headless;
pub mod host;
mod image;
mod matrix;
mod vector;

pub use dom::{
    BindError, Button, Container, Document, DocumentExt, Element, FileInput, ImageView, TextBlock,
    TextField,
};
pub use ecl::Ecl;
pub use host::{Alerts, Clipboard, ClipboardError, Timer};
pub use image::EncodedImage;
pub use matrix::{Module, ModuleMatrix};
pub use vector::{ModuleRect, Node, Svg};
