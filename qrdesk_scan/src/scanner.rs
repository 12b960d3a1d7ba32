use std::rc::Rc;
use std::time::Duration;

use image::{ImageError, RgbaImage};

use qrdesk_core::{
    Alerts, BindError, Button, Clipboard, Document, DocumentExt, Element, FileInput, ImageView,
    TextField, Timer,
};

use crate::crop::crop_preview;
use crate::decode::{load_pixels, DecodeError, Decoded, InversionAttempts, Quad, SymbolDecoder};
use crate::source::{ImageFile, ImageSource};

pub const NO_QR_CODE: &str = "No QR code found";
const NOT_AN_IMAGE: &str = "Please select an image file.";
const COPY_FAILED: &str = "Failed to copy to clipboard";
const COPIED: &str = "Copied!";
/// Class of the drop area while something is dragged over it.
pub const HIGHLIGHT: &str = "highlight";

/// Element ids and constants a [ScannerController] is bound with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub drop_area_id: String,
    pub file_input_id: String,
    pub preview_id: String,
    pub preview_area_id: String,
    pub result_text_id: String,
    pub copy_btn_id: String,
    pub clear_btn_id: String,
    /// Margin kept around the located symbol in the preview, in pixels.
    pub crop_padding: u32,
    /// How long the copy button reads "Copied!".
    pub copied_feedback: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            drop_area_id: "drop-area".into(),
            file_input_id: "file-input".into(),
            preview_id: "preview".into(),
            preview_area_id: "preview-area".into(),
            result_text_id: "result-text".into(),
            copy_btn_id: "copy-btn".into(),
            clear_btn_id: "clear-btn".into(),
            crop_padding: 10,
            copied_feedback: Duration::from_secs(2),
        }
    }
}

impl ScannerConfig {
    pub fn with_crop_padding(mut self, padding: u32) -> Self {
        self.crop_padding = padding;
        self
    }
}

/// User interactions the host forwards to the scanner.
#[derive(Debug, Clone)]
pub enum ScannerEvent {
    DragEnter,
    DragLeave,
    Drop(Vec<ImageFile>),
    FileSelected(Option<ImageFile>),
    Paste(Vec<ImageFile>),
    /// The user edited the result field.
    ResultInput,
    CopyClicked,
    ClearClicked,
}

/// Deferred work scheduled by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerTimeout {
    /// Put the copy button label back, unless a later copy restarted the feedback.
    RestoreCopyLabel(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Could not read image: {0}")]
    Image(#[from] ImageError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// What happened to an image handed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Decoded(Decoded),
    NotFound,
    /// Decoding failed; the message is what the result field shows.
    Failed(String),
    /// The file was not an image.
    Rejected,
    /// There was nothing to scan.
    Ignored,
}

/// Decodes QR symbols from dropped, picked or pasted images.
pub struct ScannerController<D, C, A, T> {
    config: ScannerConfig,
    decoder: D,
    clipboard: C,
    alerts: A,
    timer: T,
    drop_area: Rc<dyn Element>,
    file_input: Rc<dyn FileInput>,
    preview: Rc<dyn ImageView>,
    preview_area: Rc<dyn Element>,
    result: Rc<dyn TextField>,
    copy_btn: Rc<dyn Button>,
    clear_btn: Rc<dyn Button>,
    copy_label: String,
    copy_generation: u64,
}

impl<D, C, A, T> ScannerController<D, C, A, T>
where
    D: SymbolDecoder,
    C: Clipboard,
    A: Alerts,
    T: Timer<ScannerTimeout>,
{
    /// Bind a new controller to the elements of `document` named by `config`.
    pub fn bind<Doc: Document + ?Sized>(
        document: &Doc,
        config: ScannerConfig,
        decoder: D,
        clipboard: C,
        alerts: A,
        timer: T,
    ) -> Result<Self, BindError> {
        let copy_btn = document.require_button(&config.copy_btn_id)?;
        let controller = Self {
            drop_area: document.require_element(&config.drop_area_id)?,
            file_input: document.require_file_input(&config.file_input_id)?,
            preview: document.require_image_view(&config.preview_id)?,
            preview_area: document.require_element(&config.preview_area_id)?,
            result: document.require_text_field(&config.result_text_id)?,
            clear_btn: document.require_button(&config.clear_btn_id)?,
            copy_label: copy_btn.label(),
            copy_btn,
            copy_generation: 0,
            config,
            decoder,
            clipboard,
            alerts,
            timer,
        };
        controller.hide_preview();
        controller.update_buttons();
        Ok(controller)
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn handle(&mut self, event: ScannerEvent) {
        match event {
            ScannerEvent::DragEnter => self.drop_area.toggle_class(HIGHLIGHT, true),
            ScannerEvent::DragLeave => self.drop_area.toggle_class(HIGHLIGHT, false),
            ScannerEvent::Drop(files) => {
                self.drop_area.toggle_class(HIGHLIGHT, false);
                self.accept_image(ImageSource::Drop(files));
            }
            ScannerEvent::FileSelected(file) => {
                self.accept_image(ImageSource::Picker(file));
            }
            ScannerEvent::Paste(items) => {
                self.accept_image(ImageSource::Paste(items));
            }
            ScannerEvent::ResultInput => self.update_buttons(),
            ScannerEvent::CopyClicked => self.copy_result(),
            ScannerEvent::ClearClicked => self.clear(),
        }
    }

    /// Take an image from any intake path and scan it. Non-image files are rejected with an alert.
    pub fn accept_image(&mut self, source: ImageSource) -> ScanOutcome {
        match source.into_image() {
            Ok(Some(file)) => self.scan(&file),
            Ok(None) => ScanOutcome::Ignored,
            Err(err) => {
                tracing::info!(%err, "rejected dropped file");
                self.alerts.alert(NOT_AN_IMAGE);
                ScanOutcome::Rejected
            }
        }
    }

    /// Decode `file` and show the result. The latest scan always replaces what a previous one showed.
    pub fn scan(&mut self, file: &ImageFile) -> ScanOutcome {
        let outcome = match self.decode(file) {
            Ok(Some((pixels, decoded))) => {
                tracing::info!(file = %file.name, len = decoded.text.len(), "decoded QR code");
                self.result.set_value(&decoded.text);
                self.show_preview(&pixels, &decoded.location);
                ScanOutcome::Decoded(decoded)
            }
            Ok(None) => {
                self.result.set_value(NO_QR_CODE);
                self.hide_preview();
                ScanOutcome::NotFound
            }
            Err(err) => {
                tracing::warn!(file = %file.name, %err, "scan failed");
                let message = err.to_string();
                self.result.set_value(&message);
                self.hide_preview();
                ScanOutcome::Failed(message)
            }
        };
        self.update_buttons();
        outcome
    }

    /// Copy the result text to the clipboard.
    pub fn copy_result(&mut self) {
        let text = self.result.value();
        if text.trim().is_empty() {
            return;
        }
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.copy_generation += 1;
                self.copy_btn.set_label(COPIED);
                self.timer.set_timeout(
                    self.config.copied_feedback,
                    ScannerTimeout::RestoreCopyLabel(self.copy_generation),
                );
            }
            Err(err) => {
                tracing::warn!(%err, "clipboard write failed");
                self.alerts.alert(COPY_FAILED);
            }
        }
    }

    /// Empty the result, hide the preview and reset the file picker.
    pub fn clear(&mut self) {
        self.result.set_value("");
        self.hide_preview();
        self.file_input.reset();
        self.update_buttons();
    }

    pub fn on_timeout(&mut self, timeout: ScannerTimeout) {
        match timeout {
            ScannerTimeout::RestoreCopyLabel(generation) if generation == self.copy_generation => {
                self.copy_btn.set_label(&self.copy_label)
            }
            ScannerTimeout::RestoreCopyLabel(_) => {}
        }
    }

    fn decode(&self, file: &ImageFile) -> Result<Option<(RgbaImage, Decoded)>, ScanError> {
        let pixels = load_pixels(&file.bytes)?;
        tracing::debug!(width = pixels.width(), height = pixels.height(), "scanning image");
        // Only dark-on-light symbols are looked for.
        let decoded = self
            .decoder
            .decode(&pixels, InversionAttempts::DontInvert)?;
        Ok(decoded.map(|decoded| (pixels, decoded)))
    }

    fn show_preview(&self, pixels: &RgbaImage, location: &Quad) {
        match crop_preview(pixels, location, self.config.crop_padding) {
            Ok(Some(image)) => {
                self.preview.set_image(Some(image));
                self.preview_area.set_hidden(false);
            }
            Ok(None) => self.hide_preview(),
            Err(err) => {
                tracing::warn!(%err, "could not encode preview");
                self.hide_preview();
            }
        }
    }

    fn hide_preview(&self) {
        self.preview.set_image(None);
        self.preview_area.set_hidden(true);
    }

    fn update_buttons(&self) {
        let empty = self.result.value().trim().is_empty();
        self.copy_btn.set_disabled(empty);
        self.clear_btn.set_disabled(empty);
    }
}
