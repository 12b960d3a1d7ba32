use std::rc::Rc;
use std::time::Duration;

use qrdesk_core::{
    BindError, Clipboard, Container, Document, DocumentExt, Element, ModuleMatrix, Node, Svg,
    TextBlock, TextField, Timer,
};

use crate::encode::{encode_text, SymbolEncoder};
use crate::render::SvgRenderer;
use crate::validate::{truncate, validate, ValidationError};

const GENERATE_FAILED: &str = "Failed to generate QR code. The text may be too long.";
const PASTE_FAILED: &str = "Failed to read from clipboard. Please check permissions.";

/// Element ids and constants a [GeneratorController] is bound with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub text_input_id: String,
    pub qr_code_container_id: String,
    pub generate_btn_id: String,
    pub paste_btn_id: String,
    pub clear_btn_id: String,
    pub message_id: String,
    /// Maximum text length, in characters.
    pub max_length: usize,
    /// Side of the rendered symbol, in user units.
    pub canvas_size: u32,
    /// How long a message stays visible.
    pub message_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            text_input_id: "text-input".into(),
            qr_code_container_id: "qr-code".into(),
            generate_btn_id: "generate-btn".into(),
            paste_btn_id: "paste-btn".into(),
            clear_btn_id: "clear-btn".into(),
            message_id: "qr-message".into(),
            max_length: 1000,
            canvas_size: 200,
            message_timeout: Duration::from_secs(5),
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_canvas_size(mut self, canvas_size: u32) -> Self {
        self.canvas_size = canvas_size;
        self
    }
}

/// User interactions the host forwards to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorEvent {
    Input,
    GenerateClicked,
    PasteClicked,
    ClearClicked,
}

/// Deferred work scheduled by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorTimeout {
    /// Clear the message shown with the given generation, unless a newer one replaced it.
    ClearMessage(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Warning,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Turns the text of an input field into a rendered QR symbol.
pub struct GeneratorController<E, C, T> {
    config: GeneratorConfig,
    encoder: E,
    clipboard: C,
    timer: T,
    input: Rc<dyn TextField>,
    container: Rc<dyn Container>,
    message: Rc<dyn TextBlock>,
    message_generation: u64,
    matrix: Option<ModuleMatrix>,
    symbol: Option<Svg>,
}

impl<E, C, T> GeneratorController<E, C, T>
where
    E: SymbolEncoder,
    C: Clipboard,
    T: Timer<GeneratorTimeout>,
{
    /// Bind a new controller to the elements of `document` named by `config`.
    pub fn bind<D: Document + ?Sized>(
        document: &D,
        config: GeneratorConfig,
        encoder: E,
        clipboard: C,
        timer: T,
    ) -> Result<Self, BindError> {
        let input = document.require_text_field(&config.text_input_id)?;
        let container = document.require_container(&config.qr_code_container_id)?;
        let message = document.require_text_block(&config.message_id)?;
        // Clicks on these are routed by the host through `handle`.
        for id in [
            &config.generate_btn_id,
            &config.paste_btn_id,
            &config.clear_btn_id,
        ] {
            document.require_button(id)?;
        }
        message.set_hidden(true);
        Ok(Self {
            config,
            encoder,
            clipboard,
            timer,
            input,
            container,
            message,
            message_generation: 0,
            matrix: None,
            symbol: None,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The symbol currently on display.
    pub fn symbol(&self) -> Option<&Svg> {
        self.symbol.as_ref()
    }

    /// The module matrix of the symbol currently on display.
    pub fn matrix(&self) -> Option<&ModuleMatrix> {
        self.matrix.as_ref()
    }

    pub async fn handle(&mut self, event: GeneratorEvent) {
        match event {
            GeneratorEvent::Input => self.on_input(),
            GeneratorEvent::GenerateClicked => self.generate(),
            GeneratorEvent::PasteClicked => self.paste_text().await,
            GeneratorEvent::ClearClicked => self.clear(),
        }
    }

    /// Validate the current text, showing the too-long error or the near-limit warning.
    pub fn on_input(&mut self) {
        match validate(&self.input.value(), self.config.max_length) {
            Err(ValidationError::Empty) => self.clear_message(),
            Err(err) => self.show_message(MessageKind::Error, &err.to_string()),
            Ok(capacity) => match capacity.warning() {
                Some(warning) => self.show_message(MessageKind::Warning, &warning),
                None => self.clear_message(),
            },
        }
    }

    /// Encode the current text and replace any rendered symbol with the new one.
    pub fn generate(&mut self) {
        let text = self.input.value();
        if let Err(err) = validate(&text, self.config.max_length) {
            self.remove_symbol();
            self.show_message(MessageKind::Error, &err.to_string());
            return;
        }
        match encode_text(&self.encoder, &text) {
            Ok((ecl, matrix)) => {
                let svg = SvgRenderer::new(self.config.canvas_size).render(&matrix);
                tracing::debug!(%ecl, modules = matrix.size(), "rendered symbol");
                self.container.replace_children(vec![Node::Svg(svg.clone())]);
                self.symbol = Some(svg);
                self.matrix = Some(matrix);
                self.clear_message();
            }
            Err(err) => {
                tracing::warn!(%err, "symbol encoding failed");
                self.remove_symbol();
                self.show_message(MessageKind::Error, GENERATE_FAILED);
            }
        }
    }

    /// Replace the text with the clipboard contents, cut to the maximum length.
    pub async fn paste_text(&mut self) {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "clipboard read failed");
                self.show_message(MessageKind::Error, PASTE_FAILED);
                return;
            }
        };
        let max = self.config.max_length;
        let truncated = truncate(&text, max);
        self.input.set_value(truncated.unwrap_or(&text));
        self.on_input();
        if truncated.is_some() {
            self.show_message(
                MessageKind::Warning,
                &format!("Text truncated to {} characters", max),
            );
        }
    }

    /// Reset the text, the symbol and the message.
    pub fn clear(&mut self) {
        self.input.set_value("");
        self.remove_symbol();
        self.clear_message();
    }

    pub fn on_timeout(&mut self, timeout: GeneratorTimeout) {
        match timeout {
            GeneratorTimeout::ClearMessage(generation) if generation == self.message_generation => {
                self.clear_message()
            }
            GeneratorTimeout::ClearMessage(_) => {}
        }
    }

    fn remove_symbol(&mut self) {
        self.container.clear();
        self.symbol = None;
        self.matrix = None;
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.message_generation += 1;
        self.message.set_text(text);
        self.message.toggle_class(MessageKind::Error.class(), kind == MessageKind::Error);
        self.message.toggle_class(MessageKind::Warning.class(), kind == MessageKind::Warning);
        self.message.set_hidden(false);
        self.timer.set_timeout(
            self.config.message_timeout,
            GeneratorTimeout::ClearMessage(self.message_generation),
        );
    }

    fn clear_message(&mut self) {
        self.message.set_text("");
        self.message.toggle_class(MessageKind::Error.class(), false);
        self.message.toggle_class(MessageKind::Warning.class(), false);
        self.message.set_hidden(true);
    }
}
