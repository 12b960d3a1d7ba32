use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine};
use tokio::io::AsyncReadExt;

use qrdesk_core::{Alerts, Clipboard, ClipboardError};

/// Clipboard of a terminal session: pasting reads stdin, copying emits an OSC 52 sequence on stderr.
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        Ok(trim_newline(&text).to_owned())
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "\x1b]52;c;{}\x07", STANDARD.encode(text))
            .and_then(|()| stderr.flush())
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }
}

/// Alerts printed on stderr.
pub struct StderrAlerts;

impl Alerts for StderrAlerts {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Drop the line terminator left by `echo` and friends.
pub fn trim_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
