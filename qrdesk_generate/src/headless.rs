//! In-memory page for hosts without a real document, such as the CLI and tests.

use qrdesk_core::headless::{ElementKind, HeadlessDocument};

use crate::generator::GeneratorConfig;

/// Build a [HeadlessDocument] holding every element `config` refers to.
pub fn document_for(config: &GeneratorConfig) -> HeadlessDocument {
    HeadlessDocument::new()
        .with(&config.text_input_id, ElementKind::TextField)
        .with(&config.qr_code_container_id, ElementKind::Container)
        .with(&config.generate_btn_id, ElementKind::Button)
        .with(&config.paste_btn_id, ElementKind::Button)
        .with(&config.clear_btn_id, ElementKind::Button)
        .with(&config.message_id, ElementKind::TextBlock)
}

#[cfg(test)]
mod test {
    use qrdesk_core::DocumentExt;

    use super::*;

    #[test]
    fn test_document_follows_config() {
        let config = GeneratorConfig {
            message_id: "status".into(),
            ..GeneratorConfig::default()
        };
        let document = document_for(&config);
        assert!(document.require_text_block("status").is_ok());
        assert!(document.require_text_field("text-input").is_ok());
        assert!(document.get("qr-message").is_none());
    }
}
