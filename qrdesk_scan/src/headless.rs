//! In-memory page for hosts without a real document, such as the CLI and tests.

use qrdesk_core::headless::{ElementKind, HeadlessDocument};

use crate::scanner::ScannerConfig;

/// Build a [HeadlessDocument] holding every element `config` refers to. The copy button is labelled "Copy".
pub fn document_for(config: &ScannerConfig) -> HeadlessDocument {
    let mut document = HeadlessDocument::new()
        .with(&config.drop_area_id, ElementKind::Generic)
        .with(&config.file_input_id, ElementKind::FileInput)
        .with(&config.preview_id, ElementKind::Image)
        .with(&config.preview_area_id, ElementKind::Generic)
        .with(&config.result_text_id, ElementKind::TextField)
        .with(&config.clear_btn_id, ElementKind::Button);
    document
        .insert(&config.copy_btn_id, ElementKind::Button)
        .set_content("Copy");
    document
}
