//! Capabilities a controller needs from the page it is bound to.
//!
//! Controllers never talk to a concrete UI. They receive handles implementing these traits, resolved by id through
//! a [Document]. Handles use interior mutability since the page is shared between the controller and its host.

use std::rc::Rc;

use crate::{EncodedImage, Node};

/// Class toggled on elements that should not be displayed.
pub const HIDDEN: &str = "hidden";

/// Something with a class list.
pub trait Element {
    /// Add `class` when `on` is true, remove it otherwise.
    fn toggle_class(&self, class: &str, on: bool);

    fn has_class(&self, class: &str) -> bool;

    fn set_hidden(&self, hidden: bool) {
        self.toggle_class(HIDDEN, hidden)
    }

    fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN)
    }
}

/// An editable text input (`<input>`, `<textarea>`).
pub trait TextField: Element {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// A read-only block of text.
pub trait TextBlock: Element {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

pub trait Button: Element {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
}

/// An element whose children are entirely managed by the controller.
pub trait Container: Element {
    /// Replace all children with `children`.
    fn replace_children(&self, children: Vec<Node>);

    fn clear(&self) {
        self.replace_children(Vec::new())
    }
}

/// An `<img>`.
pub trait ImageView: Element {
    /// Show `image`, or nothing when `None`.
    fn set_image(&self, image: Option<EncodedImage>);
}

/// A file picker.
pub trait FileInput: Element {
    /// Forget the current selection, so that picking the same file again is noticed.
    fn reset(&self);
}

/// Lookup of page elements by id.
pub trait Document {
    fn element(&self, id: &str) -> Option<Rc<dyn Element>>;
    fn text_field(&self, id: &str) -> Option<Rc<dyn TextField>>;
    fn text_block(&self, id: &str) -> Option<Rc<dyn TextBlock>>;
    fn button(&self, id: &str) -> Option<Rc<dyn Button>>;
    fn container(&self, id: &str) -> Option<Rc<dyn Container>>;
    fn image_view(&self, id: &str) -> Option<Rc<dyn ImageView>>;
    fn file_input(&self, id: &str) -> Option<Rc<dyn FileInput>>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("no {kind} element with id '{id}'")]
    MissingElement { id: String, kind: &'static str },
}

/// Typed lookups that fail with a [BindError] instead of returning `None`.
pub trait DocumentExt: Document {
    fn require_element(&self, id: &str) -> Result<Rc<dyn Element>, BindError> {
        self.element(id).ok_or_else(|| missing(id, "generic"))
    }

    fn require_text_field(&self, id: &str) -> Result<Rc<dyn TextField>, BindError> {
        self.text_field(id).ok_or_else(|| missing(id, "text field"))
    }

    fn require_text_block(&self, id: &str) -> Result<Rc<dyn TextBlock>, BindError> {
        self.text_block(id).ok_or_else(|| missing(id, "text block"))
    }

    fn require_button(&self, id: &str) -> Result<Rc<dyn Button>, BindError> {
        self.button(id).ok_or_else(|| missing(id, "button"))
    }

    fn require_container(&self, id: &str) -> Result<Rc<dyn Container>, BindError> {
        self.container(id).ok_or_else(|| missing(id, "container"))
    }

    fn require_image_view(&self, id: &str) -> Result<Rc<dyn ImageView>, BindError> {
        self.image_view(id).ok_or_else(|| missing(id, "image"))
    }

    fn require_file_input(&self, id: &str) -> Result<Rc<dyn FileInput>, BindError> {
        self.file_input(id).ok_or_else(|| missing(id, "file input"))
    }
}

impl<D: Document + ?Sized> DocumentExt for D {}

fn missing(id: &str, kind: &'static str) -> BindError {
    BindError::MissingElement {
        id: id.to_owned(),
        kind,
    }
}
