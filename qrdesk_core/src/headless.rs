//! In-memory implementations of every capability, for tests and for driving controllers from a terminal.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use crate::dom::{Button, Container, Document, Element, FileInput, ImageView, TextBlock, TextField};
use crate::host::{Alerts, Clipboard, ClipboardError, Timer};
use crate::{EncodedImage, Node};

/// What an element of a [HeadlessDocument] can be looked up as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Generic,
    TextField,
    TextBlock,
    Button,
    Container,
    Image,
    FileInput,
}

/// A single element of a [HeadlessDocument]. The same storage backs every capability; `content` is the value of a
/// text field, the text of a block, the label of a button or the file name of a picker.
#[derive(Debug)]
pub struct HeadlessElement {
    kind: ElementKind,
    content: RefCell<String>,
    classes: RefCell<BTreeSet<String>>,
    disabled: Cell<bool>,
    children: RefCell<Vec<Node>>,
    image: RefCell<Option<EncodedImage>>,
    resets: Cell<usize>,
}

impl HeadlessElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            content: RefCell::default(),
            classes: RefCell::default(),
            disabled: Cell::new(false),
            children: RefCell::default(),
            image: RefCell::default(),
            resets: Cell::new(0),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    /// Simulate the user typing or picking something.
    pub fn set_content(&self, content: &str) {
        *self.content.borrow_mut() = content.to_owned();
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn hidden(&self) -> bool {
        self.classes.borrow().contains(crate::dom::HIDDEN)
    }

    pub fn disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn children(&self) -> Vec<Node> {
        self.children.borrow().clone()
    }

    pub fn image(&self) -> Option<EncodedImage> {
        self.image.borrow().clone()
    }

    /// How many times a file input has been reset.
    pub fn reset_count(&self) -> usize {
        self.resets.get()
    }
}

impl Element for HeadlessElement {
    fn toggle_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        if on {
            classes.insert(class.to_owned());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }
}

impl TextField for HeadlessElement {
    fn value(&self) -> String {
        self.content()
    }

    fn set_value(&self, value: &str) {
        self.set_content(value)
    }
}

impl TextBlock for HeadlessElement {
    fn text(&self) -> String {
        self.content()
    }

    fn set_text(&self, text: &str) {
        self.set_content(text)
    }
}

impl Button for HeadlessElement {
    fn label(&self) -> String {
        self.content()
    }

    fn set_label(&self, label: &str) {
        self.set_content(label)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled)
    }
}

impl Container for HeadlessElement {
    fn replace_children(&self, children: Vec<Node>) {
        *self.children.borrow_mut() = children;
    }
}

impl ImageView for HeadlessElement {
    fn set_image(&self, image: Option<EncodedImage>) {
        *self.image.borrow_mut() = image;
    }
}

impl FileInput for HeadlessElement {
    fn reset(&self) {
        self.content.borrow_mut().clear();
        self.resets.set(self.resets.get() + 1);
    }
}

/// A page made of [HeadlessElement]s keyed by id.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    elements: HashMap<String, Rc<HeadlessElement>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, replacing any previous element with the same `id`.
    pub fn with(mut self, id: &str, kind: ElementKind) -> Self {
        self.insert(id, kind);
        self
    }

    pub fn insert(&mut self, id: &str, kind: ElementKind) -> Rc<HeadlessElement> {
        let element = Rc::new(HeadlessElement::new(kind));
        self.elements.insert(id.to_owned(), element.clone());
        element
    }

    pub fn get(&self, id: &str) -> Option<Rc<HeadlessElement>> {
        self.elements.get(id).cloned()
    }

    fn get_kind(&self, id: &str, kind: ElementKind) -> Option<Rc<HeadlessElement>> {
        self.get(id).filter(|element| element.kind == kind)
    }
}

impl Document for HeadlessDocument {
    fn element(&self, id: &str) -> Option<Rc<dyn Element>> {
        self.get(id).map(|element| element as Rc<dyn Element>)
    }

    fn text_field(&self, id: &str) -> Option<Rc<dyn TextField>> {
        self.get_kind(id, ElementKind::TextField)
            .map(|element| element as Rc<dyn TextField>)
    }

    fn text_block(&self, id: &str) -> Option<Rc<dyn TextBlock>> {
        self.get_kind(id, ElementKind::TextBlock)
            .map(|element| element as Rc<dyn TextBlock>)
    }

    fn button(&self, id: &str) -> Option<Rc<dyn Button>> {
        self.get_kind(id, ElementKind::Button)
            .map(|element| element as Rc<dyn Button>)
    }

    fn container(&self, id: &str) -> Option<Rc<dyn Container>> {
        self.get_kind(id, ElementKind::Container)
            .map(|element| element as Rc<dyn Container>)
    }

    fn image_view(&self, id: &str) -> Option<Rc<dyn ImageView>> {
        self.get_kind(id, ElementKind::Image)
            .map(|element| element as Rc<dyn ImageView>)
    }

    fn file_input(&self, id: &str) -> Option<Rc<dyn FileInput>> {
        self.get_kind(id, ElementKind::FileInput)
            .map(|element| element as Rc<dyn FileInput>)
    }
}

/// Clipboard kept in memory. When denied, every access fails like a browser refusing the permission.
#[derive(Debug, Default)]
pub struct HeadlessClipboard {
    contents: RefCell<String>,
    denied: Cell<bool>,
}

impl HeadlessClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        *clipboard.contents.borrow_mut() = text.to_owned();
        clipboard
    }

    pub fn denied() -> Self {
        let clipboard = Self::new();
        clipboard.denied.set(true);
        clipboard
    }

    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }
}

impl Clipboard for HeadlessClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        if self.denied.get() {
            return Err(ClipboardError::Denied);
        }
        Ok(self.contents())
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.denied.get() {
            return Err(ClipboardError::Denied);
        }
        *self.contents.borrow_mut() = text.to_owned();
        Ok(())
    }
}

/// Alerts that are only recorded.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    messages: RefCell<Vec<String>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Alerts for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

/// Timer driven by a virtual clock that only moves through [ManualTimer::advance].
#[derive(Debug)]
pub struct ManualTimer<T> {
    now: Cell<Duration>,
    seq: Cell<u64>,
    pending: RefCell<Vec<(Duration, u64, T)>>,
}

impl<T> ManualTimer<T> {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            seq: Cell::new(0),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Number of tasks not yet due.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward by `by` and return the tasks that became due, in the order they fire.
    pub fn advance(&self, by: Duration) -> Vec<T> {
        let now = self.now.get() + by;
        self.now.set(now);
        let mut pending = self.pending.borrow_mut();
        let (mut due, later): (Vec<_>, Vec<_>) =
            pending.drain(..).partition(|(deadline, _, _)| *deadline <= now);
        *pending = later;
        due.sort_by_key(|(deadline, seq, _)| (*deadline, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl<T> Default for ManualTimer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timer<T> for ManualTimer<T> {
    fn set_timeout(&self, delay: Duration, task: T) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay, seq, task));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::DocumentExt;

    #[test]
    fn test_lookup_checks_kind() {
        let doc = HeadlessDocument::new()
            .with("input", ElementKind::TextField)
            .with("go", ElementKind::Button);
        assert!(doc.text_field("input").is_some());
        assert!(doc.button("input").is_none());
        assert!(doc.element("go").is_some());
        let err = doc.require_container("go").err().unwrap();
        assert_eq!(err.to_string(), "no container element with id 'go'");
    }

    #[test]
    fn test_handles_share_state() {
        let doc = HeadlessDocument::new().with("input", ElementKind::TextField);
        let field = doc.require_text_field("input").unwrap();
        field.set_value("héllo");
        field.set_hidden(true);
        let element = doc.get("input").unwrap();
        assert_eq!(element.content(), "héllo");
        assert!(element.hidden());
        field.set_hidden(false);
        assert!(element.classes().is_empty());
    }

    #[test]
    fn test_file_input_reset() {
        let doc = HeadlessDocument::new().with("file", ElementKind::FileInput);
        let element = doc.get("file").unwrap();
        element.set_content("photo.png");
        doc.require_file_input("file").unwrap().reset();
        assert_eq!(element.content(), "");
        assert_eq!(element.reset_count(), 1);
    }

    #[tokio::test]
    async fn test_clipboard() {
        let clipboard = HeadlessClipboard::with_text("hi");
        assert_eq!(clipboard.read_text().await, Ok("hi".to_owned()));
        clipboard.write_text("there").unwrap();
        assert_eq!(clipboard.contents(), "there");

        let denied = HeadlessClipboard::denied();
        assert_eq!(denied.read_text().await, Err(ClipboardError::Denied));
        assert_eq!(denied.write_text("x"), Err(ClipboardError::Denied));
    }

    #[test]
    fn test_manual_timer_order() {
        let timer = ManualTimer::new();
        timer.set_timeout(Duration::from_secs(5), "late");
        timer.set_timeout(Duration::from_secs(2), "early");
        timer.set_timeout(Duration::from_secs(2), "early again");
        assert!(timer.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(timer.advance(Duration::from_secs(1)), vec!["early", "early again"]);
        assert_eq!(timer.pending(), 1);
        assert_eq!(timer.advance(Duration::from_secs(10)), vec!["late"]);
        assert_eq!(timer.pending(), 0);
    }
}
