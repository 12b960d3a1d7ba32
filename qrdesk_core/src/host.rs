use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard access denied")]
    Denied,
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// System clipboard.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    /// Read the clipboard as text. Completes exactly once and is never retried.
    async fn read_text(&self) -> Result<String, ClipboardError>;

    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blocking, user-facing notifications (`window.alert`).
pub trait Alerts {
    fn alert(&self, message: &str);
}

/// Deferred delivery of `task` back to the controller that scheduled it.
///
/// The host is expected to hand `task` to the controller's `on_timeout` once `delay` has elapsed.
pub trait Timer<T> {
    fn set_timeout(&self, delay: Duration, task: T);
}

impl<C: Clipboard + ?Sized> Clipboard for std::rc::Rc<C> {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        (**self).read_text().await
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

impl<A: Alerts + ?Sized> Alerts for std::rc::Rc<A> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

impl<T, S: Timer<T> + ?Sized> Timer<T> for std::rc::Rc<S> {
    fn set_timeout(&self, delay: Duration, task: T) {
        (**self).set_timeout(delay, task)
    }
}
