/// Share of the maximum length under which the remaining capacity triggers a warning.
const NEAR_LIMIT_RATIO: f64 = 0.2;

/// How much of the allowed length some valid text uses. Lengths are counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub used: usize,
    pub max: usize,
}

impl Capacity {
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.used)
    }

    /// Whether less than 20% of the maximum length is left.
    /// # Example
    /// ```
    /// use qrdesk_generate::Capacity;
    /// assert!(!Capacity { used: 800, max: 1000 }.is_near_limit());
    /// assert!(Capacity { used: 801, max: 1000 }.is_near_limit());
    /// ```
    pub fn is_near_limit(&self) -> bool {
        (self.remaining() as f64) < self.max as f64 * NEAR_LIMIT_RATIO
    }

    /// Warning to show when the text is close to the limit.
    pub fn warning(&self) -> Option<String> {
        self.is_near_limit()
            .then(|| format!("{} characters remaining", self.remaining()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter some text to generate a QR code")]
    Empty,
    #[error("Text is too long ({len} characters, max {max})")]
    TooLong { len: usize, max: usize },
}

/// Check that `text` is non-empty and at most `max` characters long.
/// # Example
/// ```
/// use qrdesk_generate::{validate, ValidationError};
/// assert_eq!(validate("hi", 10).unwrap().remaining(), 8);
/// assert_eq!(validate("", 10), Err(ValidationError::Empty));
/// ```
pub fn validate(text: &str, max: usize) -> Result<Capacity, ValidationError> {
    let len = text.chars().count();
    if len == 0 {
        return Err(ValidationError::Empty);
    }
    if len > max {
        return Err(ValidationError::TooLong { len, max });
    }
    Ok(Capacity { used: len, max })
}

/// Cut `text` down to at most `max` characters. Returns `None` if it already fits.
pub fn truncate(text: &str, max: usize) -> Option<&str> {
    let (end, _) = text.char_indices().nth(max)?;
    Some(&text[..end])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_accepts_up_to_max() {
        for len in [1, 2, 500, 999, 1000] {
            let text = "a".repeat(len);
            assert_eq!(validate(&text, 1000), Ok(Capacity { used: len, max: 1000 }));
        }
    }

    #[test]
    fn test_rejects_empty_and_too_long() {
        assert_eq!(validate("", 1000), Err(ValidationError::Empty));
        let text = "a".repeat(1001);
        assert_eq!(
            validate(&text, 1000),
            Err(ValidationError::TooLong { len: 1001, max: 1000 })
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Four characters, sixteen bytes.
        let text = "😀😀😀😀";
        assert_eq!(validate(text, 4).unwrap().used, 4);
        assert!(validate(text, 3).is_err());
    }

    #[test]
    fn test_near_limit_warning() {
        assert_eq!(validate(&"a".repeat(800), 1000).unwrap().warning(), None);
        assert_eq!(
            validate(&"a".repeat(950), 1000).unwrap().warning().as_deref(),
            Some("50 characters remaining")
        );
        assert_eq!(
            validate(&"a".repeat(1000), 1000).unwrap().warning().as_deref(),
            Some("0 characters remaining")
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), None);
        assert_eq!(truncate("hello", 5), None);
        assert_eq!(truncate("hello", 3), Some("hel"));
        assert_eq!(truncate("añb😀c", 4), Some("añb😀"));
    }
}
