/// A file handed over by the page, already read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    /// MIME type as reported by the browser or guessed from the file name.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Whether the MIME type is an `image/*` type.
    /// # Example
    /// ```
    /// use qrdesk_scan::ImageFile;
    /// assert!(ImageFile::new("a.png", "image/png", vec![]).is_image());
    /// assert!(!ImageFile::new("a.txt", "text/plain", vec![]).is_image());
    /// ```
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("bytes", &format_args!("{} B", self.bytes.len()))
            .finish()
    }
}

/// The three ways an image reaches the scanner.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Files dropped on the drop area.
    Drop(Vec<ImageFile>),
    /// The selection of the file picker, if any.
    Picker(Option<ImageFile>),
    /// Items of a clipboard paste.
    Paste(Vec<ImageFile>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("'{name}' is not an image ({mime})")]
    NotAnImage { name: String, mime: String },
}

impl ImageSource {
    /// Pick the single image to scan. Dropped and picked files must be images; pastes silently skip non-image items.
    /// Returns `Ok(None)` when there is nothing to scan.
    pub fn into_image(self) -> Result<Option<ImageFile>, IntakeError> {
        let file = match self {
            Self::Drop(files) => files.into_iter().next(),
            Self::Picker(file) => file,
            Self::Paste(items) => return Ok(items.into_iter().find(ImageFile::is_image)),
        };
        match file {
            Some(file) if !file.is_image() => Err(IntakeError::NotAnImage {
                name: file.name,
                mime: file.mime,
            }),
            file => Ok(file),
        }
    }
}
