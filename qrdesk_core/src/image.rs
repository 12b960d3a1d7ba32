use base64::{engine::general_purpose::STANDARD, Engine};

/// A PNG-encoded picture ready to be shown by an [ImageView](crate::ImageView).
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl EncodedImage {
    pub fn new(width: u32, height: u32, png: Vec<u8>) -> Self {
        Self { width, height, png }
    }

    /// Whether the image covers at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the image as a `data:` URL, suitable for an `<img src>`.
    /// # Example
    /// ```
    /// use qrdesk_core::EncodedImage;
    /// let image = EncodedImage::new(1, 1, vec![1, 2, 3]);
    /// assert_eq!(image.data_url(), "data:image/png;base64,AQID");
    /// ```
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png", &format_args!("{} B", self.png.len()))
            .finish()
    }
}
