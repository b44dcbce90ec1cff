/// Default cap on the pixel area of a decoded frame.
pub const DEFAULT_MAX_PIXELS: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Stop at the requested frame's image descriptor.
    HeaderOnly,
    /// Decompress the requested frame's pixel indices.
    #[default]
    Extended,
}

/// Settings for [`GifDocument::open`](crate::GifDocument::open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    mode: DecodeMode,
    max_pixels: Option<u64>,
    keep_comments: bool,
    verify_trailer: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            mode: DecodeMode::default(),
            max_pixels: Some(DEFAULT_MAX_PIXELS),
            keep_comments: true,
            verify_trailer: true,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_only() -> Self {
        Self::new().with_mode(DecodeMode::HeaderOnly)
    }

    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// `None` removes the limit.
    pub fn with_max_pixels(mut self, max_pixels: Option<u64>) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn with_keep_comments(mut self, keep_comments: bool) -> Self {
        self.keep_comments = keep_comments;
        self
    }

    /// When set, extended decoding walks the blocks after the requested
    /// frame up to the trailer so a truncated file is rejected.
    pub fn with_verify_trailer(mut self, verify_trailer: bool) -> Self {
        self.verify_trailer = verify_trailer;
        self
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn max_pixels(&self) -> Option<u64> {
        self.max_pixels
    }

    pub fn keep_comments(&self) -> bool {
        self.keep_comments
    }

    pub fn verify_trailer(&self) -> bool {
        self.verify_trailer
    }
}
