use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("signature is invalid, expected GIF87a or GIF89a")]
    BadSignature,

    #[error("image dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("color table needs {expected} bytes but only {available} remain")]
    TruncatedColorTable { expected: usize, available: usize },

    /// `offset` is the position in the file where the missing data was expected.
    #[error("stream ended unexpectedly at byte offset {offset}")]
    TruncatedStream { offset: usize },

    #[error("encountered unexpected block label 0x{label:02x} at byte offset {offset}")]
    UnrecognizedBlock { label: u8, offset: usize },

    #[error("lzw dictionary is corrupt at code {code}")]
    CorruptDictionary { code: u16 },

    #[error("lzw minimum code size {0} is outside 2..=8")]
    InvalidMinimumCodeSize(u8),

    #[error("extension with label 0x{label:02x} is malformed")]
    MalformedExtension { label: u8 },

    #[error("requested frame {requested} but the stream only holds {available}")]
    FrameIndexOutOfRange { requested: usize, available: usize },

    #[error("frame of {width}x{height} exceeds the limit of {limit} pixels")]
    ImageTooLarge { width: u16, height: u16, limit: u64 },
}
