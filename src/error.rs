/// Result type for bvatar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the library.
///
/// Running out of bits under the finite discipline is not listed here: the
/// walk treats it as a normal stop and records it on the atrium.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid hex digest: {0}")]
    InvalidDigestEncoding(#[from] hex::FromHexError),

    #[error("digest is empty")]
    EmptyDigest,

    #[error("invalid size: bits must be between {min} and {max}, got {bits}")]
    InvalidSize { bits: u32, min: u32, max: u32 },

    #[error("digest has {available} bits, the starting position alone needs {needed}")]
    DigestTooShort { available: usize, needed: usize },

    #[error("pixel scale must be at least 1")]
    InvalidPixelScale,

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("display failed: {0}")]
    Display(String),
}
