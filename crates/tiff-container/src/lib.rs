//! TIFF input and output for the 2bpp converter.
//!
//! Reads 8-bit single-channel sources together with their resolution
//! metadata, and writes packed 2-bit results as a single-strip,
//! uncompressed, MSB-first TIFF.

pub mod header;
pub mod reader;
pub mod writer;

// Re-exports for convenience
pub use header::{ImageHeader, Ratio};
pub use reader::{SourceImage, read_header, read_source, read_two_bit};
pub use writer::{two_bit_stride, write_gray8, write_two_bit};

/// Errors that can occur while reading or writing TIFF files.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported sample layout {0}: expected 8-bit grayscale, one sample per pixel")]
    UnsupportedLayout(String),

    #[error("Decoded image is {actual_width}x{actual_height}, header declares {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Packed buffer has {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Invalid {tag} value: {value}")]
    InvalidTag { tag: &'static str, value: String },

    #[error("Image data does not fit in a standard TIFF file")]
    TooLarge,
}

/// Result type alias for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;
