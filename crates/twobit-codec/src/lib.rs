//! Threshold quantization of 8-bit grayscale samples into packed 2bpp codes.
//!
//! Each sample is classified into one of four levels by three ascending
//! thresholds, and four consecutive codes are packed into one byte,
//! most-significant pair first.

pub mod gradient;
pub mod pack;
pub mod quantize;
pub mod raster;
pub mod thresholds;

// Re-exports for convenience
pub use gradient::gradient;
pub use pack::{combine, pack, packed_len};
pub use quantize::{Code, GapPolicy, Quantizer, quantize};
pub use raster::PackedImage;
pub use thresholds::ThresholdSet;

/// Number of 2-bit codes stored in one packed byte.
pub const CODES_PER_BYTE: usize = 4;

/// Errors that can occur while quantizing or packing samples.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Sample {sample} falls in the unclassified band (0, {t1}]")]
    InvalidSample { sample: u8, t1: u8 },

    #[error("Thresholds must be ascending, got ({t1}, {t2}, {t3})")]
    UnorderedThresholds { t1: u8, t2: u8, t3: u8 },

    #[error("Packed buffer has {actual} bytes, expected {expected}")]
    PackedLength { expected: usize, actual: usize },

    #[error("Row {row}: {source}")]
    Row {
        row: u32,
        #[source]
        source: Box<CodecError>,
    },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
