//! Run failures and the process exit code each one maps to.

use std::path::PathBuf;

use tiff_container::ContainerError;
use twobit_codec::CodecError;

/// Errors that end a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}")]
    Usage(String),

    #[error("Threshold {name} must be an integer, got {value:?}")]
    ThresholdNotInteger { name: &'static str, value: String },

    #[error("Threshold {name} must be between 0 and 255, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: i64 },

    #[error("Invalid thresholds: {0}")]
    Thresholds(#[source] CodecError),

    #[error("Failed to prepare input {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    #[error("Failed to write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    #[error("Conversion failed: {0}")]
    Conversion(#[source] CodecError),

    #[error("Resolution {name} must be a positive integer, got {value:?}")]
    ResolutionNotInteger { name: &'static str, value: String },

    #[error("Invalid setting {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl RunError {
    /// Process exit code reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            Self::ThresholdNotInteger { .. } => 2,
            Self::ThresholdOutOfRange { .. } | Self::Thresholds(_) => 3,
            Self::Input { .. } => 4,
            Self::Output { .. } => 5,
            Self::Conversion(_) => 6,
            Self::ResolutionNotInteger { .. } => 7,
            Self::Config { .. } | Self::WorkerPool(_) => 8,
        }
    }
}
