//! Command-line conversion of 8-bit grayscale TIFFs into packed 2bpp TIFFs.

pub mod args;
pub mod config;
pub mod convert;
pub mod error;

pub use args::{Invocation, Parsed};
pub use config::RunConfig;
pub use convert::{ConversionSummary, run};
pub use error::RunError;
