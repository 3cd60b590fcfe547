//! The conversion pipeline: prepare input, read, pack rows, write.

use std::path::Path;

use image::GrayImage;
use tiff_container::{ImageHeader, read_source, write_gray8, write_two_bit};
use tracing::{debug, info, warn};
use twobit_codec::{PackedImage, Quantizer, gradient};

use crate::args::Invocation;
use crate::config::RunConfig;
use crate::config::defaults::{GRADIENT_DPI, GRADIENT_SIZE};
use crate::error::RunError;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub width: u32,
    pub height: u32,
    pub packed_bytes: usize,
    pub generated_input: bool,
}

/// Convert `invocation.input` into a packed 2bpp TIFF at `invocation.output`.
///
/// Thresholds are checked before any file is touched. The output file is
/// only created once every row has been packed.
pub fn run(invocation: &Invocation, config: &RunConfig) -> Result<ConversionSummary, RunError> {
    let thresholds = config.threshold_set(invocation.thresholds)?;
    let quantizer = Quantizer::new(thresholds).with_gap_policy(config.gap_policy);
    debug!(
        thresholds = ?quantizer.thresholds(),
        policy = ?quantizer.gap_policy(),
        "Quantizer configured"
    );

    let generated_input = ensure_input(invocation)?;

    let source = read_source(&invocation.input).map_err(|source| RunError::Input {
        path: invocation.input.clone(),
        source,
    })?;

    let packed = pack_rows(&quantizer, &source.samples, config.threads)?;

    write_two_bit(&invocation.output, &source.header, packed.as_bytes()).map_err(|source| {
        RunError::Output {
            path: invocation.output.clone(),
            source,
        }
    })?;

    info!(
        input = %invocation.input.display(),
        output = %invocation.output.display(),
        width = packed.width(),
        height = packed.height(),
        "Conversion complete"
    );

    Ok(ConversionSummary {
        width: packed.width(),
        height: packed.height(),
        packed_bytes: packed.as_bytes().len(),
        generated_input,
    })
}

/// Generate a gradient test image at the input path when it does not exist.
///
/// Returns `true` when an image was generated.
fn ensure_input(invocation: &Invocation) -> Result<bool, RunError> {
    if invocation.input.exists() {
        return Ok(false);
    }

    let (x_dpi, y_dpi) = invocation
        .resolution()?
        .unwrap_or((GRADIENT_DPI, GRADIENT_DPI));
    warn!(
        path = %invocation.input.display(),
        x_dpi,
        y_dpi,
        "Input not found, generating gradient test image"
    );

    write_gradient(&invocation.input, x_dpi, y_dpi).map_err(|source| RunError::Input {
        path: invocation.input.clone(),
        source,
    })?;
    Ok(true)
}

fn write_gradient(path: &Path, x_dpi: u32, y_dpi: u32) -> tiff_container::Result<()> {
    let header = ImageHeader::new(GRADIENT_SIZE, GRADIENT_SIZE).with_dpi(x_dpi, y_dpi);
    write_gray8(path, &header, &gradient(GRADIENT_SIZE, GRADIENT_SIZE))
}

/// Pack all rows, in a dedicated pool when a thread count is configured.
fn pack_rows(
    quantizer: &Quantizer,
    samples: &GrayImage,
    threads: usize,
) -> Result<PackedImage, RunError> {
    let packed = if threads == 0 {
        quantizer.pack_image(samples)
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| quantizer.pack_image(samples))
    };
    packed.map_err(RunError::Conversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Parsed, parse};
    use image::Luma;
    use tiff_container::{read_header, read_two_bit};
    use twobit_codec::{CodecError, GapPolicy};

    fn invocation(list: &[String]) -> Invocation {
        match parse("tiff2bpp", list).unwrap() {
            Parsed::Run(inv) => inv,
            Parsed::Help(_) => panic!("unexpected help"),
        }
    }

    fn paths(dir: &Path) -> (String, String) {
        (
            dir.join("in.tif").display().to_string(),
            dir.join("out.tif").display().to_string(),
        )
    }

    fn packed_strip(path: &Path) -> Vec<u8> {
        read_two_bit(path).unwrap().1
    }

    #[test]
    fn test_generates_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = paths(dir.path());
        let inv = invocation(&[
            input.clone(),
            output.clone(),
            "0".into(),
            "85".into(),
            "170".into(),
            "150".into(),
            "200".into(),
        ]);

        let summary = run(&inv, &RunConfig::default()).unwrap();
        assert!(summary.generated_input);
        assert_eq!((summary.width, summary.height), (1000, 1000));
        assert_eq!(summary.packed_bytes, 250 * 1000);

        let header = read_header(Path::new(&output)).unwrap();
        assert_eq!(header, ImageHeader::new(1000, 1000).with_dpi(150, 200));
        assert_eq!(read_header(Path::new(&input)).unwrap(), header);

        // Row 0 starts at black; the last row ends at white.
        let strip = packed_strip(Path::new(&output));
        assert_eq!(strip[0] >> 6, 0);
        assert_eq!(strip[strip.len() - 1] & 0b11, 3);
    }

    #[test]
    fn test_existing_input_is_converted() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = paths(dir.path());
        let mut img = GrayImage::from_pixel(5, 2, Luma([255]));
        for (x, v) in [0u8, 60, 120, 200, 200].into_iter().enumerate() {
            img.put_pixel(x as u32, 0, Luma([v]));
        }
        let header = ImageHeader::new(5, 2).with_dpi(300, 300);
        write_gray8(Path::new(&input), &header, &img).unwrap();

        // Resolutions are only parsed for generated inputs.
        let inv = invocation(&[
            input,
            output.clone(),
            "50".into(),
            "100".into(),
            "150".into(),
            "x".into(),
            "y".into(),
        ]);
        let summary = run(&inv, &RunConfig::default()).unwrap();
        assert!(!summary.generated_input);
        assert_eq!(packed_strip(Path::new(&output)), vec![0x1B, 0xC0, 0xFF, 0xC0]);
        assert_eq!(read_header(Path::new(&output)).unwrap(), header);
    }

    #[test]
    fn test_gap_sample_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = paths(dir.path());
        let inv = invocation(&[input, output.clone(), "50".into(), "100".into(), "150".into()]);

        let err = run(&inv, &RunConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(matches!(
            err,
            RunError::Conversion(CodecError::Row { row: 0, .. })
        ));
        assert!(!Path::new(&output).exists());
    }

    #[test]
    fn test_gap_zero_policy_converts() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = paths(dir.path());
        let inv = invocation(&[input, output, "50".into(), "100".into(), "150".into()]);
        let config = RunConfig {
            gap_policy: GapPolicy::Zero,
            threads: 2,
            ..RunConfig::default()
        };
        assert!(run(&inv, &config).is_ok());
    }

    #[test]
    fn test_bad_resolution_when_generating() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = paths(dir.path());
        let inv = invocation(&[
            input.clone(),
            output,
            "0".into(),
            "85".into(),
            "170".into(),
            "abc".into(),
            "300".into(),
        ]);
        assert_eq!(run(&inv, &RunConfig::default()).unwrap_err().exit_code(), 7);
        assert!(!Path::new(&input).exists());
    }

    #[test]
    fn test_unordered_thresholds_rejected_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let (input, output) = paths(dir.path());
        let inv = invocation(&[input.clone(), output, "150".into(), "100".into(), "50".into()]);
        assert_eq!(run(&inv, &RunConfig::default()).unwrap_err().exit_code(), 3);
        assert!(!Path::new(&input).exists());
    }
}
