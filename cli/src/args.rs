//! Command-line arguments: `<input> <output> <t1> <t2> <t3> [<xRes> <yRes>]`.

use std::path::PathBuf;

use argh::FromArgs;

use crate::error::RunError;

#[derive(FromArgs, Debug)]
/// Quantize an 8-bit grayscale TIFF into a packed 2 bits-per-pixel TIFF.
struct RawArgs {
    /// source TIFF; a 1000x1000 gradient is generated here when it does not exist
    #[argh(positional)]
    input: PathBuf,

    /// destination TIFF
    #[argh(positional)]
    output: PathBuf,

    /// upper bound of level 0 (0-255)
    #[argh(positional)]
    t1: String,

    /// upper bound of level 1 (0-255)
    #[argh(positional)]
    t2: String,

    /// upper bound of level 2 (0-255)
    #[argh(positional)]
    t3: String,

    /// horizontal and vertical resolution (dpi) of a generated gradient
    #[argh(positional, arg_name = "resolution")]
    resolution: Vec<String>,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Parsed {
    Run(Invocation),
    /// `--help` was requested; holds the usage text.
    Help(String),
}

/// A validated request to convert one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
    pub thresholds: [u8; 3],
    resolution: Option<(String, String)>,
}

impl Invocation {
    /// Resolutions for a generated input, parsed only when one is needed.
    pub fn resolution(&self) -> Result<Option<(u32, u32)>, RunError> {
        match &self.resolution {
            None => Ok(None),
            Some((x, y)) => Ok(Some((
                parse_resolution("xRes", x)?,
                parse_resolution("yRes", y)?,
            ))),
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse(command: &str, args: &[String]) -> Result<Parsed, RunError> {
    let wants_help = args.iter().any(|a| a == "--help" || a == "-h");
    let mut forwarded: Vec<&str> = Vec::with_capacity(args.len() + 1);
    if !wants_help {
        // Everything is positional; keeps "-5" from being read as a flag.
        forwarded.push("--");
    }
    forwarded.extend(args.iter().map(String::as_str));

    let raw = match RawArgs::from_args(&[command], &forwarded) {
        Ok(raw) => raw,
        Err(early) => {
            return match early.status {
                Ok(()) => Ok(Parsed::Help(early.output)),
                Err(()) => Err(RunError::Usage(early.output)),
            };
        }
    };

    let resolution = match raw.resolution.as_slice() {
        [] => None,
        [x, y] => Some((x.clone(), y.clone())),
        _ => {
            return Err(RunError::Usage(format!(
                "Expected 5 or 7 arguments, got {}",
                5 + raw.resolution.len()
            )));
        }
    };

    // Every threshold must be an integer before any range is checked.
    let t1 = parse_integer("t1", &raw.t1)?;
    let t2 = parse_integer("t2", &raw.t2)?;
    let t3 = parse_integer("t3", &raw.t3)?;

    Ok(Parsed::Run(Invocation {
        input: raw.input,
        output: raw.output,
        thresholds: [
            check_range("t1", t1)?,
            check_range("t2", t2)?,
            check_range("t3", t3)?,
        ],
        resolution,
    }))
}

fn parse_integer(name: &'static str, value: &str) -> Result<i64, RunError> {
    value
        .trim()
        .parse()
        .map_err(|_| RunError::ThresholdNotInteger {
            name,
            value: value.to_string(),
        })
}

fn check_range(name: &'static str, value: i64) -> Result<u8, RunError> {
    u8::try_from(value).map_err(|_| RunError::ThresholdOutOfRange { name, value })
}

fn parse_resolution(name: &'static str, value: &str) -> Result<u32, RunError> {
    match value.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(RunError::ResolutionNotInteger {
            name,
            value: value.to_string(),
        }),
    }
}
