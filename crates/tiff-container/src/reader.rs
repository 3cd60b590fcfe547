//! Input side: header metadata and 8-bit grayscale samples.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader};
use tiff::decoder::Decoder;
use tiff::decoder::ifd::Value;
use tiff::tags::{ResolutionUnit, Tag};
use tracing::debug;

use crate::header::DEFAULT_RESOLUTION;
use crate::{ContainerError, ImageHeader, Ratio, Result};

/// A decoded source image: header plus one byte per pixel, row-major.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub header: ImageHeader,
    pub samples: GrayImage,
}

impl SourceImage {
    /// Samples of row `y`, exactly `header.width` bytes long.
    pub fn scanline(&self, y: u32) -> Option<&[u8]> {
        if y >= self.header.height {
            return None;
        }
        let width = self.header.width as usize;
        let start = y as usize * width;
        self.samples.as_raw().get(start..start + width)
    }
}

/// Read the header and samples of a TIFF file.
///
/// Only 8-bit, single-sample pixels are accepted; other layouts are rejected
/// rather than converted.
pub fn read_source(path: &Path) -> Result<SourceImage> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let header = header_from_decoder(&mut decoder)?;
    check_gray8_layout(&mut decoder)?;

    let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let samples = match decoded {
        DynamicImage::ImageLuma8(img) => img,
        other => {
            return Err(ContainerError::UnsupportedLayout(format!(
                "{:?}",
                other.color()
            )));
        }
    };

    let (actual_width, actual_height) = samples.dimensions();
    if (actual_width, actual_height) != (header.width, header.height) {
        return Err(ContainerError::DimensionMismatch {
            width: header.width,
            height: header.height,
            actual_width,
            actual_height,
        });
    }

    debug!(
        width = header.width,
        height = header.height,
        "Read source image"
    );
    Ok(SourceImage { header, samples })
}

/// Read dimensions and resolution tags of the first image in a TIFF file.
pub fn read_header(path: &Path) -> Result<ImageHeader> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    header_from_decoder(&mut decoder)
}

/// Read back the header and packed strip of a 2bpp file.
pub fn read_two_bit(path: &Path) -> Result<(ImageHeader, Vec<u8>)> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let header = header_from_decoder(&mut decoder)?;

    let bits = decoder.get_tag_u32(Tag::BitsPerSample)?;
    if bits != 2 {
        return Err(ContainerError::UnsupportedLayout(format!(
            "{bits} bits per sample"
        )));
    }
    let offset = decoder.get_tag_u32(Tag::StripOffsets)?;
    let byte_count = decoder.get_tag_u32(Tag::StripByteCounts)?;

    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(u64::from(offset)))?;
    let mut packed = vec![0u8; byte_count as usize];
    file.read_exact(&mut packed)?;
    Ok((header, packed))
}

/// Reject anything but one 8-bit sample per pixel before the image crate
/// gets a chance to expand it.
fn check_gray8_layout<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<()> {
    let samples = decoder
        .find_tag_unsigned::<u16>(Tag::SamplesPerPixel)?
        .unwrap_or(1);
    // BitsPerSample defaults to 1 when absent
    let bits = decoder
        .find_tag_unsigned_vec::<u16>(Tag::BitsPerSample)?
        .unwrap_or_else(|| vec![1]);

    if samples != 1 || bits.as_slice() != [8] {
        return Err(ContainerError::UnsupportedLayout(format!(
            "{samples} sample(s) per pixel at {bits:?} bits"
        )));
    }
    Ok(())
}

fn header_from_decoder<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<ImageHeader> {
    let (width, height) = decoder.dimensions()?;
    let x_resolution = read_ratio(decoder, Tag::XResolution, "XResolution")?;
    let y_resolution = read_ratio(decoder, Tag::YResolution, "YResolution")?;

    let resolution_unit = match decoder.find_tag(Tag::ResolutionUnit)? {
        Some(value) => {
            let raw = value.into_u16()?;
            ResolutionUnit::from_u16(raw).ok_or_else(|| ContainerError::InvalidTag {
                tag: "ResolutionUnit",
                value: raw.to_string(),
            })?
        }
        None => ResolutionUnit::Inch,
    };

    Ok(ImageHeader {
        width,
        height,
        x_resolution,
        y_resolution,
        resolution_unit,
    })
}

fn read_ratio<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: Tag,
    name: &'static str,
) -> Result<Ratio> {
    match decoder.find_tag(tag)? {
        None => Ok(DEFAULT_RESOLUTION),
        Some(Value::Rational(n, d)) => Ok(Ratio::new(n, d)),
        Some(other) => other
            .into_u32()
            .map(Ratio::whole)
            .map_err(|e| ContainerError::InvalidTag {
                tag: name,
                value: e.to_string(),
            }),
    }
}
