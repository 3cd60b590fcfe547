//! Output side: packed 2bpp images and plain 8-bit grayscale images.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::GrayImage;
use tiff::encoder::{TiffEncoder, colortype};
use tiff::tags::{CompressionMethod, PhotometricInterpretation, Tag};
use tracing::debug;

use crate::{ContainerError, ImageHeader, Result};

/// Bits per sample of the packed output.
pub const TWO_BIT: u16 = 2;

/// FillOrder 1: lower column values are stored in the higher-order bits.
const FILL_ORDER_MSB_FIRST: u16 = 1;

/// Bytes per row of a packed 2bpp image of the given width.
pub fn two_bit_stride(width: u32) -> usize {
    (width as usize).div_ceil(4)
}

/// Write packed 2bpp rows as an uncompressed, single-strip TIFF.
///
/// `packed` holds `two_bit_stride(header.width)` bytes per row, rows top to
/// bottom. Dimensions and resolution are taken from `header` as-is.
pub fn write_two_bit(path: &Path, header: &ImageHeader, packed: &[u8]) -> Result<()> {
    let expected = two_bit_stride(header.width) * header.height as usize;
    if packed.len() != expected {
        return Err(ContainerError::BufferLength {
            expected,
            actual: packed.len(),
        });
    }
    let byte_count = u32::try_from(packed.len()).map_err(|_| ContainerError::TooLarge)?;

    debug!(
        width = header.width,
        height = header.height,
        bytes = byte_count,
        "Writing 2bpp TIFF"
    );

    let mut writer = BufWriter::new(File::create(path)?);
    {
        let mut encoder = TiffEncoder::new(&mut writer)?;
        let mut dir = encoder.image_directory()?;

        let offset = dir.write_data(packed)?;
        let offset = u32::try_from(offset).map_err(|_| ContainerError::TooLarge)?;

        dir.write_tag(Tag::ImageWidth, header.width)?;
        dir.write_tag(Tag::ImageLength, header.height)?;
        dir.write_tag(Tag::BitsPerSample, TWO_BIT)?;
        dir.write_tag(Tag::Compression, CompressionMethod::None.to_u16())?;
        dir.write_tag(
            Tag::PhotometricInterpretation,
            PhotometricInterpretation::BlackIsZero.to_u16(),
        )?;
        dir.write_tag(Tag::FillOrder, FILL_ORDER_MSB_FIRST)?;
        dir.write_tag(Tag::StripOffsets, offset)?;
        dir.write_tag(Tag::SamplesPerPixel, 1u16)?;
        dir.write_tag(Tag::RowsPerStrip, header.height)?;
        dir.write_tag(Tag::StripByteCounts, byte_count)?;
        dir.write_tag(Tag::XResolution, header.x_resolution.to_rational())?;
        dir.write_tag(Tag::YResolution, header.y_resolution.to_rational())?;
        dir.write_tag(Tag::ResolutionUnit, header.resolution_unit.to_u16())?;
        dir.finish()?;
    }
    writer.flush()?;
    Ok(())
}

/// Write an uncompressed 8-bit grayscale TIFF with the resolution from `header`.
pub fn write_gray8(path: &Path, header: &ImageHeader, img: &GrayImage) -> Result<()> {
    let (width, height) = img.dimensions();
    debug!(width, height, "Writing 8-bit grayscale TIFF");

    let mut writer = BufWriter::new(File::create(path)?);
    {
        let mut encoder = TiffEncoder::new(&mut writer)?;
        let mut image_encoder = encoder.new_image::<colortype::Gray8>(width, height)?;
        image_encoder.resolution_unit(header.resolution_unit);
        image_encoder.x_resolution(header.x_resolution.to_rational());
        image_encoder.y_resolution(header.y_resolution.to_rational());
        image_encoder.write_data(img.as_raw())?;
    }
    writer.flush()?;
    Ok(())
}
