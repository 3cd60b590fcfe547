//! Whole-image packing, one independent unit of work per row.

use image::GrayImage;
use rayon::prelude::*;
use tracing::debug;

use crate::{CodecError, Quantizer, Result, packed_len};

/// A packed 2bpp image: `stride` bytes per row, rows stored top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedImage {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl PackedImage {
    fn zeroed(width: u32, height: u32) -> Self {
        let stride = packed_len(width as usize);
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per packed row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Packed bytes of row `y`, or `None` when out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        Some(&self.data[start..start + self.stride])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Quantizer {
    /// Pack every row of `img` in parallel.
    ///
    /// Rows never depend on each other, so they are spread over the current
    /// rayon pool. When several rows fail, the lowest row index is reported.
    pub fn pack_image(&self, img: &GrayImage) -> Result<PackedImage> {
        let (width, height) = img.dimensions();
        debug!(width, height, "Packing image rows in parallel");

        let mut packed = PackedImage::zeroed(width, height);
        if width == 0 || height == 0 {
            return Ok(packed);
        }

        let stride = packed.stride;
        let results: Vec<Result<()>> = img
            .as_raw()
            .par_chunks(width as usize)
            .zip(packed.data.par_chunks_mut(stride))
            .enumerate()
            .map(|(y, (row, out))| {
                self.pack_into(row, out).map_err(|e| CodecError::Row {
                    row: y as u32,
                    source: Box::new(e),
                })
            })
            .collect();

        results.into_iter().collect::<Result<()>>()?;
        debug!(bytes = packed.data.len(), "Image packing complete");
        Ok(packed)
    }

    /// Pack every row of `img` on the calling thread, top to bottom.
    pub fn pack_rows_sequential(&self, img: &GrayImage) -> Result<PackedImage> {
        let (width, height) = img.dimensions();
        let mut packed = PackedImage::zeroed(width, height);
        if width == 0 || height == 0 {
            return Ok(packed);
        }

        let stride = packed.stride;
        for (y, (row, out)) in img
            .as_raw()
            .chunks(width as usize)
            .zip(packed.data.chunks_mut(stride))
            .enumerate()
        {
            self.pack_into(row, out).map_err(|e| CodecError::Row {
                row: y as u32,
                source: Box::new(e),
            })?;
        }
        Ok(packed)
    }
}
