//! Packing of quantized scanlines, four 2-bit codes per byte.

use crate::{CODES_PER_BYTE, Code, CodecError, Quantizer, Result, ThresholdSet};

/// Number of packed bytes needed for `samples` samples.
#[inline]
pub fn packed_len(samples: usize) -> usize {
    samples.div_ceil(CODES_PER_BYTE)
}

/// Combine four codes into one byte, first code in the two highest bits.
#[inline]
pub fn combine(codes: [Code; 4]) -> u8 {
    (codes[0].bits() << 6) | (codes[1].bits() << 4) | (codes[2].bits() << 2) | codes[3].bits()
}

impl Quantizer {
    /// Quantize and pack one scanline.
    ///
    /// Positions past the end of a short trailing group are packed as code 0.
    pub fn pack(&self, scanline: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; packed_len(scanline.len())];
        self.pack_into(scanline, &mut out)?;
        Ok(out)
    }

    /// Quantize and pack one scanline into a caller-provided buffer.
    ///
    /// `out` must hold exactly `packed_len(scanline.len())` bytes.
    pub fn pack_into(&self, scanline: &[u8], out: &mut [u8]) -> Result<()> {
        let expected = packed_len(scanline.len());
        if out.len() != expected {
            return Err(CodecError::PackedLength {
                expected,
                actual: out.len(),
            });
        }

        for (group, byte) in scanline.chunks(CODES_PER_BYTE).zip(out.iter_mut()) {
            let mut codes = [Code::Zero; 4];
            for (code, &sample) in codes.iter_mut().zip(group) {
                *code = self.quantize(sample)?;
            }
            *byte = combine(codes);
        }
        Ok(())
    }
}

/// Quantize and pack one scanline, rejecting samples in the unclassified band.
pub fn pack(scanline: &[u8], thresholds: &ThresholdSet) -> Result<Vec<u8>> {
    Quantizer::new(*thresholds).pack(scanline)
}
