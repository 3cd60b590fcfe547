//! Classification of one sample into a 2-bit code.

use crate::{CodecError, Result, ThresholdSet};

/// A 2-bit quantization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Code {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl Code {
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// What to do with a sample in the band `0 < sample <= t1`, which none of
/// the classification rules cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapPolicy {
    /// Fail with [`CodecError::InvalidSample`].
    #[default]
    Reject,
    /// Classify as [`Code::Zero`].
    Zero,
}

/// Immutable conversion settings: the threshold set plus the gap policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    thresholds: ThresholdSet,
    policy: GapPolicy,
}

impl Quantizer {
    /// Create a quantizer that rejects gap samples.
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self {
            thresholds,
            policy: GapPolicy::default(),
        }
    }

    /// Builder: set the gap policy.
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn thresholds(&self) -> ThresholdSet {
        self.thresholds
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.policy
    }

    /// Classify a single sample.
    ///
    /// Rules are tried in order and the first match wins:
    /// - `0`                  -> 0
    /// - `t1 < sample <= t2`  -> 1
    /// - `t2 < sample <= t3`  -> 2
    /// - `t3 < sample`        -> 3
    ///
    /// Anything else is handled by the gap policy.
    #[inline]
    pub fn quantize(&self, sample: u8) -> Result<Code> {
        let t = &self.thresholds;
        if sample == 0 {
            Ok(Code::Zero)
        } else if t.t1() < sample && sample <= t.t2() {
            Ok(Code::One)
        } else if t.t2() < sample && sample <= t.t3() {
            Ok(Code::Two)
        } else if t.t3() < sample {
            Ok(Code::Three)
        } else {
            match self.policy {
                GapPolicy::Reject => Err(CodecError::InvalidSample { sample, t1: t.t1() }),
                GapPolicy::Zero => Ok(Code::Zero),
            }
        }
    }
}

/// Classify a single sample, rejecting samples in the unclassified band.
pub fn quantize(sample: u8, thresholds: &ThresholdSet) -> Result<Code> {
    Quantizer::new(*thresholds).quantize(sample)
}
