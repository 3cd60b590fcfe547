//! The three boundaries that split the sample range into four bands.

use crate::{CodecError, Result};

/// Three thresholds `t1 <= t2 <= t3` shared read-only by a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThresholdSet {
    t1: u8,
    t2: u8,
    t3: u8,
}

impl ThresholdSet {
    /// Build a threshold set, rejecting descending values.
    pub fn new(t1: u8, t2: u8, t3: u8) -> Result<Self> {
        if t1 > t2 || t2 > t3 {
            return Err(CodecError::UnorderedThresholds { t1, t2, t3 });
        }
        Ok(Self { t1, t2, t3 })
    }

    /// Build a threshold set without checking the ordering.
    ///
    /// Descending thresholds still classify deterministically, but some
    /// bands become empty and more samples land in the unclassified band.
    pub fn unchecked(t1: u8, t2: u8, t3: u8) -> Self {
        Self { t1, t2, t3 }
    }

    pub fn t1(&self) -> u8 {
        self.t1
    }

    pub fn t2(&self) -> u8 {
        self.t2
    }

    pub fn t3(&self) -> u8 {
        self.t3
    }

    /// Whether `t1 <= t2 <= t3` holds.
    pub fn is_ordered(&self) -> bool {
        self.t1 <= self.t2 && self.t2 <= self.t3
    }
}
