//! Image header metadata carried unchanged from input to output.

use std::fmt;

use tiff::encoder::Rational;
use tiff::tags::ResolutionUnit;

/// An unsigned TIFF rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub numerator: u32,
    pub denominator: u32,
}

impl Ratio {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// A whole number of pixels per resolution unit.
    pub const fn whole(value: u32) -> Self {
        Self::new(value, 1)
    }

    pub(crate) fn to_rational(self) -> Rational {
        Rational {
            n: self.numerator,
            d: self.denominator,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Resolution assumed when a file carries no resolution tags.
pub const DEFAULT_RESOLUTION: Ratio = Ratio::whole(72);

/// Dimensions and resolution of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub x_resolution: Ratio,
    pub y_resolution: Ratio,
    pub resolution_unit: ResolutionUnit,
}

impl ImageHeader {
    /// Header with the given size, 72 pixels per inch in both directions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x_resolution: DEFAULT_RESOLUTION,
            y_resolution: DEFAULT_RESOLUTION,
            resolution_unit: ResolutionUnit::Inch,
        }
    }

    /// Builder: set both resolutions in pixels per inch.
    pub fn with_dpi(mut self, x: u32, y: u32) -> Self {
        self.x_resolution = Ratio::whole(x);
        self.y_resolution = Ratio::whole(y);
        self.resolution_unit = ResolutionUnit::Inch;
        self
    }
}
