//! Dimensions, aspect ratios, and modulus-aligned side derivation.
//!
//! Ratios are kept as reduced fractions so that deriving one side from the
//! other is exact integer arithmetic: the same inputs give the same output on
//! every platform, with or without `std`.
//!
//! # Example
//!
//! ```
//! use zenscale::{Dimension, Modulus};
//!
//! let source = Dimension::new(1920, 1080).unwrap();
//! let ratio = source.ratio(true);
//!
//! assert_eq!(ratio.standard_name(), Some("16:9"));
//! assert_eq!(ratio.calculate_height(640, Modulus::TWO), 360);
//! assert_eq!(ratio.calculate_width(480, Modulus::TWO), 854);
//! ```

use core::fmt;
use core::num::NonZeroU32;

use num_traits::Float;

use crate::error::ResizeError;

/// Width × height in pixels. Both sides are always positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "(u32, u32)", into = "(u32, u32)")
)]
pub struct Dimension {
    width: u32,
    height: u32,
}

impl Dimension {
    /// Create a dimension. Fails if either side is zero.
    pub const fn new(width: u32, height: u32) -> Result<Self, ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self { width, height })
    }

    /// Create a dimension from signed values, as reported by probes that use
    /// negative numbers for "unknown".
    pub fn from_signed(width: i64, height: i64) -> Result<Self, ResizeError> {
        let invalid = ResizeError::InvalidDimension { width, height };
        let w = u32::try_from(width).map_err(|_| invalid)?;
        let h = u32::try_from(height).map_err(|_| invalid)?;
        Self::new(w, h).map_err(|_| invalid)
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Aspect ratio of this dimension, snapped to [`StandardRatios::DEFAULT`]
    /// when `force_standards` is set.
    pub fn ratio(&self, force_standards: bool) -> AspectRatio {
        self.ratio_with(force_standards, &StandardRatios::DEFAULT)
    }

    /// Aspect ratio of this dimension, snapped to `standards` when
    /// `force_standards` is set.
    pub fn ratio_with(&self, force_standards: bool, standards: &StandardRatios<'_>) -> AspectRatio {
        let raw = AspectRatio::of(*self);
        if force_standards {
            raw.standardize(standards)
        } else {
            raw
        }
    }

    /// Whether this dimension fits inside `bounds` on both axes.
    pub const fn fits_within(&self, bounds: Dimension) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<(u32, u32)> for Dimension {
    type Error = ResizeError;

    fn try_from((width, height): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(width, height)
    }
}

impl From<Dimension> for (u32, u32) {
    fn from(d: Dimension) -> Self {
        (d.width, d.height)
    }
}

/// Alignment that derived sides are rounded to (codec/container constraint).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Modulus(NonZeroU32);

impl Modulus {
    /// No alignment.
    pub const ONE: Self = Self(NonZeroU32::MIN);
    /// Even sides, required by most 4:2:0 encoders.
    pub const TWO: Self = Self(NonZeroU32::MIN.saturating_add(1));

    /// Create a modulus. Fails on zero.
    pub const fn new(value: u32) -> Result<Self, ResizeError> {
        match NonZeroU32::new(value) {
            Some(v) => Ok(Self(v)),
            None => Err(ResizeError::ZeroModulus),
        }
    }

    /// Alignment step in pixels.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Largest multiple of this modulus that is `<= bound`, or `None` when
    /// `bound` is smaller than the modulus.
    pub(crate) const fn floor_multiple(self, bound: u32) -> Option<u32> {
        let m = self.0.get();
        let v = bound / m * m;
        if v == 0 { None } else { Some(v) }
    }
}

impl Default for Modulus {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Modulus {
    type Error = ResizeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Modulus> for u32 {
    fn from(m: Modulus) -> Self {
        m.get()
    }
}

/// A named, well-known aspect ratio.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StandardRatio {
    pub name: &'static str,
    pub num: u32,
    pub den: u32,
}

impl StandardRatio {
    /// Create an entry for the ratio `num:den`.
    pub const fn new(name: &'static str, num: u32, den: u32) -> Self {
        Self { name, num, den }
    }

    /// `num / den` as a float.
    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

/// Built-in table: common landscape ratios and their portrait rotations.
const DEFAULT_RATIOS: &[StandardRatio] = &[
    StandardRatio::new("1:1", 1, 1),
    StandardRatio::new("5:4", 5, 4),
    StandardRatio::new("4:3", 4, 3),
    StandardRatio::new("3:2", 3, 2),
    StandardRatio::new("25:16", 25, 16),
    StandardRatio::new("16:10", 16, 10),
    StandardRatio::new("5:3", 5, 3),
    StandardRatio::new("16:9", 16, 9),
    StandardRatio::new("1.85:1", 37, 20),
    StandardRatio::new("2.39:1", 239, 100),
    StandardRatio::new("4:5", 4, 5),
    StandardRatio::new("3:4", 3, 4),
    StandardRatio::new("2:3", 2, 3),
    StandardRatio::new("16:25", 16, 25),
    StandardRatio::new("10:16", 10, 16),
    StandardRatio::new("3:5", 3, 5),
    StandardRatio::new("9:16", 9, 16),
    StandardRatio::new("1:1.85", 20, 37),
    StandardRatio::new("1:2.39", 100, 239),
];

/// Snapping policy: a table of standard ratios and how close a raw ratio must
/// be to one of them to snap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StandardRatios<'a> {
    ratios: &'a [StandardRatio],
    tolerance: f64,
}

impl<'a> StandardRatios<'a> {
    /// Built-in table with a tolerance of 0.03.
    pub const DEFAULT: StandardRatios<'static> = StandardRatios {
        ratios: DEFAULT_RATIOS,
        tolerance: 0.03,
    };

    /// Create a policy. `tolerance` must be a finite value `>= 0`; a raw
    /// ratio snaps when it is at most `tolerance` away from an entry.
    pub const fn new(ratios: &'a [StandardRatio], tolerance: f64) -> Self {
        debug_assert!(
            tolerance >= 0.0 && tolerance < f64::INFINITY,
            "tolerance must be finite and non-negative"
        );
        Self { ratios, tolerance }
    }

    /// Table entries, in tie-break order.
    pub const fn ratios(&self) -> &'a [StandardRatio] {
        self.ratios
    }

    /// Maximum distance at which a raw ratio snaps (inclusive).
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Closest entry within tolerance of `value`. Ties keep the earlier entry.
    pub fn nearest(&self, value: f64) -> Option<&'a StandardRatio> {
        let mut best: Option<(&'a StandardRatio, f64)> = None;
        for r in self.ratios {
            let delta = Float::abs(r.value() - value);
            // False for a NaN tolerance or value, so those match nothing.
            let within = delta <= self.tolerance;
            if !within {
                continue;
            }
            match best {
                Some((_, d)) if d <= delta => {}
                _ => best = Some((r, delta)),
            }
        }
        best.map(|(r, _)| r)
    }
}

impl Default for StandardRatios<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Width-to-height ratio as a reduced fraction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    num: u32,
    den: u32,
    standard: Option<&'static str>,
}

impl AspectRatio {
    /// Exact ratio of a dimension.
    pub fn of(dimension: Dimension) -> Self {
        Self::reduced(dimension.width, dimension.height, None)
    }

    fn reduced(num: u32, den: u32, standard: Option<&'static str>) -> Self {
        let g = gcd(num, den);
        Self {
            num: num / g,
            den: den / g,
            standard,
        }
    }

    /// Replace this ratio by the nearest entry of `standards`, if one lies
    /// within tolerance. Otherwise return the ratio unchanged.
    pub fn standardize(self, standards: &StandardRatios<'_>) -> Self {
        match standards.nearest(self.value()) {
            Some(s) if s.num > 0 && s.den > 0 => Self::reduced(s.num, s.den, Some(s.name)),
            _ => self,
        }
    }

    /// Ratio as a float, for display and tolerance checks.
    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// `(numerator, denominator)` in lowest terms.
    pub const fn as_fraction(&self) -> (u32, u32) {
        (self.num, self.den)
    }

    /// Name of the standard ratio this was snapped to, if any.
    pub const fn standard_name(&self) -> Option<&'static str> {
        self.standard
    }

    /// Whether this ratio is strictly wider than `other`.
    pub fn is_wider_than(&self, other: &AspectRatio) -> bool {
        // a/b > c/d  <=>  a*d > c*b
        let (a, b) = self.as_fraction();
        let (c, d) = other.as_fraction();
        a as u64 * d as u64 > c as u64 * b as u64
    }

    /// Width for a fixed `height`: the nearest multiple of `modulus` to
    /// `height * ratio`, never less than `modulus`. Exact halves round up.
    pub fn calculate_width(&self, height: u32, modulus: Modulus) -> u32 {
        aligned(height as u128 * self.num as u128, self.den as u128, modulus)
    }

    /// Height for a fixed `width`: the nearest multiple of `modulus` to
    /// `width / ratio`, never less than `modulus`. Exact halves round up.
    pub fn calculate_height(&self, width: u32, modulus: Modulus) -> u32 {
        aligned(width as u128 * self.den as u128, self.num as u128, modulus)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.standard {
            Some(name) => f.write_str(name),
            None => write!(f, "{}:{}", self.num, self.den),
        }
    }
}

/// `round_half_up(numer / (denom * m)) * m`, clamped to `[m, u32::MAX]`.
fn aligned(numer: u128, denom: u128, modulus: Modulus) -> u32 {
    let m = modulus.get() as u128;
    let step = denom * m;
    let steps = (2 * numer + step) / (2 * step);
    let max_steps = (u32::MAX as u128) / m;
    let steps = steps.clamp(1, max_steps);
    (steps * m) as u32
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}
