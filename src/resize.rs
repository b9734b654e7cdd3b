//! Resize policy: from a mode, a target box, and a source size to the final
//! output size.
//!
//! # Example
//!
//! ```
//! use zenscale::{Dimension, Modulus, ResizeMode, ResizeRequest};
//!
//! let target = Dimension::new(640, 480).unwrap();
//! let source = Dimension::new(1920, 1080).unwrap();
//!
//! let out = ResizeRequest::new(ResizeMode::Inset, target)
//!     .modulus(Modulus::TWO)
//!     .compute(source);
//!
//! // 16:9 source letterboxed into a 4:3 box
//! assert_eq!(out, Dimension::new(640, 360).unwrap());
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::ResizeError;
use crate::ratio::{Dimension, Modulus, StandardRatios};

/// How the source is fitted to the target dimension.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeMode {
    /// Use the target dimension as-is. May distort (anamorphosis).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "fit"))]
    Fit,
    /// Largest box inside the target that keeps the source aspect ratio.
    #[cfg_attr(feature = "serde", serde(rename = "inset"))]
    Inset,
    /// Keep the target height, derive the width from the source ratio.
    #[cfg_attr(feature = "serde", serde(rename = "width"))]
    ScaleWidth,
    /// Keep the target width, derive the height from the source ratio.
    #[cfg_attr(feature = "serde", serde(rename = "height"))]
    ScaleHeight,
}

impl ResizeMode {
    /// Every mode, in wire-name order.
    pub const ALL: [ResizeMode; 4] = [Self::Fit, Self::Inset, Self::ScaleWidth, Self::ScaleHeight];

    /// Wire name: `fit`, `inset`, `width` or `height`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Inset => "inset",
            Self::ScaleWidth => "width",
            Self::ScaleHeight => "height",
        }
    }

    /// Whether the output keeps the source aspect ratio. Public API for
    /// callers deciding whether to pad onto a fixed canvas.
    pub const fn preserves_aspect(self) -> bool {
        !matches!(self, Self::Fit)
    }

    /// Parse a mode name, falling back to [`ResizeMode::Fit`] for anything
    /// that is not exactly one of the wire names (case and whitespace
    /// included).
    pub fn from_name_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(mode) => mode,
            Err(_) => {
                log_warn!(mode = name, "unknown resize mode, using fit");
                Self::Fit
            }
        }
    }
}

impl FromStr for ResizeMode {
    type Err = ResizeError;

    /// Exact, case-sensitive match on a wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or(ResizeError::UnknownMode)
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resize request: target box, mode, ratio snapping, and alignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeRequest {
    pub target: Dimension,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: ResizeMode,
    #[cfg_attr(feature = "serde", serde(default = "default_force_standards"))]
    pub force_standards: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modulus: Modulus,
}

#[cfg(feature = "serde")]
fn default_force_standards() -> bool {
    true
}

impl ResizeRequest {
    /// Request with standards forced and a modulus of 1.
    pub const fn new(mode: ResizeMode, target: Dimension) -> Self {
        Self {
            target,
            mode,
            force_standards: true,
            modulus: Modulus::ONE,
        }
    }

    /// Snap source and target ratios to standard ratios.
    pub const fn force_standards(mut self, force: bool) -> Self {
        self.force_standards = force;
        self
    }

    /// Alignment for derived sides.
    pub const fn modulus(mut self, modulus: Modulus) -> Self {
        self.modulus = modulus;
        self
    }

    /// Output dimension for `source`, snapping against the built-in table.
    pub fn compute(&self, source: Dimension) -> Dimension {
        self.compute_with(source, &StandardRatios::DEFAULT)
    }

    /// Output dimension for `source`, snapping against `standards`.
    pub fn compute_with(&self, source: Dimension, standards: &StandardRatios<'_>) -> Dimension {
        let target = self.target;
        let modulus = self.modulus;
        let original = source.ratio_with(self.force_standards, standards);

        let (width, height) = match self.mode {
            ResizeMode::Fit => (target.width(), target.height()),
            ResizeMode::ScaleWidth => {
                let h = target.height();
                (original.calculate_width(h, modulus), h)
            }
            ResizeMode::ScaleHeight => {
                let w = target.width();
                (w, original.calculate_height(w, modulus))
            }
            ResizeMode::Inset => {
                let target_ratio = target.ratio_with(self.force_standards, standards);
                if target_ratio.is_wider_than(&original) {
                    // Height constrains.
                    let h = target.height();
                    let w = original.calculate_width(h, modulus);
                    (within(w, target.width(), modulus), h)
                } else {
                    // Width constrains.
                    let w = target.width();
                    let h = original.calculate_height(w, modulus);
                    (w, within(h, target.height(), modulus))
                }
            }
        };

        // Every branch yields sides >= 1: target sides are positive and the
        // derived ones are at least the modulus.
        let out = Dimension::new(width, height).unwrap_or(target);
        log_debug!(
            %source,
            %target,
            mode = self.mode.name(),
            modulus = modulus.get(),
            ratio = %original,
            output = %out,
            "computed resize"
        );
        out
    }
}

/// Pull a derived side that rounded past `bound` back inside it.
fn within(value: u32, bound: u32, modulus: Modulus) -> u32 {
    if value <= bound {
        value
    } else {
        modulus.floor_multiple(bound).unwrap_or(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(w: u32, h: u32) -> Dimension {
        Dimension::new(w, h).unwrap()
    }

    fn m(v: u32) -> Modulus {
        Modulus::new(v).unwrap()
    }

    // ── ResizeMode ──────────────────────────────────────────────────────

    #[test]
    fn mode_parse_strict() {
        assert_eq!("fit".parse::<ResizeMode>(), Ok(ResizeMode::Fit));
        assert_eq!("inset".parse::<ResizeMode>(), Ok(ResizeMode::Inset));
        assert_eq!("width".parse::<ResizeMode>(), Ok(ResizeMode::ScaleWidth));
        assert_eq!("height".parse::<ResizeMode>(), Ok(ResizeMode::ScaleHeight));
        assert_eq!("HEIGHT".parse::<ResizeMode>(), Err(ResizeError::UnknownMode));
        assert_eq!(" inset".parse::<ResizeMode>(), Err(ResizeError::UnknownMode));
        assert_eq!("insert".parse::<ResizeMode>(), Err(ResizeError::UnknownMode));
        assert_eq!("".parse::<ResizeMode>(), Err(ResizeError::UnknownMode));
    }

    #[test]
    fn mode_parse_lenient() {
        assert_eq!(ResizeMode::from_name_or_default("inset"), ResizeMode::Inset);
        assert_eq!(ResizeMode::from_name_or_default("stretch"), ResizeMode::Fit);
    }

    #[test]
    fn mode_lenient_is_exact_match() {
        for name in ["INSET", "Inset", " inset", "inset ", "Width\n", "HEIGHT"] {
            assert_eq!(ResizeMode::from_name_or_default(name), ResizeMode::Fit, "{name:?}");
        }
    }

    #[test]
    fn miscased_inset_renders_as_fit() {
        let target = dim(640, 480);
        let mode = ResizeMode::from_name_or_default("INSET");
        let out = ResizeRequest::new(mode, target)
            .modulus(Modulus::TWO)
            .compute(dim(1920, 1080));
        assert_eq!(out, target);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in ResizeMode::ALL {
            assert_eq!(mode.to_string().parse::<ResizeMode>(), Ok(mode));
        }
    }

    #[test]
    fn mode_default_is_fit() {
        assert_eq!(ResizeMode::default(), ResizeMode::Fit);
        assert!(!ResizeMode::Fit.preserves_aspect());
        assert!(ResizeMode::Inset.preserves_aspect());
    }

    // ── Fit ─────────────────────────────────────────────────────────────

    #[test]
    fn fit_is_identity_on_target() {
        let target = dim(320, 240);
        for source in [dim(1920, 1080), dim(1, 1), dim(480, 1920), dim(7, 3)] {
            let out = ResizeRequest::new(ResizeMode::Fit, target)
                .modulus(m(16))
                .compute(source);
            assert_eq!(out, target);
        }
    }

    // ── ScaleWidth / ScaleHeight ────────────────────────────────────────

    #[test]
    fn scale_width_keeps_height() {
        let out = ResizeRequest::new(ResizeMode::ScaleWidth, dim(100, 480))
            .modulus(Modulus::TWO)
            .compute(dim(1920, 1080));
        assert_eq!(out, dim(854, 480));
    }

    #[test]
    fn scale_height_keeps_width() {
        let out = ResizeRequest::new(ResizeMode::ScaleHeight, dim(640, 100))
            .modulus(Modulus::TWO)
            .compute(dim(1920, 1080));
        assert_eq!(out, dim(640, 360));
    }

    #[test]
    fn scale_height_portrait_source() {
        // 9:16 at width 360 → 640
        let out = ResizeRequest::new(ResizeMode::ScaleHeight, dim(360, 1))
            .compute(dim(1080, 1920));
        assert_eq!(out, dim(360, 640));
    }

    #[test]
    fn scale_width_unforced_uses_raw_ratio() {
        // 1918x1080 unforced: 1.77593 * 1080 = 1918
        let forced = ResizeRequest::new(ResizeMode::ScaleWidth, dim(1, 1080)).compute(dim(1918, 1080));
        let raw = ResizeRequest::new(ResizeMode::ScaleWidth, dim(1, 1080))
            .force_standards(false)
            .compute(dim(1918, 1080));
        assert_eq!(forced, dim(1920, 1080));
        assert_eq!(raw, dim(1918, 1080));
    }

    #[test]
    fn scale_axes_hold_for_many_sources() {
        for (sw, sh) in [(1920, 1080), (640, 480), (1080, 1920), (333, 777), (4096, 1716)] {
            for mv in [1, 2, 4, 16] {
                let req = |mode| {
                    ResizeRequest::new(mode, dim(500, 300))
                        .modulus(m(mv))
                        .compute(dim(sw, sh))
                };
                let w = req(ResizeMode::ScaleWidth);
                assert_eq!(w.height(), 300);
                assert_eq!(w.width() % mv, 0);
                let h = req(ResizeMode::ScaleHeight);
                assert_eq!(h.width(), 500);
                assert_eq!(h.height() % mv, 0);
            }
        }
    }

    // ── Inset ───────────────────────────────────────────────────────────

    #[test]
    fn inset_hd_into_4_3() {
        let out = ResizeRequest::new(ResizeMode::Inset, dim(640, 480))
            .modulus(Modulus::TWO)
            .compute(dim(1920, 1080));
        assert_eq!(out, dim(640, 360));
    }

    #[test]
    fn inset_4_3_into_hd_pillarboxes() {
        let out = ResizeRequest::new(ResizeMode::Inset, dim(1280, 720))
            .modulus(Modulus::TWO)
            .compute(dim(640, 480));
        assert_eq!(out, dim(960, 720));
    }

    #[test]
    fn inset_same_ratio_fills_target() {
        let out = ResizeRequest::new(ResizeMode::Inset, dim(1280, 720)).compute(dim(1920, 1080));
        assert_eq!(out, dim(1280, 720));
    }

    #[test]
    fn inset_pulls_overshoot_back_inside() {
        // 100/16:9 = 56.25 → nearest multiple of 16 is 64, past the 57 bound.
        let out = ResizeRequest::new(ResizeMode::Inset, dim(100, 57))
            .modulus(m(16))
            .compute(dim(1920, 1080));
        assert_eq!(out, dim(100, 48));
    }

    #[test]
    fn inset_bound_smaller_than_modulus() {
        let out = ResizeRequest::new(ResizeMode::Inset, dim(100, 10))
            .modulus(m(16))
            .compute(dim(1000, 1000));
        assert!(out.fits_within(dim(100, 10)));
        assert_eq!(out.height(), 10);
    }

    #[test]
    fn inset_never_exceeds_target() {
        let sources = [
            (1920, 1080),
            (1280, 720),
            (640, 480),
            (1080, 1920),
            (720, 576),
            (4096, 1716),
            (1000, 1000),
            (333, 777),
            (1918, 1080),
        ];
        let targets = [(640, 480), (100, 57), (1280, 720), (500, 500), (360, 640), (99, 31)];
        for (sw, sh) in sources {
            for (tw, th) in targets {
                for mv in [1, 2, 4, 8, 16] {
                    for force in [true, false] {
                        let target = dim(tw, th);
                        let out = ResizeRequest::new(ResizeMode::Inset, target)
                            .modulus(m(mv))
                            .force_standards(force)
                            .compute(dim(sw, sh));
                        assert!(
                            out.fits_within(target),
                            "{sw}x{sh} into {target} m={mv} force={force} → {out}"
                        );
                        assert!(out.width() == tw || out.height() == th);
                    }
                }
            }
        }
    }

    // ── Injected standards ──────────────────────────────────────────────

    #[test]
    fn compute_with_custom_table() {
        use crate::ratio::StandardRatio;
        const CINEMA: &[StandardRatio] = &[StandardRatio::new("2:1", 2, 1)];
        let table = StandardRatios::new(CINEMA, 0.1);
        // 1.95 snaps to 2:1 with the custom table, stays raw with the default.
        let req = ResizeRequest::new(ResizeMode::ScaleHeight, dim(1000, 1));
        assert_eq!(req.compute_with(dim(1950, 1000), &table), dim(1000, 500));
        assert_eq!(req.compute(dim(1950, 1000)), dim(1000, 513));
    }
}
