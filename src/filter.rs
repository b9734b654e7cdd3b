//! Scale filter rendering and the resize filter value.
//!
//! [`ResizeFilter`] is what a pipeline builder holds on to: a target, a mode,
//! and an ordering key. Given probe results for the input's video streams it
//! produces the `-vf` argument pair for the transcoder, or nothing when no
//! stream reported a size.
//!
//! # Example
//!
//! ```
//! use zenscale::{Dimension, Modulus, ResizeFilter, ResizeMode};
//!
//! let filter = ResizeFilter::new(Dimension::new(640, 480).unwrap(), ResizeMode::Inset);
//!
//! // First stream fails to probe, second reports 1920x1080.
//! let probes: [Result<Dimension, &str>; 2] = [Err("no size"), Dimension::new(1920, 1080).map_err(|_| "bad")];
//! let args = filter.apply(probes, Modulus::TWO);
//!
//! assert_eq!(args, ["-vf", "[in]scale=640:360 [out]"]);
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::ratio::{Dimension, Modulus, StandardRatios};
use crate::resize::{ResizeMode, ResizeRequest};

/// Command-line flag the scale filter is passed under.
pub const FILTER_FLAG: &str = "-vf";

/// A computed `scale` filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScaleFilter {
    dimension: Dimension,
}

impl ScaleFilter {
    /// Scale filter for an already computed output size.
    pub const fn new(dimension: Dimension) -> Self {
        Self { dimension }
    }

    /// Output size.
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// `["-vf", "[in]scale=W:H [out]"]`.
    pub fn to_args(&self) -> Vec<String> {
        vec![String::from(FILTER_FLAG), format!("{self}")]
    }
}

impl fmt::Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[in]scale={}:{} [out]",
            self.dimension.width(),
            self.dimension.height()
        )
    }
}

/// Ordering key among sibling filters. Higher runs first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(pub i32);

/// A configured resize: target box, mode, ratio snapping, and priority.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResizeFilter {
    dimension: Dimension,
    mode: ResizeMode,
    force_standards: bool,
    priority: Priority,
}

impl ResizeFilter {
    /// Filter with standards forced and priority 0.
    pub const fn new(dimension: Dimension, mode: ResizeMode) -> Self {
        Self {
            dimension,
            mode,
            force_standards: true,
            priority: Priority(0),
        }
    }

    /// Snap source and target ratios to standard ratios.
    pub const fn force_standards(mut self, force: bool) -> Self {
        self.force_standards = force;
        self
    }

    /// Set the ordering key.
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Target dimension.
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Resize mode.
    pub const fn mode(&self) -> ResizeMode {
        self.mode
    }

    /// Whether source and target ratios snap to standard ratios.
    pub const fn are_standards_forced(&self) -> bool {
        self.force_standards
    }

    /// Ordering key among sibling filters.
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// The resize request for a given output modulus.
    pub const fn request(&self, modulus: Modulus) -> ResizeRequest {
        ResizeRequest::new(self.mode, self.dimension)
            .force_standards(self.force_standards)
            .modulus(modulus)
    }

    /// Scale filter for a known source size.
    pub fn compute(&self, source: Dimension, modulus: Modulus) -> ScaleFilter {
        self.compute_with(source, modulus, &StandardRatios::DEFAULT)
    }

    /// Scale filter for a known source size, snapping against `standards`.
    pub fn compute_with(
        &self,
        source: Dimension,
        modulus: Modulus,
        standards: &StandardRatios<'_>,
    ) -> ScaleFilter {
        ScaleFilter::new(self.request(modulus).compute_with(source, standards))
    }

    /// Command arguments for the first candidate that probed successfully.
    ///
    /// Returns an empty list when every candidate failed (or there were
    /// none). Candidates after the first success are not pulled.
    pub fn apply<I, E>(&self, candidates: I, modulus: Modulus) -> Vec<String>
    where
        I: IntoIterator<Item = Result<Dimension, E>>,
        E: fmt::Debug,
    {
        match first_probed(candidates) {
            Some(source) => self.compute(source, modulus).to_args(),
            None => {
                log_debug!("no stream reported dimensions, skipping scale filter");
                Vec::new()
            }
        }
    }
}

/// First successful probe result, skipping failures.
pub fn first_probed<I, E>(candidates: I) -> Option<Dimension>
where
    I: IntoIterator<Item = Result<Dimension, E>>,
    E: fmt::Debug,
{
    candidates.into_iter().find_map(|probe| match probe {
        Ok(d) => Some(d),
        Err(_e) => {
            log_debug!(error = ?_e, "stream probe failed, trying next");
            None
        }
    })
}

/// Sort filters highest priority first. Equal priorities keep their order.
pub fn sort_by_priority(filters: &mut [ResizeFilter]) {
    filters.sort_by(|a, b| b.priority.cmp(&a.priority));
}
