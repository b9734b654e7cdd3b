//! Video resize dimension computation with aspect-ratio modes, modulus
//! alignment, and scale filter rendering.
//!
//! Pure arithmetic: no decoding, no process spawning, `no_std` compatible.
//! Rendering the filter arguments needs the `alloc` feature.
//!
//! # Modules
//!
//! - [`ratio`]: Dimensions, exact aspect ratios, standard-ratio snapping, modulus alignment
//! - [`resize`]: Resize modes (Fit, Inset, ScaleWidth, ScaleHeight) and output size computation
//! - [`filter`]: `scale` filter arguments, resize filter values, probe fallback, priority ordering
//!
//! # Example
//!
//! ```
//! use zenscale::{Dimension, Modulus, ResizeFilter, ResizeMode};
//!
//! let filter = ResizeFilter::new(Dimension::new(100, 100).unwrap(), ResizeMode::Fit);
//! let source = Dimension::new(1920, 1080).unwrap();
//!
//! assert_eq!(
//!     filter.compute(source, Modulus::ONE).to_args(),
//!     ["-vf", "[in]scale=100:100 [out]"]
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Logging is compiled out unless the `tracing` feature is on.
macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}

pub mod error;
#[cfg(feature = "alloc")]
pub mod filter;
pub mod ratio;
pub mod resize;

pub use error::ResizeError;
#[cfg(feature = "alloc")]
pub use filter::{FILTER_FLAG, Priority, ResizeFilter, ScaleFilter, first_probed, sort_by_priority};
pub use ratio::{AspectRatio, Dimension, Modulus, StandardRatio, StandardRatios};
pub use resize::{ResizeMode, ResizeRequest};
