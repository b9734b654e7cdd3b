//! Error type shared by every module.

use thiserror::Error;

/// Resize computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ResizeError {
    /// Width or height is zero, negative, or does not fit in `u32`.
    #[error("invalid dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: i64, height: i64 },
    /// Modulus of zero.
    #[error("modulus must be at least 1")]
    ZeroModulus,
    /// Mode string is not one of `fit`, `inset`, `width`, `height`.
    #[error("unknown resize mode (expected fit|inset|width|height)")]
    UnknownMode,
}
