use std::fmt::Display;

use crate::models::plex_mode::PlexMode;

pub type Result<T> = std::result::Result<T, CorrectionError>;

/// Every failure here is a deterministic validation or numerical failure.
/// None of them are transient; retrying with the same input cannot succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionError {
    /// A five-field purity row does not sum to 100 within tolerance.
    /// Can only happen if a hardcoded reagent table is wrong, so it is
    /// really a build-time invariant check (see `verify_catalog`).
    IsotopeSumMismatch { sum: f64 },
    /// The requested mode has no registered channel table
    /// (`CustomOrNone`, or a corrector constructed in that mode).
    UnsupportedPlexMode { mode: PlexMode },
    /// The intensity vector disagrees with the mode's channel count.
    VectorLengthMismatch {
        expected: usize,
        actual: usize,
        mode: &'static str,
    },
    /// The crosstalk matrix could not be factorized.
    SingularMatrix { dim: usize },
    /// The solver produced a NaN or infinite entry.
    NonFiniteSolution { index: usize },
    Other(String),
}

impl CorrectionError {
    pub fn custom(msg: impl Display) -> Self {
        Self::Other(msg.to_string())
    }
}

impl Display for CorrectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IsotopeSumMismatch { sum } => {
                write!(
                    f,
                    "isotope contribution percentages sum to {} (expected 100 +/- 0.05)",
                    sum
                )
            }
            Self::UnsupportedPlexMode { mode } => {
                write!(
                    f,
                    "no isotope contribution table registered for {}",
                    mode.display_name()
                )
            }
            Self::VectorLengthMismatch {
                expected,
                actual,
                mode,
            } => {
                write!(
                    f,
                    "intensity vector has {} channels but {} expects {}",
                    actual, mode, expected
                )
            }
            Self::SingularMatrix { dim } => {
                write!(f, "crosstalk matrix ({dim}x{dim}) is singular, cannot solve")
            }
            Self::NonFiniteSolution { index } => {
                write!(f, "solver returned a non-finite intensity at channel {}", index)
            }
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}
