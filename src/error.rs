//!
//! Error types shared by model construction, smoothing and emission updates.
//!
//! Dimension/shape problems fail fast at the component boundary. Numerical
//! degeneracies (a normalization step summing to zero) are *not* errors: they
//! are surfaced as a zero constant in the output so the caller can detect an
//! impossible-observation sequence.
//!
use thiserror::Error;

/// Unified error type for this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    /// Mismatched dimensions between the transition matrix, the initial
    /// distribution, the emission models and the observations.
    #[error("malformed input: {what} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// An empty observation sequence (T = 0) has no posterior.
    #[error("empty observation sequence")]
    EmptySequence,

    /// An emission-model update would leave the model in an invalid state
    /// (wrong-shaped parameter vector, non-positive variance). The model is
    /// left unchanged.
    #[error("invalid parameter update: {0}")]
    InvalidParameterUpdate(String),

    /// Expected-log-likelihood computation requires a prior to be attached.
    #[error("no prior attached to the emission model")]
    MissingPrior,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
