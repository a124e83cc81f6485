//! Error taxonomy for the path-selection core.

use thiserror::Error;

/// Errors raised while selecting paths.
#[derive(Debug, Error)]
pub enum Error {
    /// The solver returned no feasible solution and selection cannot proceed.
    #[error("solver found no feasible solution")]
    Unsolvable,
    /// An enum value or shape passed to a selector/preprocessor is not supported.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable explanation of what was invalid.
        reason: String,
    },
    /// The mask passed to [`crate::pptc::Pptc::mask`] does not match the candidate count.
    #[error("mask length {got} does not match candidate count {want}")]
    MaskLengthMismatch {
        /// Length of the mask that was supplied.
        got: usize,
        /// Number of candidate paths for the traffic class.
        want: usize,
    },
    /// The external solver backend failed for a reason internal to it.
    #[error("solver backend error: {0}")]
    Solver(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
