//! Error taxonomy for the GA crate.
//!
//! All operations either succeed or fail synchronously; there is no
//! transient-failure or retry concept in this domain. Errors surface
//! immediately to the caller and are never swallowed.

/// Errors produced by GA construction and population operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// A gene or individual index was outside valid bounds.
    #[error("index {index} out of bounds for length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// A configuration parameter or gene value was outside its valid range.
    #[error("{name} is invalid: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// An operation requiring at least one individual was invoked on an
    /// empty population.
    #[error("operation requires a non-empty population")]
    EmptyPopulation,
}

impl GaError {
    /// Shorthand for an [`InvalidParameter`](GaError::InvalidParameter).
    pub(crate) fn param(name: &'static str, value: f64, reason: &'static str) -> Self {
        GaError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
