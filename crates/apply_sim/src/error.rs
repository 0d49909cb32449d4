//! Error types for simulation draws.

use thiserror::Error;

/// Categorised simulation errors.
///
/// # Examples
/// ```
/// use apply_sim::SimError;
///
/// let err = SimError::InvalidParameter { name: "sd", value: -1.0 };
/// assert_eq!(err.to_string(), "Invalid parameter sd = -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A distribution parameter is outside its valid domain.
    #[error("Invalid parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// More items were requested than a population without replacement holds.
    #[error("Cannot take a sample of size {size} from a population of {population} without replacement")]
    SampleTooLarge {
        /// Requested sample size
        size: usize,
        /// Population size
        population: usize,
    },

    /// Sampling weights are unusable.
    #[error("Invalid sampling weights: {0}")]
    InvalidWeights(String),
}
