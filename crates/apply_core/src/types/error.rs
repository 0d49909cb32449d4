//! Error types for structured error handling.
//!
//! This module provides:
//! - `ApplyError`: Errors from apply, margin, grouping and grouped operations
//! - `ParamError`: Errors from reading auxiliary parameters
//! - `BoxError`: The error type returned by user-supplied functions

use thiserror::Error;

use super::scalar::ScalarKind;

/// Error type returned by user-supplied functions.
///
/// Any error type converts into it with `?`, and so do string messages:
/// `return Err("negative input".into())`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Categorised toolkit errors.
///
/// An operation that fails returns only the error; no partial result is
/// ever produced.
///
/// # Examples
/// ```
/// use apply_core::types::ApplyError;
///
/// let err = ApplyError::ShapeMismatch { index: 1, expected: 3, found: 2 };
/// assert_eq!(
///     err.to_string(),
///     "Container 1 has length 2, expected 3"
/// );
/// ```
#[derive(Error, Debug)]
pub enum ApplyError {
    /// No input containers were supplied.
    #[error("At least one input container is required")]
    NoContainers,

    /// Containers passed to a multi-container apply differ in length.
    #[error("Container {index} has length {found}, expected {expected}")]
    ShapeMismatch {
        /// Position of the offending container
        index: usize,
        /// Length of the first container
        expected: usize,
        /// Length of the offending container
        found: usize,
    },

    /// A label sequence does not match the element count.
    #[error("Label count {labels} does not match element count {values}")]
    LabelLength {
        /// Number of elements
        values: usize,
        /// Number of labels
        labels: usize,
    },

    /// The user function failed for an element or group.
    #[error("Function failed at index {index}{}: {source}", label_suffix(.label))]
    Invocation {
        /// Position of the element, slice or bucket
        index: usize,
        /// Label of the element or bucket, if any
        label: Option<String>,
        /// Underlying error raised by the function
        #[source]
        source: BoxError,
    },

    /// A result did not match the declared result template.
    #[error("Result {index} does not match template: expected {expected}, found {found}")]
    TemplateMismatch {
        /// Position of the offending result
        index: usize,
        /// Description of the template
        expected: String,
        /// Description of the actual result
        found: String,
    },

    /// The set of retained axes is unusable for the given array.
    #[error("Invalid margin: {0}")]
    InvalidMargin(String),

    /// No grouping keys were supplied.
    #[error("At least one grouping key is required")]
    NoKeys,

    /// A grouping key is not parallel to the container.
    #[error("Key {key} has length {found}, expected {expected}")]
    KeyLength {
        /// Position of the offending key
        key: usize,
        /// Container length
        expected: usize,
        /// Key length
        found: usize,
    },

    /// A label is not among the declared factor levels.
    #[error("Label '{0}' is not a declared level")]
    UnknownLevel(String),

    /// A level was declared more than once.
    #[error("Level '{0}' is declared more than once")]
    DuplicateLevel(String),

    /// The composite of several keys has more level combinations than can
    /// be enumerated.
    #[error("Composite key over {keys} factors has too many level combinations")]
    LevelOverflow {
        /// Number of factors combined
        keys: usize,
    },

    /// An array could not be assembled in the requested shape.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

fn label_suffix(label: &Option<String>) -> String {
    match label {
        Some(l) => format!(" ('{}')", l),
        None => String::new(),
    }
}

/// Errors from reading auxiliary parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The parameter was not supplied.
    #[error("Missing parameter: {0}")]
    Missing(String),

    /// The parameter holds a value of the wrong kind.
    #[error("Parameter '{name}' is not a {expected} scalar")]
    WrongKind {
        /// Parameter name
        name: String,
        /// Expected kind
        expected: ScalarKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invocation_display_with_label() {
        let err = ApplyError::Invocation {
            index: 2,
            label: Some("b".to_string()),
            source: "boom".into(),
        };
        assert_eq!(err.to_string(), "Function failed at index 2 ('b'): boom");
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".into()));
    }

    #[test]
    fn test_invocation_display_without_label() {
        let err = ApplyError::Invocation {
            index: 0,
            label: None,
            source: "bad".into(),
        };
        assert_eq!(err.to_string(), "Function failed at index 0: bad");
    }

    #[test]
    fn test_param_error_display() {
        let err = ParamError::WrongKind {
            name: "sd".to_string(),
            expected: ScalarKind::Double,
        };
        assert_eq!(err.to_string(), "Parameter 'sd' is not a double scalar");
        assert_eq!(
            ParamError::Missing("n".into()).to_string(),
            "Missing parameter: n"
        );
    }
}
