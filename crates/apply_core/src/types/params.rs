//! Auxiliary parameters shared by every invocation of a user function.

use std::collections::BTreeMap;

use super::error::ParamError;
use super::scalar::{Scalar, ScalarKind};
use super::value::Value;

/// Named auxiliary parameters.
///
/// The same `Params` is passed by reference to every invocation of the
/// user function within one apply call.
///
/// # Examples
/// ```
/// use apply_core::types::Params;
///
/// let aux = Params::new().with("mean", 10.0).with("n", 3_i64);
/// assert_eq!(aux.get_f64("mean").unwrap(), 10.0);
/// assert_eq!(aux.get_i64("n").unwrap(), 3);
/// assert!(aux.get_f64("sd").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: BTreeMap<String, Value>,
}

impl Params {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn scalar(&self, name: &str, expected: ScalarKind) -> Result<&Scalar, ParamError> {
        let value = self
            .entries
            .get(name)
            .ok_or_else(|| ParamError::Missing(name.to_string()))?;
        value.as_scalar().ok_or_else(|| ParamError::WrongKind {
            name: name.to_string(),
            expected,
        })
    }

    /// Numeric parameter; logical and integer values are widened.
    pub fn get_f64(&self, name: &str) -> Result<f64, ParamError> {
        let numeric = match self.scalar(name, ScalarKind::Double)? {
            Scalar::Character(_) => None,
            other => other.as_f64(),
        };
        numeric.ok_or_else(|| ParamError::WrongKind {
            name: name.to_string(),
            expected: ScalarKind::Double,
        })
    }

    /// Integer parameter.
    pub fn get_i64(&self, name: &str) -> Result<i64, ParamError> {
        match self.scalar(name, ScalarKind::Integer)? {
            Scalar::Integer(i) => Ok(*i),
            Scalar::Logical(b) => Ok(i64::from(*b)),
            _ => Err(ParamError::WrongKind {
                name: name.to_string(),
                expected: ScalarKind::Integer,
            }),
        }
    }

    /// Logical parameter.
    pub fn get_bool(&self, name: &str) -> Result<bool, ParamError> {
        match self.scalar(name, ScalarKind::Logical)? {
            Scalar::Logical(b) => Ok(*b),
            _ => Err(ParamError::WrongKind {
                name: name.to_string(),
                expected: ScalarKind::Logical,
            }),
        }
    }

    /// Character parameter.
    pub fn get_str(&self, name: &str) -> Result<&str, ParamError> {
        self.scalar(name, ScalarKind::Character)?
            .as_str()
            .ok_or_else(|| ParamError::WrongKind {
                name: name.to_string(),
                expected: ScalarKind::Character,
            })
    }
}
