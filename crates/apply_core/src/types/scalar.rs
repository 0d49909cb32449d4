//! Atomic scalar values and kind coercion.
//!
//! A [`Scalar`] is a single element of an atomic vector. Scalars of different
//! kinds can be combined into one vector by coercing every element to the
//! highest [`ScalarKind`] present, following the ordering
//! `Logical < Integer < Double < Character`.

use std::fmt;

/// The kind of a [`Scalar`], ordered by coercion precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarKind {
    /// `true` / `false`
    Logical,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Double,
    /// UTF-8 text
    Character,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Logical => "logical",
            ScalarKind::Integer => "integer",
            ScalarKind::Double => "double",
            ScalarKind::Character => "character",
        };
        f.write_str(name)
    }
}

/// A single atomic value.
///
/// # Examples
/// ```
/// use apply_core::types::{Scalar, ScalarKind};
///
/// let x = Scalar::from(3_i64);
/// assert_eq!(x.kind(), ScalarKind::Integer);
/// assert_eq!(x.coerce(ScalarKind::Double), Scalar::Double(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Logical value
    Logical(bool),
    /// Integer value
    Integer(i64),
    /// Double value
    Double(f64),
    /// Character value
    Character(String),
}

impl Scalar {
    /// Returns the kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Logical(_) => ScalarKind::Logical,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Double(_) => ScalarKind::Double,
            Scalar::Character(_) => ScalarKind::Character,
        }
    }

    /// Converts this scalar to `kind`.
    ///
    /// Coercion towards a lower kind is lossy: doubles truncate towards zero
    /// when converted to integers, and any non-zero number becomes `true`.
    /// Character values that do not parse become zero / `false`.
    pub fn coerce(&self, kind: ScalarKind) -> Scalar {
        match kind {
            ScalarKind::Logical => Scalar::Logical(self.as_bool()),
            ScalarKind::Integer => Scalar::Integer(match self {
                Scalar::Logical(b) => i64::from(*b),
                Scalar::Integer(i) => *i,
                Scalar::Double(d) => *d as i64,
                Scalar::Character(s) => s.trim().parse().unwrap_or(0),
            }),
            ScalarKind::Double => Scalar::Double(self.as_f64().unwrap_or(0.0)),
            ScalarKind::Character => Scalar::Character(self.to_string()),
        }
    }

    /// Numeric view of the scalar, `None` for unparseable text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Logical(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Double(d) => Some(*d),
            Scalar::Character(s) => s.trim().parse().ok(),
        }
    }

    /// Truthiness of the scalar.
    pub fn as_bool(&self) -> bool {
        match self {
            Scalar::Logical(b) => *b,
            Scalar::Integer(i) => *i != 0,
            Scalar::Double(d) => *d != 0.0,
            Scalar::Character(s) => matches!(s.as_str(), "TRUE" | "true" | "T"),
        }
    }

    /// Returns the text when this is a character scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Character(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Logical(true) => f.write_str("TRUE"),
            Scalar::Logical(false) => f.write_str("FALSE"),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Double(d) => write!(f, "{}", d),
            Scalar::Character(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Logical(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Double(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Character(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Character(value)
    }
}

/// Highest kind among `kinds`, or `None` when empty.
pub fn common_kind<I>(kinds: I) -> Option<ScalarKind>
where
    I: IntoIterator<Item = ScalarKind>,
{
    kinds.into_iter().max()
}
