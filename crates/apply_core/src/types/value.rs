//! Dynamic values passed to and returned from user functions.

use ndarray::ArrayD;

use super::container::Container;
use super::scalar::{Scalar, ScalarKind};

/// A value handled by the apply engines.
///
/// `Scalar`, `Vector` and `Array` are atomic values and take part in result
/// simplification; `List` and `Null` never do.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (zero length)
    Null,
    /// A single atomic value
    Scalar(Scalar),
    /// An atomic vector with optional element labels
    Vector(Container<Scalar>),
    /// A multi-dimensional atomic array
    Array(ArrayD<Scalar>),
    /// A heterogeneous sequence of values
    List(Container<Value>),
}

impl Value {
    /// Builds an unlabelled atomic vector.
    pub fn vector<T: Into<Scalar>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Vector(items.into_iter().map(Into::into).collect())
    }

    /// Builds an unlabelled list.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Container::new(items))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Scalar(_) => 1,
            Value::Vector(v) => v.len(),
            Value::Array(a) => a.len(),
            Value::List(l) => l.len(),
        }
    }

    /// Whether the value has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the value is a scalar, vector or array.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Value::Scalar(_) | Value::Vector(_) | Value::Array(_))
    }

    /// Atomic elements in storage order, `None` for lists and `Null`.
    ///
    /// Arrays are flattened column-major.
    pub fn atomic_elements(&self) -> Option<Vec<Scalar>> {
        match self {
            Value::Scalar(s) => Some(vec![s.clone()]),
            Value::Vector(v) => Some(v.values().to_vec()),
            Value::Array(a) => Some(a.t().iter().cloned().collect()),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Highest scalar kind among the atomic elements.
    pub fn atomic_kind(&self) -> Option<ScalarKind> {
        match self {
            Value::Scalar(s) => Some(s.kind()),
            Value::Vector(v) => v.iter().map(Scalar::kind).max(),
            Value::Array(a) => a.iter().map(Scalar::kind).max(),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Element labels of a named vector or list.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Value::Vector(v) => v.names(),
            Value::List(l) => l.names(),
            _ => None,
        }
    }

    /// The single scalar held by a scalar or length-one vector.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Vector(v) if v.len() == 1 => v.get(0),
            _ => None,
        }
    }

    /// Numeric view of a scalar or length-one vector.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    /// Numeric view of every atomic element.
    ///
    /// Returns `None` for non-atomic values or when any element is
    /// non-numeric text.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        self.atomic_elements()?
            .iter()
            .map(Scalar::as_f64)
            .collect()
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Double(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Logical(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Character(value))
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::vector(values)
    }
}

impl From<Container<Scalar>> for Value {
    fn from(values: Container<Scalar>) -> Self {
        Value::Vector(values)
    }
}

impl From<ArrayD<Scalar>> for Value {
    fn from(values: ArrayD<Scalar>) -> Self {
        Value::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{IxDyn, ShapeBuilder};

    #[test]
    fn test_lengths() {
        assert_eq!(Value::Null.len(), 0);
        assert_eq!(Value::from(1.0).len(), 1);
        assert_eq!(Value::vector([1.0, 2.0, 3.0]).len(), 3);
        assert_eq!(Value::list(vec![Value::Null, Value::from(1)]).len(), 2);
    }

    #[test]
    fn test_atomic_classification() {
        assert!(Value::from("a").is_atomic());
        assert!(Value::vector([1_i64]).is_atomic());
        assert!(!Value::list(vec![]).is_atomic());
        assert!(!Value::Null.is_atomic());
    }

    #[test]
    fn test_array_flattens_column_major() {
        // 2x2 matrix [[1, 3], [2, 4]] stored column-major holds 1, 2, 3, 4.
        let data: Vec<Scalar> = (1..=4).map(|i| Scalar::Integer(i)).collect();
        let array = ArrayD::from_shape_vec(IxDyn(&[2, 2]).f(), data).unwrap();
        let value = Value::Array(array);
        let flat = value.to_f64_vec().unwrap();
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_atomic_kind() {
        let v = Value::Vector(Container::new(vec![Scalar::from(1_i64), Scalar::from(2.5)]));
        assert_eq!(v.atomic_kind(), Some(ScalarKind::Double));
        assert_eq!(Value::Null.atomic_kind(), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::vector([7_i64]).as_f64(), Some(7.0));
        assert_eq!(Value::vector([1.0, 2.0]).as_f64(), None);
        assert_eq!(Value::from("x").to_f64_vec(), None);
    }
}
