//! Post-hoc result simplification.
//!
//! Results are first collected as raw [`Value`]s; only then is the output
//! shape chosen:
//!
//! 1. every result atomic with one element: a flat vector
//! 2. every result atomic with the same length `L > 1`: an `L x N` matrix,
//!    one column per result
//! 3. anything else: the list of results, unchanged
//!
//! Mixed scalar kinds are coerced to the highest kind present.

use apply_core::types::{
    common_kind, ApplyError, Container, LabeledMatrix, Scalar, ScalarKind, Value,
};
use ndarray::{Array2, ShapeBuilder};
use tracing::debug;

/// The result of an apply operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// One scalar per input element
    Vector(Container<Scalar>),
    /// One column per input element
    Matrix(LabeledMatrix),
    /// One arbitrary value per input element
    List(Container<Value>),
}

impl Applied {
    /// Number of input elements represented (columns for a matrix).
    pub fn len(&self) -> usize {
        match self {
            Applied::Vector(v) => v.len(),
            Applied::Matrix(m) => m.dim().1,
            Applied::List(l) => l.len(),
        }
    }

    /// Whether no element was represented.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of the input elements.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Applied::Vector(v) => v.names(),
            Applied::Matrix(m) => m.col_names(),
            Applied::List(l) => l.names(),
        }
    }

    /// The vector, if the result simplified to one.
    pub fn as_vector(&self) -> Option<&Container<Scalar>> {
        match self {
            Applied::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// The matrix, if the result simplified to one.
    pub fn as_matrix(&self) -> Option<&LabeledMatrix> {
        match self {
            Applied::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// The list, if the result did not simplify.
    pub fn as_list(&self) -> Option<&Container<Value>> {
        match self {
            Applied::List(l) => Some(l),
            _ => None,
        }
    }

    /// Numeric view of a vector result.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        self.as_vector()?.iter().map(Scalar::as_f64).collect()
    }
}

/// Output shape chosen for a sequence of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Scalars,
    Columns(usize),
    Heterogeneous,
}

/// Classifies results; an empty sequence never simplifies.
pub(crate) fn classify(results: &[Value]) -> Shape {
    let first = match results.first() {
        Some(v) if v.is_atomic() => v.len(),
        _ => return Shape::Heterogeneous,
    };
    let uniform = results.iter().all(|v| v.is_atomic() && v.len() == first);
    match (uniform, first) {
        (true, 1) => Shape::Scalars,
        (true, l) if l > 1 => Shape::Columns(l),
        _ => Shape::Heterogeneous,
    }
}

/// Common kind of atomic results; `Logical` for results with no elements.
pub(crate) fn results_kind(results: &[Value]) -> ScalarKind {
    common_kind(results.iter().filter_map(Value::atomic_kind)).unwrap_or(ScalarKind::Logical)
}

/// Flattens atomic results in order, coercing to `kind`.
pub(crate) fn flatten(results: &[Value], kind: ScalarKind) -> Vec<Scalar> {
    results
        .iter()
        .filter_map(Value::atomic_elements)
        .flatten()
        .map(|s| if s.kind() == kind { s } else { s.coerce(kind) })
        .collect()
}

/// Builds a labelled vector of length-one results.
pub(crate) fn to_vector(
    results: &[Value],
    kind: ScalarKind,
    labels: Option<Vec<String>>,
) -> Result<Container<Scalar>, ApplyError> {
    let values = flatten(results, kind);
    match labels {
        Some(l) => Container::with_names(values, l),
        None => Ok(Container::new(values)),
    }
}

/// Builds a `rows x results.len()` matrix, one column per result.
pub(crate) fn to_matrix(
    results: &[Value],
    rows: usize,
    kind: ScalarKind,
    col_names: Option<Vec<String>>,
) -> Result<LabeledMatrix, ApplyError> {
    let data = Array2::from_shape_vec((rows, results.len()).f(), flatten(results, kind))?;
    let row_names = match results.first() {
        Some(Value::Vector(v)) => v.names().map(<[String]>::to_vec),
        _ => None,
    };
    LabeledMatrix::new(data, row_names, col_names)
}

/// Wraps raw results as a labelled list.
pub(crate) fn to_list(
    results: Vec<Value>,
    labels: Option<Vec<String>>,
) -> Result<Container<Value>, ApplyError> {
    match labels {
        Some(l) => Container::with_names(results, l),
        None => Ok(Container::new(results)),
    }
}

/// Applies the simplification rule to collected results.
pub(crate) fn simplify(
    results: Vec<Value>,
    labels: Option<Vec<String>>,
) -> Result<Applied, ApplyError> {
    let shape = classify(&results);
    debug!(?shape, n = results.len(), "simplifying apply results");
    match shape {
        Shape::Scalars => {
            let kind = results_kind(&results);
            Ok(Applied::Vector(to_vector(&results, kind, labels)?))
        }
        Shape::Columns(rows) => {
            let kind = results_kind(&results);
            Ok(Applied::Matrix(to_matrix(&results, rows, kind, labels)?))
        }
        Shape::Heterogeneous => Ok(Applied::List(to_list(results, labels)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(&[]), Shape::Heterogeneous);
        assert_eq!(
            classify(&[Value::from(1.0), Value::vector([2.0])]),
            Shape::Scalars
        );
        assert_eq!(
            classify(&[Value::vector([1.0, 2.0]), Value::vector([3_i64, 4])]),
            Shape::Columns(2)
        );
        assert_eq!(
            classify(&[Value::vector([1.0, 2.0]), Value::vector([3.0])]),
            Shape::Heterogeneous
        );
        assert_eq!(
            classify(&[Value::from(1.0), Value::list(vec![Value::from(2.0)])]),
            Shape::Heterogeneous
        );
        assert_eq!(classify(&[Value::Null]), Shape::Heterogeneous);
    }

    #[test]
    fn test_simplify_coerces_to_common_kind() {
        let results = vec![Value::from(1_i64), Value::from(2.5), Value::from(true)];
        let applied = simplify(results, None).unwrap();
        let v = applied.as_vector().unwrap();
        assert_eq!(
            v.values(),
            &[Scalar::Double(1.0), Scalar::Double(2.5), Scalar::Double(1.0)]
        );
    }

    #[test]
    fn test_simplify_matrix_columns() {
        let results = vec![Value::vector([1.0, 2.0]), Value::vector([3.0, 4.0])];
        let applied = simplify(results, Some(vec!["a".into(), "b".into()])).unwrap();
        let m = applied.as_matrix().unwrap();
        assert_eq!(m.dim(), (2, 2));
        assert_eq!(m.get(0, 1), Some(&Scalar::Double(3.0)));
        assert_eq!(m.get(1, 0), Some(&Scalar::Double(2.0)));
        assert_eq!(m.col_names().unwrap(), &["a", "b"]);
        assert!(m.row_names().is_none());
    }

    #[test]
    fn test_simplify_matrix_row_names_from_first_result() {
        let named = Container::with_names(
            vec![Scalar::from(1.0), Scalar::from(2.0)],
            vec!["min".into(), "max".into()],
        )
        .unwrap();
        let results = vec![Value::Vector(named), Value::vector([3.0, 4.0])];
        let m = simplify(results, None).unwrap();
        assert_eq!(m.as_matrix().unwrap().row_names().unwrap(), &["min", "max"]);
    }

    #[test]
    fn test_simplify_empty_is_list() {
        let applied = simplify(Vec::new(), None).unwrap();
        assert!(matches!(applied, Applied::List(ref l) if l.is_empty()));
    }
}
