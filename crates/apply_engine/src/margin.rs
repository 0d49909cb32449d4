//! Margin application over N-dimensional arrays.
//!
//! # Iteration order
//!
//! Everything here is column-major: slices are visited with the first
//! retained axis varying fastest, elements within a slice are gathered with
//! the first collapsed axis varying fastest, and simplified results are
//! laid out the same way.

use apply_core::types::{ApplyError, BoxError, Container, Params, Scalar, Value};
use ndarray::{Array1, Array2, ArrayD, Axis, IxDyn, ShapeBuilder};
use tracing::debug;

use crate::invoke::invoke;
use crate::simplify::{self, Shape};

/// The result of [`array_apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum MarginApplied {
    /// Scalar results shaped like the retained axes, or length-`L` results
    /// shaped `[L, retained...]`
    Array(ArrayD<Scalar>),
    /// Results that could not be simplified, in column-major slice order
    List {
        /// Extents of the retained axes
        shape: Vec<usize>,
        /// One result per slice
        items: Vec<Value>,
    },
}

impl MarginApplied {
    /// The array, if the results simplified.
    pub fn as_array(&self) -> Option<&ArrayD<Scalar>> {
        match self {
            MarginApplied::Array(a) => Some(a),
            MarginApplied::List { .. } => None,
        }
    }

    /// Numeric view of a simplified result.
    pub fn to_f64(&self) -> Option<ArrayD<f64>> {
        let array = self.as_array()?;
        let values = array.iter().map(Scalar::as_f64).collect::<Option<Vec<_>>>()?;
        ArrayD::from_shape_vec(array.raw_dim(), values).ok()
    }
}

/// Column-major walk over every index of a shape.
pub(crate) struct ColumnMajor {
    extents: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl ColumnMajor {
    pub(crate) fn new(extents: &[usize]) -> Self {
        let next = if extents.contains(&0) {
            None
        } else {
            Some(vec![0; extents.len()])
        };
        Self {
            extents: extents.to_vec(),
            next,
        }
    }
}

impl Iterator for ColumnMajor {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for axis in 0..successor.len() {
            successor[axis] += 1;
            if successor[axis] < self.extents[axis] {
                self.next = Some(successor);
                return Some(current);
            }
            successor[axis] = 0;
        }
        Some(current)
    }
}

/// Applies `f` to every slice of `array` obtained by fixing the `retained`
/// axes.
///
/// Each slice holds the elements along the collapsed axes. It is passed to
/// `f` as a `Value::Vector` when one axis is collapsed, a column-major
/// `Value::Array` when several are, and a `Value::Scalar` when none is.
/// Results are simplified like [`crate::map_apply`], with the retained
/// extents attached as shape.
///
/// # Errors
/// - `ApplyError::InvalidMargin` when `retained` is empty, out of range or
///   repeats an axis
/// - `ApplyError::Invocation` when `f` fails, carrying the slice's position
///   in column-major order
///
/// # Examples
/// ```
/// use apply_core::types::{Params, Value};
/// use apply_engine::array_apply;
/// use ndarray::{array, Axis};
///
/// let m = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
/// let row_totals = array_apply(
///     &m,
///     &[Axis(0)],
///     |args: &[Value], _: &Params| {
///         let row = args[0].to_f64_vec().ok_or("numeric rows only")?;
///         Ok(Value::from(row.iter().sum::<f64>()))
///     },
///     &Params::new(),
/// )
/// .unwrap();
/// assert_eq!(row_totals.to_f64().unwrap().iter().copied().collect::<Vec<f64>>(), vec![3.0, 7.0]);
/// ```
pub fn array_apply<A, F>(
    array: &ArrayD<A>,
    retained: &[Axis],
    mut f: F,
    aux: &Params,
) -> Result<MarginApplied, ApplyError>
where
    A: Clone + Into<Scalar>,
    F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
{
    let shape = array.shape();
    validate_margin(retained, shape.len())?;

    let retained_axes: Vec<usize> = retained.iter().map(|a| a.index()).collect();
    let collapsed_axes: Vec<usize> = (0..shape.len())
        .filter(|a| !retained_axes.contains(a))
        .collect();
    let retained_extents: Vec<usize> = retained_axes.iter().map(|&a| shape[a]).collect();
    let collapsed_extents: Vec<usize> = collapsed_axes.iter().map(|&a| shape[a]).collect();
    debug!(
        shape = ?shape,
        retained = ?retained_axes,
        "array_apply"
    );

    let mut results = Vec::new();
    let mut full = vec![0; shape.len()];
    for (index, fixed) in ColumnMajor::new(&retained_extents).enumerate() {
        for (&axis, &i) in retained_axes.iter().zip(&fixed) {
            full[axis] = i;
        }
        let mut elements: Vec<Scalar> = Vec::new();
        for varying in ColumnMajor::new(&collapsed_extents) {
            for (&axis, &i) in collapsed_axes.iter().zip(&varying) {
                full[axis] = i;
            }
            elements.push(array[&full[..]].clone().into());
        }

        let slice = match collapsed_axes.len() {
            0 => Value::Scalar(elements.remove(0)),
            1 => Value::Vector(Container::new(elements)),
            _ => Value::Array(ArrayD::from_shape_vec(
                IxDyn(&collapsed_extents).f(),
                elements,
            )?),
        };
        results.push(invoke(&mut f, index, None, &[slice], aux)?);
    }

    let outcome = simplify::classify(&results);
    debug!(shape = ?outcome, slices = results.len(), "array_apply simplification");
    match outcome {
        Shape::Scalars => {
            let kind = simplify::results_kind(&results);
            let data = simplify::flatten(&results, kind);
            Ok(MarginApplied::Array(ArrayD::from_shape_vec(
                IxDyn(&retained_extents).f(),
                data,
            )?))
        }
        Shape::Columns(len) => {
            let kind = simplify::results_kind(&results);
            let data = simplify::flatten(&results, kind);
            let mut out_shape = Vec::with_capacity(retained_extents.len() + 1);
            out_shape.push(len);
            out_shape.extend_from_slice(&retained_extents);
            Ok(MarginApplied::Array(ArrayD::from_shape_vec(
                IxDyn(&out_shape).f(),
                data,
            )?))
        }
        Shape::Heterogeneous => Ok(MarginApplied::List {
            shape: retained_extents,
            items: results,
        }),
    }
}

fn validate_margin(retained: &[Axis], ndim: usize) -> Result<(), ApplyError> {
    if retained.is_empty() {
        return Err(ApplyError::InvalidMargin(
            "at least one axis must be retained".to_string(),
        ));
    }
    for (pos, axis) in retained.iter().enumerate() {
        if axis.index() >= ndim {
            return Err(ApplyError::InvalidMargin(format!(
                "axis {} out of range for {}-dimensional array",
                axis.index(),
                ndim
            )));
        }
        if retained[..pos].contains(axis) {
            return Err(ApplyError::InvalidMargin(format!(
                "axis {} retained twice",
                axis.index()
            )));
        }
    }
    Ok(())
}

/// Sum of every row.
pub fn row_sums(matrix: &Array2<f64>) -> Array1<f64> {
    matrix.sum_axis(Axis(1))
}

/// Sum of every column.
pub fn col_sums(matrix: &Array2<f64>) -> Array1<f64> {
    matrix.sum_axis(Axis(0))
}

/// Mean of every row; `None` when the matrix has no columns.
pub fn row_means(matrix: &Array2<f64>) -> Option<Array1<f64>> {
    matrix.mean_axis(Axis(1))
}

/// Mean of every column; `None` when the matrix has no rows.
pub fn col_means(matrix: &Array2<f64>) -> Option<Array1<f64>> {
    matrix.mean_axis(Axis(0))
}
