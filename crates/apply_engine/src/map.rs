//! Element-wise application over one or more containers.

use std::fmt;

use apply_core::types::{ApplyError, BoxError, Container, Params, ScalarKind, Value};
use tracing::debug;

use crate::invoke::invoke;
use crate::simplify::{self, Applied};

/// Declared shape of every result of [`typed_apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultTemplate {
    /// Highest kind a result may have; results are coerced to it
    pub kind: ScalarKind,
    /// Exact number of elements every result must have
    pub len: usize,
}

impl ResultTemplate {
    /// Template for one scalar of `kind` per element.
    pub fn scalar(kind: ScalarKind) -> Self {
        Self { kind, len: 1 }
    }

    /// Template for `len` elements of `kind` per element.
    pub fn vector(kind: ScalarKind, len: usize) -> Self {
        Self { kind, len }
    }
}

impl fmt::Display for ResultTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.len)
    }
}

/// Applies `f` element-wise and assembles the results.
///
/// With several containers, `f` receives one argument per container taken
/// at the same index. All containers must have the same length; shorter
/// containers are never recycled. `f` runs once per index in ascending
/// order with the same `aux` every time, and the first failure aborts the
/// call. Output labels come from the first container.
///
/// With `simplify` the results are reshaped into a vector or matrix when
/// uniformly possible (see [`Applied`]); otherwise they are returned as a
/// list.
///
/// # Errors
/// - `ApplyError::NoContainers` for an empty `containers` slice
/// - `ApplyError::ShapeMismatch` when container lengths differ
/// - `ApplyError::Invocation` when `f` fails
///
/// # Examples
/// ```
/// use apply_core::types::{Container, Params, Value};
/// use apply_engine::map_apply;
///
/// let data: Container<Value> = vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)].into();
/// let squared = map_apply(
///     &[data],
///     |args: &[Value], _: &Params| {
///         let x = args[0].as_f64().ok_or("not a number")?;
///         Ok(Value::from(x * x))
///     },
///     &Params::new(),
///     true,
/// )
/// .unwrap();
/// assert_eq!(squared.to_f64_vec(), Some(vec![1.0, 4.0, 9.0]));
/// ```
pub fn map_apply<F>(
    containers: &[Container<Value>],
    mut f: F,
    aux: &Params,
    simplify: bool,
) -> Result<Applied, ApplyError>
where
    F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
{
    let len = common_length(containers)?;
    debug!(
        containers = containers.len(),
        len,
        simplify,
        "map_apply"
    );

    let results = collect(containers, len, &mut f, aux)?;
    let labels = output_labels(containers);
    if simplify {
        simplify::simplify(results, labels)
    } else {
        Ok(Applied::List(simplify::to_list(results, labels)?))
    }
}

/// Applies `f` element-wise, checking every result against `template`.
///
/// The output is a vector when `template.len == 1` and a
/// `template.len x N` matrix otherwise, even for zero inputs, so the shape
/// never depends on the data.
///
/// # Errors
/// As [`map_apply`], plus `ApplyError::TemplateMismatch` when a result is
/// not atomic, has the wrong length, or has a kind that does not widen to
/// `template.kind`. Only character results fit a character template.
pub fn typed_apply<F>(
    containers: &[Container<Value>],
    mut f: F,
    aux: &Params,
    template: ResultTemplate,
) -> Result<Applied, ApplyError>
where
    F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
{
    let len = common_length(containers)?;
    debug!(containers = containers.len(), len, %template, "typed_apply");

    let results = collect(containers, len, &mut f, aux)?;
    for (index, result) in results.iter().enumerate() {
        let fits = result.is_atomic()
            && result.len() == template.len
            && result.atomic_kind().map_or(true, |k| widens_to(k, template.kind));
        if !fits {
            return Err(ApplyError::TemplateMismatch {
                index,
                expected: template.to_string(),
                found: describe(result),
            });
        }
    }

    let labels = output_labels(containers);
    if template.len == 1 {
        Ok(Applied::Vector(simplify::to_vector(
            &results,
            template.kind,
            labels,
        )?))
    } else {
        Ok(Applied::Matrix(simplify::to_matrix(
            &results,
            template.len,
            template.kind,
            labels,
        )?))
    }
}

/// Numeric kinds widen upward; nothing converts into character.
fn widens_to(kind: ScalarKind, target: ScalarKind) -> bool {
    kind == target || (kind < target && target != ScalarKind::Character)
}

/// Validates container lengths, returning the shared length.
fn common_length(containers: &[Container<Value>]) -> Result<usize, ApplyError> {
    let first = containers.first().ok_or(ApplyError::NoContainers)?;
    let expected = first.len();
    for (index, c) in containers.iter().enumerate().skip(1) {
        if c.len() != expected {
            return Err(ApplyError::ShapeMismatch {
                index,
                expected,
                found: c.len(),
            });
        }
    }
    Ok(expected)
}

fn output_labels(containers: &[Container<Value>]) -> Option<Vec<String>> {
    containers
        .first()
        .and_then(Container::names)
        .map(<[String]>::to_vec)
}

fn collect<F>(
    containers: &[Container<Value>],
    len: usize,
    f: &mut F,
    aux: &Params,
) -> Result<Vec<Value>, ApplyError>
where
    F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
{
    let first = &containers[0];
    let mut results = Vec::with_capacity(len);
    let mut args = Vec::with_capacity(containers.len());
    for index in 0..len {
        args.clear();
        args.extend(containers.iter().map(|c| c.values()[index].clone()));
        results.push(invoke(f, index, first.name(index), &args, aux)?);
    }
    Ok(results)
}

fn describe(value: &Value) -> String {
    match value.atomic_kind() {
        Some(kind) => format!("{}[{}]", kind, value.len()),
        None if value.is_atomic() => format!("logical[{}]", value.len()),
        None => match value {
            Value::Null => "NULL".to_string(),
            other => format!("list[{}]", other.len()),
        },
    }
}
