//! Grouped application: partition, then apply per bucket.

use apply_core::types::{ApplyError, BoxError, Container, Factor, Params, Scalar, Value};
use tracing::debug;

use crate::group::group_by;
use crate::invoke::invoke;
use crate::simplify::{self, Applied};

/// Partitions `container` by `keys` and applies `f` to every bucket.
///
/// Buckets are produced by [`group_by`] (so `drop_empty` and `sep` have the
/// same meaning) and visited in bucket order; each invocation receives the
/// bucket as a single `Value::Vector` argument. Results are labelled by
/// composite key and simplified like [`crate::map_apply`] when `simplify`
/// is set. With `drop_empty` unset, `f` is also invoked on empty buckets.
///
/// # Errors
/// Any error of [`group_by`], plus `ApplyError::Invocation` carrying the
/// bucket index and label when `f` fails.
///
/// # Examples
/// ```
/// use apply_core::types::{Container, Factor, LevelOrder, Params, Value};
/// use apply_engine::grouped_apply;
///
/// let data = Container::new(vec![1.0, 2.0, 10.0, 20.0]);
/// let key = Factor::new(&["a", "a", "b", "b"], LevelOrder::Sorted);
/// let totals = grouped_apply(
///     &data,
///     &[key],
///     |args: &[Value], _: &Params| {
///         let v = args[0].to_f64_vec().ok_or("numeric groups only")?;
///         Ok(Value::from(v.iter().sum::<f64>()))
///     },
///     &Params::new(),
///     true,
///     true,
///     ".",
/// )
/// .unwrap();
/// assert_eq!(totals.to_f64_vec(), Some(vec![3.0, 30.0]));
/// assert_eq!(totals.names().unwrap(), &["a", "b"]);
/// ```
pub fn grouped_apply<T, F>(
    container: &Container<T>,
    keys: &[Factor],
    mut f: F,
    aux: &Params,
    simplify: bool,
    drop_empty: bool,
    sep: &str,
) -> Result<Applied, ApplyError>
where
    T: Clone + Into<Scalar>,
    F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
{
    let groups = group_by(container, keys, drop_empty, sep)?;
    debug!(buckets = groups.len(), simplify, "grouped_apply");

    let mut results = Vec::with_capacity(groups.len());
    let mut labels = Vec::with_capacity(groups.len());
    for (index, group) in groups.into_inner().into_iter().enumerate() {
        let bucket = Value::Vector(group.values.map(Into::into));
        results.push(invoke(&mut f, index, Some(group.label.as_str()), &[bucket], aux)?);
        labels.push(group.label);
    }

    if simplify {
        simplify::simplify(results, Some(labels))
    } else {
        Ok(Applied::List(simplify::to_list(results, Some(labels))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apply_core::types::LevelOrder;

    fn mean(args: &[Value], _: &Params) -> Result<Value, BoxError> {
        let v = args[0].to_f64_vec().ok_or("numeric groups only")?;
        if v.is_empty() {
            return Ok(Value::from(f64::NAN));
        }
        Ok(Value::from(v.iter().sum::<f64>() / v.len() as f64))
    }

    #[test]
    fn test_group_means_labelled() {
        let data = Container::new(vec![1.0, 3.0, 10.0, 30.0, 5.0]);
        let key = Factor::new(&["x", "x", "y", "y", "z"], LevelOrder::Sorted);
        let out = grouped_apply(&data, &[key], mean, &Params::new(), true, true, ".").unwrap();
        assert_eq!(out.to_f64_vec(), Some(vec![2.0, 20.0, 5.0]));
        assert_eq!(out.names().unwrap(), &["x", "y", "z"]);
    }

    #[test]
    fn test_empty_buckets_invoked_when_kept() {
        let data = Container::new(vec![1.0, 2.0]);
        let key = Factor::with_levels(&["a", "a"], vec!["a".into(), "b".into()]).unwrap();

        let mut sizes = Vec::new();
        let out = grouped_apply(
            &data,
            &[key.clone()],
            |args: &[Value], _: &Params| {
                sizes.push(args[0].len());
                Ok(Value::from(args[0].len() as i64))
            },
            &Params::new(),
            true,
            false,
            ".",
        )
        .unwrap();
        assert_eq!(sizes, vec![2, 0]);
        assert_eq!(out.names().unwrap(), &["a", "b"]);

        let dropped =
            grouped_apply(&data, &[key], mean, &Params::new(), true, true, ".").unwrap();
        assert_eq!(dropped.names().unwrap(), &["a"]);
    }

    #[test]
    fn test_vector_results_form_matrix() {
        let data = Container::new(vec![1.0, 2.0, 3.0, 4.0]);
        let key = Factor::generate(2, 2, 4);
        let out = grouped_apply(
            &data,
            &[key],
            |args: &[Value], _: &Params| {
                let v = args[0].to_f64_vec().ok_or("numeric")?;
                Ok(Value::vector([v[0], v[v.len() - 1]]))
            },
            &Params::new(),
            true,
            true,
            ".",
        )
        .unwrap();
        let m = out.as_matrix().unwrap();
        assert_eq!(m.dim(), (2, 2));
        assert_eq!(m.col_names().unwrap(), &["1", "2"]);
        assert_eq!(m.get(1, 1), Some(&Scalar::Double(4.0)));
    }

    #[test]
    fn test_failure_reports_bucket_label() {
        let data = Container::new(vec![1_i64, -2]);
        let key = Factor::new(&["pos", "neg"], LevelOrder::FirstAppearance);
        let err = grouped_apply(
            &data,
            &[key],
            |args: &[Value], _: &Params| {
                let v = args[0].to_f64_vec().ok_or("numeric")?;
                if v.iter().any(|&x| x < 0.0) {
                    return Err("negative values".into());
                }
                Ok(Value::from(true))
            },
            &Params::new(),
            false,
            true,
            ".",
        )
        .unwrap_err();
        match err {
            ApplyError::Invocation { index, label, .. } => {
                assert_eq!(index, 1);
                assert_eq!(label.as_deref(), Some("neg"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
