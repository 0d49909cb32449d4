//! Configured facade over the engines.
//!
//! [`Toolkit`] exposes the familiar apply family (`lapply`, `sapply`,
//! `vapply`, `mapply`, `apply`, `split`, `tapply`) with the defaults of an
//! [`ApplyConfig`], so call sites only pass what differs per call.

use std::borrow::Cow;

use apply_core::types::{
    ApplyError, BoxError, Container, Factor, Params, Scalar, Value,
};
use apply_core::ApplyConfig;
use ndarray::{ArrayD, Axis};

use crate::group::{group_by, Groups};
use crate::grouped::grouped_apply;
use crate::map::{map_apply, typed_apply, ResultTemplate};
use crate::margin::{array_apply, MarginApplied};
use crate::simplify::Applied;

/// The apply family bound to one configuration.
///
/// # Examples
/// ```
/// use apply_core::types::{Container, Params, Value};
/// use apply_engine::Toolkit;
///
/// let toolkit = Toolkit::default();
/// let words: Container<Value> = vec![Value::from("ab"), Value::from("cde")].into();
/// let lengths = toolkit
///     .sapply(&words, |args: &[Value], _: &Params| {
///         let text = args[0].as_scalar().and_then(|s| s.as_str()).ok_or("text only")?;
///         Ok(Value::from(text.len() as i64))
///     }, &Params::new())
///     .unwrap();
/// // Unnamed character input labels its own results.
/// assert_eq!(lengths.names().unwrap(), &["ab", "cde"]);
/// assert_eq!(lengths.to_f64_vec(), Some(vec![2.0, 3.0]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Toolkit {
    config: ApplyConfig,
}

impl Toolkit {
    /// Creates a toolkit with the given configuration.
    pub fn new(config: ApplyConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ApplyConfig {
        &self.config
    }

    /// Builds a factor using the configured level order.
    pub fn factor<S: AsRef<str>>(&self, labels: &[S]) -> Factor {
        Factor::new(labels, self.config.level_order)
    }

    /// Applies `f` to every element, always returning a list.
    ///
    /// Names are carried over from `data` only; character input is never
    /// used to label the result.
    pub fn lapply<F>(
        &self,
        data: &Container<Value>,
        f: F,
        aux: &Params,
    ) -> Result<Applied, ApplyError>
    where
        F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
    {
        map_apply(std::slice::from_ref(data), f, aux, false)
    }

    /// Applies `f` to every element, simplifying when configured to.
    pub fn sapply<F>(
        &self,
        data: &Container<Value>,
        f: F,
        aux: &Params,
    ) -> Result<Applied, ApplyError>
    where
        F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
    {
        let data = self.labelled(data)?;
        map_apply(
            std::slice::from_ref(data.as_ref()),
            f,
            aux,
            self.config.simplify,
        )
    }

    /// Applies `f` to every element, checking results against `template`.
    pub fn vapply<F>(
        &self,
        data: &Container<Value>,
        f: F,
        aux: &Params,
        template: ResultTemplate,
    ) -> Result<Applied, ApplyError>
    where
        F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
    {
        let data = self.labelled(data)?;
        typed_apply(std::slice::from_ref(data.as_ref()), f, aux, template)
    }

    /// Applies `f` across parallel containers.
    pub fn mapply<F>(
        &self,
        containers: &[Container<Value>],
        f: F,
        aux: &Params,
    ) -> Result<Applied, ApplyError>
    where
        F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
    {
        match containers.split_first() {
            Some((first, rest)) if self.needs_labels(first) => {
                let mut all = Vec::with_capacity(containers.len());
                all.push(self.labelled(first)?.into_owned());
                all.extend(rest.iter().cloned());
                map_apply(&all, f, aux, self.config.simplify)
            }
            _ => map_apply(containers, f, aux, self.config.simplify),
        }
    }

    /// Applies `f` over the `retained` margins of `array`.
    pub fn apply<A, F>(
        &self,
        array: &ArrayD<A>,
        retained: &[Axis],
        f: F,
        aux: &Params,
    ) -> Result<MarginApplied, ApplyError>
    where
        A: Clone + Into<Scalar>,
        F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
    {
        array_apply(array, retained, f, aux)
    }

    /// Partitions `container` by `keys` with the configured empty-group
    /// policy and separator.
    pub fn split<T: Clone>(
        &self,
        container: &Container<T>,
        keys: &[Factor],
    ) -> Result<Groups<T>, ApplyError> {
        group_by(container, keys, self.config.drop_empty, &self.config.separator)
    }

    /// Applies `f` per group with the configured defaults.
    pub fn tapply<T, F>(
        &self,
        container: &Container<T>,
        keys: &[Factor],
        f: F,
        aux: &Params,
    ) -> Result<Applied, ApplyError>
    where
        T: Clone + Into<Scalar>,
        F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
    {
        grouped_apply(
            container,
            keys,
            f,
            aux,
            self.config.simplify,
            self.config.drop_empty,
            &self.config.separator,
        )
    }

    fn needs_labels(&self, data: &Container<Value>) -> bool {
        self.config.use_names
            && data.names().is_none()
            && !data.is_empty()
            && data
                .iter()
                .all(|v| matches!(v, Value::Scalar(Scalar::Character(_))))
    }

    /// Labels unnamed character input by its own values when configured.
    fn labelled<'a>(
        &self,
        data: &'a Container<Value>,
    ) -> Result<Cow<'a, Container<Value>>, ApplyError> {
        if !self.needs_labels(data) {
            return Ok(Cow::Borrowed(data));
        }
        let names = data
            .iter()
            .filter_map(|v| v.as_scalar().and_then(Scalar::as_str))
            .map(str::to_string)
            .collect();
        let mut named = data.clone();
        named.set_names(Some(names))?;
        Ok(Cow::Owned(named))
    }
}
