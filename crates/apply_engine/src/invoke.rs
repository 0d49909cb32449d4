//! Invocation of user functions.
//!
//! User functions are plain closures or function items with the signature
//! `FnMut(&[Value], &Params) -> Result<Value, BoxError>`: one positional
//! argument per input container, plus the auxiliary parameters shared by
//! every call. `FnMut` allows a function to own or borrow mutable state,
//! such as a seeded random generator, which then advances in invocation
//! order.

use apply_core::types::{ApplyError, BoxError, Params, Value};
use tracing::{trace, warn};

/// Invokes `f` for one element, slice or bucket, attaching position and
/// label to any failure.
pub(crate) fn invoke<F>(
    f: &mut F,
    index: usize,
    label: Option<&str>,
    args: &[Value],
    aux: &Params,
) -> Result<Value, ApplyError>
where
    F: FnMut(&[Value], &Params) -> Result<Value, BoxError>,
{
    trace!(index, ?label, "invoking user function");
    f(args, aux).map_err(|source| {
        warn!(index, ?label, error = %source, "user function failed");
        ApplyError::Invocation {
            index,
            label: label.map(str::to_string),
            source,
        }
    })
}
