//! # apply_engine: Apply, Margin and Grouping Engines
//!
//! Higher-order application of user functions over the values defined in
//! `apply_core`.
//!
//! This crate provides:
//! - Element-wise application over one or more parallel containers
//!   ([`map_apply`], [`typed_apply`])
//! - Application over margins of N-dimensional arrays ([`array_apply`])
//! - Partitioning by categorical keys ([`group_by`], [`unsplit`])
//! - Grouped application ([`grouped_apply`])
//! - A configured facade with the familiar apply family ([`Toolkit`])
//!
//! ## Simplification
//!
//! Results are collected first and reshaped afterwards. Uniform scalar
//! results become a vector, uniform length-`L` atomic results become an
//! `L x N` matrix with one column per input element, and anything else
//! stays a list. See [`Applied`].
//!
//! ## Failure
//!
//! Application is fail-fast: the first failing invocation aborts the call
//! and is reported as `ApplyError::Invocation` with its position and label.

#![deny(missing_docs)]

mod group;
mod grouped;
mod invoke;
mod map;
mod margin;
mod simplify;
mod toolkit;

pub use group::{group_by, unsplit, Group, Groups};
pub use grouped::grouped_apply;
pub use map::{map_apply, typed_apply, ResultTemplate};
pub use margin::{array_apply, col_means, col_sums, row_means, row_sums, MarginApplied};
pub use simplify::Applied;
pub use toolkit::Toolkit;
