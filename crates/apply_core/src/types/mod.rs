//! Core types for the apply toolkit.
//!
//! This module provides:
//! - `Scalar`, `ScalarKind`: atomic elements and coercion order (`scalar`)
//! - `Container`: ordered, optionally labelled sequences (`container`)
//! - `Value`: dynamic values exchanged with user functions (`value`)
//! - `LabeledMatrix`: simplified matrix results (`matrix`)
//! - `Factor`, `LevelOrder`: grouping keys (`factor`)
//! - `Params`: auxiliary parameters (`params`)
//! - `ApplyError`, `ParamError`, `BoxError`: error types (`error`)

pub mod container;
pub mod error;
pub mod factor;
pub mod matrix;
pub mod params;
pub mod scalar;
pub mod value;

pub use container::Container;
pub use error::{ApplyError, BoxError, ParamError};
pub use factor::{Factor, LevelOrder};
pub use matrix::LabeledMatrix;
pub use params::Params;
pub use scalar::{common_kind, Scalar, ScalarKind};
pub use value::Value;
