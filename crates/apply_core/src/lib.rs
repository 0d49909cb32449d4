//! # apply_core: Foundation Types for the Apply Toolkit
//!
//! ## Foundation Layer Role
//!
//! apply_core is the bottom layer of the workspace, providing:
//! - Atomic scalars and their coercion order (`types::scalar`)
//! - Labelled containers and dynamic values (`types::container`, `types::value`)
//! - Categorical grouping keys and composite keys (`types::factor`)
//! - Auxiliary parameters for user functions (`types::params`)
//! - Error types: `ApplyError`, `ParamError` (`types::error`)
//! - Default behaviour of the apply family: `ApplyConfig` (`config`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use apply_core::types::{Container, Factor, LevelOrder, Value};
//!
//! let data: Container<Value> = vec![Value::from(1.0), Value::from(2.0)].into();
//! assert_eq!(data.len(), 2);
//!
//! let key = Factor::new(&["a", "b"], LevelOrder::Sorted);
//! assert_eq!(key.n_levels(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod types;

pub use crate::config::{ApplyConfig, ConfigError};
