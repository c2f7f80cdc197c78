//! Foundation types for xvsync.
//!
//! Every other xvsync crate depends on `xvs-types`.
//!
//! # Key Types
//!
//! - [`VariableMap`] — Flat string-keyed mapping of YAML values (a job template's extra_vars)
//! - [`MergeStrategy`] — How a local map is combined into a remote one
//! - [`ChangeRecord`] / [`Change`] / [`ChangeAction`] — Human-readable log of a merge

pub mod change;
pub mod error;
mod legacy;
pub mod strategy;
pub mod variables;

pub use change::{Change, ChangeAction, ChangeRecord};
pub use error::{TypesError, TypesResult};
pub use strategy::MergeStrategy;
pub use variables::{value_kind, VariableMap};

/// Re-exported so downstream crates name the same value type.
pub use serde_yaml::Value;
