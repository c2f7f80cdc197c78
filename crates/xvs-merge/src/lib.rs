//! Merge engine for xvsync.
//!
//! Combines a local [`VariableMap`](xvs_types::VariableMap) into a remote one
//! using a [`MergeStrategy`](xvs_types::MergeStrategy), producing the map to
//! write back and a [`ChangeRecord`](xvs_types::ChangeRecord) describing what
//! happened. The merge is flat: only top-level keys are considered.

pub mod engine;

#[cfg(test)]
mod properties;

pub use engine::{merge, MergeOutcome};
