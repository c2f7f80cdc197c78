use serde_yaml::Value;
use xvs_types::{ChangeAction, ChangeRecord, MergeStrategy, VariableMap};

/// The result of merging a local map into a remote one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
    /// The map to write back to the remote.
    pub merged: VariableMap,
    /// What the merge did, key by key.
    pub changes: ChangeRecord,
}

/// Merge `local` into `remote` using `strategy`.
///
/// Only top-level keys are considered. Nested mappings and sequences are
/// treated as opaque values and replaced whole, never merged.
pub fn merge(remote: VariableMap, local: &VariableMap, strategy: MergeStrategy) -> MergeOutcome {
    let outcome = match strategy {
        MergeStrategy::Append => append(remote, local),
        MergeStrategy::Update => update(remote, local),
        MergeStrategy::Replace => replace(remote, local),
        MergeStrategy::Delete => delete(remote, local),
    };
    tracing::debug!(
        %strategy,
        added = outcome.changes.additions(),
        updated = outcome.changes.updates(),
        removed = outcome.changes.removals(),
        len = outcome.merged.len(),
        "merged extra_vars"
    );
    outcome
}

fn append(mut remote: VariableMap, local: &VariableMap) -> MergeOutcome {
    let mut changes = ChangeRecord::new();
    for (key, value) in local {
        if remote.contains_key(key) {
            changes.push(ChangeAction::Unchanged, key.as_str(), value.clone());
        } else {
            remote.insert(key.as_str(), value.clone());
            changes.push(ChangeAction::Added, key.as_str(), value.clone());
        }
    }
    MergeOutcome { merged: remote, changes }
}

fn update(mut remote: VariableMap, local: &VariableMap) -> MergeOutcome {
    let mut changes = ChangeRecord::new();
    for (key, value) in local {
        let Some(old) = remote.get(key) else {
            continue;
        };
        // Sequences are overwritten without comparison and so never reported
        // as updated. Scalars and mappings are compared by serialized form.
        let action = if !old.is_sequence() && differs(old, value) {
            ChangeAction::Updated
        } else {
            ChangeAction::Unchanged
        };
        remote.insert(key.as_str(), value.clone());
        changes.push(action, key.as_str(), value.clone());
    }
    MergeOutcome { merged: remote, changes }
}

fn replace(remote: VariableMap, local: &VariableMap) -> MergeOutcome {
    let mut changes = ChangeRecord::new();
    for (key, value) in &remote {
        match local.get(key) {
            Some(new) => changes.push(ChangeAction::Updated, key.as_str(), new.clone()),
            None => changes.push(ChangeAction::Removed, key.as_str(), value.clone()),
        }
    }
    for (key, value) in local {
        if !remote.contains_key(key) {
            changes.push(ChangeAction::Added, key.as_str(), value.clone());
        }
    }
    MergeOutcome {
        merged: local.clone(),
        changes,
    }
}

fn delete(mut remote: VariableMap, local: &VariableMap) -> MergeOutcome {
    let mut changes = ChangeRecord::new();
    for key in local.keys() {
        if let Some(old) = remote.remove(key) {
            changes.push(ChangeAction::Removed, key.as_str(), old);
        }
    }
    MergeOutcome { merged: remote, changes }
}

/// Compare two values by their deterministic YAML rendering.
fn differs(old: &Value, new: &Value) -> bool {
    match (serde_yaml::to_string(old), serde_yaml::to_string(new)) {
        (Ok(a), Ok(b)) => a != b,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(yaml: &str) -> VariableMap {
        VariableMap::from_yaml_str(yaml).unwrap()
    }

    fn action(out: &MergeOutcome, key: &str) -> Option<ChangeAction> {
        out.changes.iter().find(|c| c.key == key).map(|c| c.action)
    }

    fn remote() -> VariableMap {
        vars("a: 1\nb: 2\n")
    }

    fn local() -> VariableMap {
        vars("b: 3\nc: 4\n")
    }

    #[test]
    fn append_adds_missing_keys_only() {
        let out = merge(remote(), &local(), MergeStrategy::Append);
        assert_eq!(out.merged, vars("a: 1\nb: 2\nc: 4\n"));
        assert_eq!(action(&out, "c"), Some(ChangeAction::Added));
        assert_eq!(action(&out, "b"), Some(ChangeAction::Unchanged));
        assert_eq!(out.changes.additions(), 1);
    }

    #[test]
    fn update_overwrites_shared_keys_only() {
        let out = merge(remote(), &local(), MergeStrategy::Update);
        assert_eq!(out.merged, vars("a: 1\nb: 3\n"));
        assert_eq!(action(&out, "b"), Some(ChangeAction::Updated));
        assert_eq!(action(&out, "c"), None);
    }

    #[test]
    fn replace_yields_local() {
        let out = merge(remote(), &local(), MergeStrategy::Replace);
        assert_eq!(out.merged, local());
        assert_eq!(action(&out, "a"), Some(ChangeAction::Removed));
        assert_eq!(action(&out, "b"), Some(ChangeAction::Updated));
        assert_eq!(action(&out, "c"), Some(ChangeAction::Added));
    }

    #[test]
    fn delete_removes_shared_keys() {
        let out = merge(remote(), &local(), MergeStrategy::Delete);
        assert_eq!(out.merged, vars("a: 1\n"));
        assert_eq!(out.changes.len(), 1);
        let change = &out.changes.changes[0];
        assert_eq!(change.action, ChangeAction::Removed);
        assert_eq!(change.key, "b");
        // The removed remote value is recorded, not the local one.
        assert_eq!(change.value, Value::from(2));
    }

    #[test]
    fn update_with_equal_value_is_unchanged() {
        let out = merge(vars("a: x\n"), &vars("a: x\n"), MergeStrategy::Update);
        assert_eq!(action(&out, "a"), Some(ChangeAction::Unchanged));
        assert!(!out.changes.has_changes());
    }

    #[test]
    fn update_detects_type_change() {
        let out = merge(vars("a: 1\n"), &vars("a: '1'\n"), MergeStrategy::Update);
        assert_eq!(action(&out, "a"), Some(ChangeAction::Updated));
        assert_eq!(out.merged.get("a"), Some(&Value::from("1")));
    }

    #[test]
    fn update_never_reports_sequences() {
        let out = merge(vars("list: [1, 2]\n"), &vars("list: [3]\n"), MergeStrategy::Update);
        assert_eq!(out.merged, vars("list: [3]\n"));
        assert_eq!(action(&out, "list"), Some(ChangeAction::Unchanged));
        assert_eq!(out.changes.updates(), 0);
    }

    #[test]
    fn update_compares_nested_mappings_whole() {
        let remote = vars("db:\n  host: a\n  port: 1\n");
        let local = vars("db:\n  host: b\n");
        let out = merge(remote, &local, MergeStrategy::Update);
        // No deep merge: the whole mapping is replaced, `port` is gone.
        assert_eq!(out.merged, local);
        assert_eq!(action(&out, "db"), Some(ChangeAction::Updated));
    }

    #[test]
    fn append_does_not_merge_nested_mappings() {
        let remote = vars("db:\n  host: a\n");
        let local = vars("db:\n  port: 1\n");
        let out = merge(remote.clone(), &local, MergeStrategy::Append);
        assert_eq!(out.merged, remote);
    }

    #[test]
    fn empty_local_is_noop_except_replace() {
        let empty = VariableMap::new();
        for strategy in [MergeStrategy::Append, MergeStrategy::Update, MergeStrategy::Delete] {
            let out = merge(remote(), &empty, strategy);
            assert_eq!(out.merged, remote(), "{strategy} should be a no-op");
            assert!(out.changes.is_empty());
        }
        let out = merge(remote(), &empty, MergeStrategy::Replace);
        assert!(out.merged.is_empty());
        assert_eq!(out.changes.removals(), 2);
    }

    #[test]
    fn empty_remote() {
        let out = merge(VariableMap::new(), &local(), MergeStrategy::Append);
        assert_eq!(out.merged, local());
        let out = merge(VariableMap::new(), &local(), MergeStrategy::Update);
        assert!(out.merged.is_empty());
        let out = merge(VariableMap::new(), &local(), MergeStrategy::Delete);
        assert!(out.merged.is_empty());
        assert!(out.changes.is_empty());
    }

    #[test]
    fn null_remote_value_is_compared() {
        let out = merge(vars("a: null\n"), &vars("a: 1\n"), MergeStrategy::Update);
        assert_eq!(action(&out, "a"), Some(ChangeAction::Updated));
    }
}
