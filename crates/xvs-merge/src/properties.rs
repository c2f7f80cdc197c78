use proptest::prelude::*;
use serde_yaml::Value;
use xvs_types::{ChangeAction, MergeStrategy, VariableMap};

use crate::merge;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
        proptest::collection::vec(any::<u8>().prop_map(Value::from), 0..3).prop_map(Value::Sequence),
        proptest::collection::btree_map("[a-c]", any::<i32>(), 0..3).prop_map(|m| {
            Value::Mapping(m.into_iter().map(|(k, v)| (Value::from(k), Value::from(v))).collect())
        }),
    ]
}

fn rendered(value: &Value) -> String {
    serde_yaml::to_string(value).unwrap()
}

fn variables() -> impl Strategy<Value = VariableMap> {
    // Small key space so remote and local overlap often.
    proptest::collection::btree_map("[a-f]", leaf(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn append_keeps_remote_and_adds_local_only(r in variables(), l in variables()) {
        let out = merge(r.clone(), &l, MergeStrategy::Append).merged;
        for (k, v) in &r {
            prop_assert_eq!(out.get(k), Some(v));
        }
        for (k, v) in &l {
            if !r.contains_key(k) {
                prop_assert_eq!(out.get(k), Some(v));
            }
        }
        for k in out.keys() {
            prop_assert!(r.contains_key(k) || l.contains_key(k));
        }
    }

    #[test]
    fn append_is_idempotent(r in variables(), l in variables()) {
        let once = merge(r, &l, MergeStrategy::Append).merged;
        let twice = merge(once.clone(), &l, MergeStrategy::Append).merged;
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn delete_removes_exactly_shared_keys(r in variables(), l in variables()) {
        let out = merge(r.clone(), &l, MergeStrategy::Delete).merged;
        let expected: VariableMap = r
            .into_iter()
            .filter(|(k, _)| !l.contains_key(k))
            .collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn replace_equals_local(r in variables(), l in variables()) {
        let out = merge(r, &l, MergeStrategy::Replace).merged;
        prop_assert_eq!(out, l);
    }

    #[test]
    fn update_with_empty_local_is_noop(r in variables()) {
        let out = merge(r.clone(), &VariableMap::new(), MergeStrategy::Update).merged;
        prop_assert_eq!(out, r);
    }

    #[test]
    fn update_never_introduces_keys(r in variables(), l in variables()) {
        let out = merge(r.clone(), &l, MergeStrategy::Update).merged;
        prop_assert_eq!(out.len(), r.len());
        for (k, v) in &out {
            prop_assert!(r.contains_key(k));
            let expected = l.get(k).or_else(|| r.get(k));
            prop_assert_eq!(Some(v), expected);
        }
    }

    #[test]
    fn update_logs_every_shared_key(r in variables(), l in variables()) {
        let out = merge(r.clone(), &l, MergeStrategy::Update);
        let shared = l.keys().filter(|k| r.contains_key(k)).count();
        prop_assert_eq!(out.changes.len(), shared);
    }

    #[test]
    fn update_reports_updated_only_for_differing_non_sequences(r in variables(), l in variables()) {
        let out = merge(r.clone(), &l, MergeStrategy::Update);
        for change in &out.changes {
            let old = r.get(&change.key).unwrap();
            prop_assert_eq!(Some(&change.value), l.get(&change.key));
            if old.is_sequence() {
                prop_assert_eq!(change.action, ChangeAction::Unchanged);
            } else if rendered(old) != rendered(&change.value) {
                prop_assert_eq!(change.action, ChangeAction::Updated);
            } else {
                prop_assert_eq!(change.action, ChangeAction::Unchanged);
            }
        }
    }

    #[test]
    fn nested_mappings_are_replaced_whole(r in variables(), l in variables()) {
        for strategy in [MergeStrategy::Update, MergeStrategy::Replace] {
            let out = merge(r.clone(), &l, strategy).merged;
            for (k, v) in &l {
                if v.is_mapping() && (strategy == MergeStrategy::Replace || r.contains_key(k)) {
                    prop_assert_eq!(out.get(k), Some(v));
                }
            }
        }
    }
}
