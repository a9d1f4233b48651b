//! Property-based tests for the gambit list
//!
//! Tests invariants:
//! - The list never holds fewer than one entry
//! - Ordinals are always `1..=len` after any operation sequence
//! - Adding n entries then removing n restores the original list
//! - Out-of-range writes leave the list untouched

use proptest::prelude::*;

use crate::core::gambits::{GambitList, DEFAULT_ACTION_ID};
use crate::tests::common::gambits_with;

#[derive(Debug, Clone)]
enum Op {
    Add,
    RemoveLast,
    RemoveAt(usize),
    Set(usize, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        Just(Op::RemoveLast),
        (0usize..12).prop_map(Op::RemoveAt),
        (0usize..12, 0u32..2_000).prop_map(|(o, id)| Op::Set(o, id)),
    ]
}

fn apply(list: &mut GambitList, op: &Op) {
    match op {
        Op::Add => list.add_entry(),
        Op::RemoveLast => {
            list.remove_entry();
        }
        Op::RemoveAt(ordinal) => {
            list.remove_entry_at(*ordinal);
        }
        Op::Set(ordinal, id) => {
            let _ = list.set_entry_value(*ordinal, id.to_string());
        }
    }
}

proptest! {
    #[test]
    fn never_empty_and_ordinals_contiguous(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut list = GambitList::new();
        for op in &ops {
            apply(&mut list, op);
            prop_assert!(list.len() >= 1);
            let ordinals: Vec<usize> = list.entries().iter().map(|e| e.ordinal).collect();
            prop_assert_eq!(ordinals, (1..=list.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn add_then_remove_restores(ids in prop::collection::vec((0u32..2_000).prop_map(|i| i.to_string()), 1..8), n in 0usize..10) {
        let mut list = gambits_with(&ids);
        let before = list.clone();

        for _ in 0..n {
            list.add_entry();
        }
        prop_assert_eq!(list.len(), ids.len() + n);
        prop_assert!(list.entries()[ids.len()..].iter().all(|e| e.action_id == DEFAULT_ACTION_ID));

        for _ in 0..n {
            prop_assert!(list.remove_entry());
        }
        prop_assert_eq!(list, before);
    }

    #[test]
    fn remove_at_closes_gap(ids in prop::collection::vec((0u32..2_000).prop_map(|i| i.to_string()), 2..8), pick in 0usize..8) {
        let ordinal = pick % ids.len() + 1;
        let mut list = gambits_with(&ids);
        prop_assert!(list.remove_entry_at(ordinal));

        let mut expected = ids.clone();
        expected.remove(ordinal - 1);
        let actual: Vec<&str> = list.action_ids().collect();
        prop_assert_eq!(actual, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_set_is_rejected(ids in prop::collection::vec((0u32..2_000).prop_map(|i| i.to_string()), 1..8), extra in 1usize..5) {
        let mut list = gambits_with(&ids);
        let before = list.clone();
        prop_assert!(list.set_entry_value(0, "1").is_err());
        prop_assert!(list.set_entry_value(ids.len() + extra, "1").is_err());
        prop_assert_eq!(list, before);
    }
}
