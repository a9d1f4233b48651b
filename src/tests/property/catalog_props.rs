//! Property-based tests for the lookup data source
//!
//! Tests invariants:
//! - Visible choices never contain a sentinel
//! - Visible choices keep the source order
//! - Unknown identifiers resolve to the fallback record with the requested id
//! - A file that is not a JSON array reads as an empty data set

use std::fs;

use proptest::prelude::*;

use crate::core::catalog::{
    find_entity_or_fallback, visible_actions, visible_entities, ActionRecord, EntityRecord,
    ACTION_SENTINEL, ENTITY_SENTINEL, FALLBACK_BASE_ID, FALLBACK_ENTITY_NAME,
};
use crate::tests::common::{config_in, sample_catalog, write_data_set, write_sample_data, ENTITIES_FILE};

/// Ids drawn from a small range so sentinels show up often.
fn entity_records() -> impl Strategy<Value = Vec<EntityRecord>> {
    prop::collection::vec(
        prop_oneof![Just(ENTITY_SENTINEL), 0u32..50],
        0..24,
    )
    .prop_map(|ids| {
        ids.into_iter()
            .map(|id| EntityRecord::new(id, format!("Npc{id}"), id + 1))
            .collect()
    })
}

fn action_records() -> impl Strategy<Value = Vec<ActionRecord>> {
    prop::collection::vec(prop_oneof![Just(ACTION_SENTINEL), 0u32..50], 0..24).prop_map(|ids| {
        ids.into_iter()
            .map(|id| ActionRecord::new(id, format!("Action{id}")))
            .collect()
    })
}

proptest! {
    #[test]
    fn visible_entities_drop_only_sentinels(records in entity_records()) {
        let visible: Vec<u32> = visible_entities(&records).iter().map(|r| r.nameid).collect();
        let expected: Vec<u32> = records
            .iter()
            .map(|r| r.nameid)
            .filter(|&id| id != ENTITY_SENTINEL)
            .collect();
        prop_assert_eq!(visible, expected);
    }

    #[test]
    fn visible_actions_drop_only_sentinels(records in action_records()) {
        let visible: Vec<u32> = visible_actions(&records).iter().map(|r| r.id).collect();
        let expected: Vec<u32> = records
            .iter()
            .map(|r| r.id)
            .filter(|&id| id != ACTION_SENTINEL)
            .collect();
        prop_assert_eq!(visible, expected);
    }

    #[test]
    fn unknown_ids_fall_back(records in entity_records(), id in 100u32..9_000) {
        let resolved = find_entity_or_fallback(&records, id);
        prop_assert_eq!(resolved.nameid, id);
        prop_assert_eq!(resolved.name, FALLBACK_ENTITY_NAME);
        prop_assert_eq!(resolved.basenameid, FALLBACK_BASE_ID);
    }

    #[test]
    fn known_ids_resolve_to_first_match(records in entity_records(), pick in 0usize..24) {
        prop_assume!(!records.is_empty());
        let wanted = records[pick % records.len()].nameid;
        let resolved = find_entity_or_fallback(&records, wanted);
        let first = records.iter().find(|r| r.nameid == wanted).unwrap();
        prop_assert_eq!(&resolved, first);
    }

    #[test]
    fn non_array_file_reads_empty(body in "[^\\[]{0,64}") {
        let dir = write_sample_data();
        fs::write(dir.path().join(ENTITIES_FILE), body).unwrap();
        prop_assert!(sample_catalog(&dir).entities().is_empty());
        prop_assert!(!sample_catalog(&dir).actions().is_empty());
    }

    #[test]
    fn choices_come_from_current_files(records in entity_records()) {
        let dir = write_sample_data();
        write_data_set(&dir, ENTITIES_FILE, &records);
        let catalog = config_in(&dir).catalog();

        let values: Vec<String> = catalog.entity_choices().into_iter().map(|c| c.value).collect();
        let expected: Vec<String> = visible_entities(&records)
            .iter()
            .map(|r| r.nameid.to_string())
            .collect();
        prop_assert_eq!(values, expected);
    }
}
