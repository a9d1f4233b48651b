//! Property-based tests for script rendering
//!
//! Tests invariants:
//! - Same inputs give byte-identical output
//! - Exactly one `addTimeLine` block per entry
//! - Action identifiers appear in entry order
//! - Class names only contain identifier characters
//! - The entity sentinel always previews as the placeholder

use proptest::prelude::*;

use crate::core::catalog::{EntityRecord, ACTION_SENTINEL, ENTITY_SENTINEL};
use crate::core::template::{self, TemplateOptions, CLASS_PREFIX, PREVIEW_PLACEHOLDER};
use crate::tests::common::gambits_with;

const ACTION_CALL: &str = "make_Action( bnpc.getAsChara(), ";

/// Action identifiers in the order they appear in `script`.
fn rendered_actions(script: &str) -> Vec<u32> {
    script
        .lines()
        .filter_map(|line| line.split_once(ACTION_CALL))
        .filter_map(|(_, rest)| rest.split(',').next())
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

/// Timeline ticks in the order they appear in `script`.
fn rendered_ticks(script: &str) -> Vec<u64> {
    script
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_suffix(" );"))
        .filter_map(|tick| tick.parse().ok())
        .collect()
}

fn entity_strategy() -> impl Strategy<Value = EntityRecord> {
    (0u32..100_000, ".{0,24}", 0u32..10_000)
        .prop_map(|(id, name, base)| EntityRecord::new(id, name, base))
}

fn action_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0u32..100_000).prop_map(|id| id.to_string()), 1..16)
}

proptest! {
    #[test]
    fn generate_is_deterministic(entity in entity_strategy(), ids in action_ids()) {
        let list = gambits_with(&ids);
        let first = template::generate(&entity, list.entries());
        let second = template::generate(&entity, list.entries());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn one_block_per_entry_in_order(entity in entity_strategy(), ids in action_ids()) {
        let list = gambits_with(&ids);
        let script = template::generate(&entity, list.entries());

        prop_assert_eq!(script.matches("gambitPack->addTimeLine(").count(), ids.len());
        let expected: Vec<u32> = ids.iter().map(|id| id.parse().unwrap()).collect();
        prop_assert_eq!(rendered_actions(&script), expected);
    }

    #[test]
    fn non_numeric_actions_render_as_sentinel(junk in "[a-zA-Z ]{1,12}") {
        let list = gambits_with(&[junk]);
        let script = template::generate(&EntityRecord::new(1, "Imp", 2), list.entries());
        prop_assert_eq!(rendered_actions(&script), vec![ACTION_SENTINEL]);
    }

    #[test]
    fn class_name_is_identifier(entity in entity_strategy()) {
        let class = template::class_name(&entity);
        prop_assert!(class.starts_with(CLASS_PREFIX));
        prop_assert!(class.len() > CLASS_PREFIX.len());
        prop_assert!(class.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));

        let script = template::generate(&entity, &[]);
        let class_line = format!("class {class} : public BattleNpcScript");
        prop_assert!(script.contains(&class_line));
        let expose_line = format!("EXPOSE_SCRIPT( {class} );");
        prop_assert!(script.ends_with(&expose_line));
    }

    #[test]
    fn ticks_follow_timeline_step(ids in action_ids(), step in 0u32..5_000) {
        let list = gambits_with(&ids);
        let options = TemplateOptions { timeline_step: step };
        let script = template::generate_with(&EntityRecord::new(1, "Imp", 2), list.entries(), &options);

        let expected: Vec<u64> = (0..ids.len() as u64).map(|i| i * u64::from(step)).collect();
        prop_assert_eq!(rendered_ticks(&script), expected);
    }

    #[test]
    fn sentinel_always_previews_placeholder(ids in action_ids(), step in 0u32..100) {
        let list = gambits_with(&ids);
        let options = TemplateOptions { timeline_step: step };
        let text = template::preview(
            ENTITY_SENTINEL,
            |_| panic!("sentinel must not be resolved"),
            list.entries(),
            &options,
        );
        prop_assert_eq!(text, PREVIEW_PLACEHOLDER);
    }
}
