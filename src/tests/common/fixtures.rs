//! Test Fixtures
//!
//! Writes sample data sets into temporary directories and builds gambit lists.

use std::fs;

use tempfile::TempDir;

use crate::config::AppConfig;
use crate::core::catalog::{ActionRecord, EntityRecord, JsonCatalog, ENTITY_SENTINEL, ACTION_SENTINEL};
use crate::core::gambits::GambitList;

pub const ENTITIES_FILE: &str = "bnpcNameIds.json";
pub const ACTIONS_FILE: &str = "actions.json";

// =============================================================================
// Data Sets
// =============================================================================

pub fn sample_entities() -> Vec<EntityRecord> {
    vec![
        EntityRecord::new(ENTITY_SENTINEL, "None", 0),
        EntityRecord::new(1001, "Goblin", 42),
        EntityRecord::new(1002, "Ifrit", 1185),
        EntityRecord::new(1003, "Second Hoplomachus", 2312),
    ]
}

pub fn sample_actions() -> Vec<ActionRecord> {
    vec![
        ActionRecord::new(ACTION_SENTINEL, "None"),
        ActionRecord::new(7, "Attack"),
        ActionRecord::new(500, "Slash"),
        ActionRecord::new(1514, "Incinerate"),
    ]
}

/// Write both sample data sets into a fresh temp directory.
/// Returns the TempDir, which must be kept alive.
pub fn write_sample_data() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    write_data_set(&dir, ENTITIES_FILE, &sample_entities());
    write_data_set(&dir, ACTIONS_FILE, &sample_actions());
    dir
}

pub fn write_data_set<T: serde::Serialize>(dir: &TempDir, name: &str, records: &[T]) {
    let json = serde_json::to_string_pretty(records).expect("Failed to serialize records");
    fs::write(dir.path().join(name), json).expect("Failed to write data set");
}

pub fn sample_catalog(dir: &TempDir) -> JsonCatalog {
    JsonCatalog::new(dir.path(), ENTITIES_FILE, ACTIONS_FILE)
}

/// Config pointing data and output into `dir`.
pub fn config_in(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.data.data_dir = dir.path().to_path_buf();
    config.output.dir = dir.path().join("output");
    config
}

// =============================================================================
// Gambit Lists
// =============================================================================

/// A list holding `ids` in order.
pub fn gambits_with(ids: &[String]) -> GambitList {
    let mut list = GambitList::new();
    for _ in 1..ids.len() {
        list.add_entry();
    }
    for (i, id) in ids.iter().enumerate() {
        list.set_entry_value(i + 1, id.clone())
            .expect("ordinal within freshly built list");
    }
    list
}
