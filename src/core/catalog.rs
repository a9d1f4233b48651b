//! Lookup data source for battle NPC names and actions.
//!
//! Both data sets are flat JSON arrays read from the data directory on every
//! request. A missing or malformed file is logged and treated as an empty set;
//! callers use "empty" as the failure signal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{EditorError, Result};

/// Entity identifier meaning "no BNPC selected".
pub const ENTITY_SENTINEL: u32 = 9999;
/// Action identifier meaning "no action selected".
pub const ACTION_SENTINEL: u32 = 999;

/// Name used when a selected entity is missing from the data set.
pub const FALLBACK_ENTITY_NAME: &str = "Default";
/// Base identifier used when a selected entity is missing from the data set.
pub const FALLBACK_BASE_ID: u32 = 55;

/// A selectable battle NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub nameid: u32,
    pub name: String,
    #[serde(default)]
    pub basenameid: u32,
}

impl EntityRecord {
    pub fn new(nameid: u32, name: impl Into<String>, basenameid: u32) -> Self {
        Self {
            nameid,
            name: name.into(),
            basenameid,
        }
    }

    /// Record substituted for an identifier the data set does not contain.
    pub fn fallback(nameid: u32) -> Self {
        Self::new(nameid, FALLBACK_ENTITY_NAME, FALLBACK_BASE_ID)
    }

    pub fn is_sentinel(&self) -> bool {
        self.nameid == ENTITY_SENTINEL
    }
}

/// A selectable combat action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: u32,
    pub name: String,
}

impl ActionRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == ACTION_SENTINEL
    }
}

/// One option in a dropdown: the stored value and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Entities shown to the user, in source order, without the sentinel row.
pub fn visible_entities(records: &[EntityRecord]) -> Vec<&EntityRecord> {
    records.iter().filter(|r| !r.is_sentinel()).collect()
}

/// Actions shown to the user, in source order, without the sentinel row.
pub fn visible_actions(records: &[ActionRecord]) -> Vec<&ActionRecord> {
    records.iter().filter(|r| !r.is_sentinel()).collect()
}

/// Find `nameid` in `records`, or build the fallback record for it.
pub fn find_entity_or_fallback(records: &[EntityRecord], nameid: u32) -> EntityRecord {
    records
        .iter()
        .find(|r| r.nameid == nameid)
        .cloned()
        .unwrap_or_else(|| {
            log::debug!("BNPC {nameid} not in data set, using fallback record");
            EntityRecord::fallback(nameid)
        })
}

// ============================================================================
// JSON-backed catalog
// ============================================================================

/// Reads the entity and action data sets from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    data_dir: PathBuf,
    entities_file: String,
    actions_file: String,
}

impl JsonCatalog {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        entities_file: impl Into<String>,
        actions_file: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            entities_file: entities_file.into(),
            actions_file: actions_file.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read and parse a named data set, surfacing the failure.
    pub fn try_read_data_set<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(name);
        let contents = fs::read_to_string(&path).map_err(|source| EditorError::DataRead {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| EditorError::DataParse { path, source })
    }

    /// Read a named data set; any failure is logged and yields an empty list.
    pub fn read_data_set<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        match self.try_read_data_set(name) {
            Ok(records) => {
                log::debug!("Loaded {} records from {name}", records.len());
                records
            }
            Err(e) => {
                log::warn!("{e}");
                Vec::new()
            }
        }
    }

    pub fn entities(&self) -> Vec<EntityRecord> {
        self.read_data_set(&self.entities_file)
    }

    pub fn actions(&self) -> Vec<ActionRecord> {
        self.read_data_set(&self.actions_file)
    }

    /// Dropdown options for the BNPC field.
    pub fn entity_choices(&self) -> Vec<Choice> {
        visible_entities(&self.entities())
            .into_iter()
            .map(|r| Choice::new(r.nameid.to_string(), r.name.clone()))
            .collect()
    }

    /// Dropdown options for a gambit slot.
    pub fn action_choices(&self) -> Vec<Choice> {
        visible_actions(&self.actions())
            .into_iter()
            .map(|r| Choice::new(r.id.to_string(), r.name.clone()))
            .collect()
    }

    /// Look up the selected entity, re-reading the data set.
    pub fn resolve_entity(&self, nameid: u32) -> EntityRecord {
        find_entity_or_fallback(&self.entities(), nameid)
    }
}
