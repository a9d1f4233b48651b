//! Ordered gambit selection for the script being composed.
//!
//! Entries are emitted in list order, which is their priority. The list never
//! drops below one entry, and ordinals are rebuilt as `1..=len` after every
//! structural change.

use super::catalog::ACTION_SENTINEL;
use super::error::{EditorError, Result};

/// Action identifier given to newly added entries.
pub const DEFAULT_ACTION_ID: &str = "999";

/// One slot in the gambit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GambitEntry {
    /// 1-based position in the sequence.
    pub ordinal: usize,
    /// Selected action identifier, string-encoded.
    pub action_id: String,
}

impl GambitEntry {
    fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            action_id: DEFAULT_ACTION_ID.to_string(),
        }
    }

    /// Whether this slot still holds the "no action" placeholder.
    pub fn is_unset(&self) -> bool {
        self.action_id.parse::<u32>().ok() == Some(ACTION_SENTINEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GambitList {
    entries: Vec<GambitEntry>,
}

impl Default for GambitList {
    fn default() -> Self {
        Self::new()
    }
}

impl GambitList {
    /// A list holding a single default entry.
    pub fn new() -> Self {
        Self {
            entries: vec![GambitEntry::new(1)],
        }
    }

    pub fn entries(&self) -> &[GambitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no entries. Never true after construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&GambitEntry> {
        ordinal.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn action_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.action_id.as_str())
    }

    /// Append a default entry at the end.
    pub fn add_entry(&mut self) {
        self.entries.push(GambitEntry::new(self.entries.len() + 1));
        self.renumber();
    }

    /// Drop the last entry. No-op when only one remains.
    pub fn remove_entry(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        self.renumber();
        true
    }

    /// Overwrite the action of the entry at `ordinal` (1-based).
    pub fn set_entry_value(&mut self, ordinal: usize, action_id: impl Into<String>) -> Result<()> {
        let len = self.entries.len();
        let entry = ordinal
            .checked_sub(1)
            .and_then(|i| self.entries.get_mut(i))
            .ok_or(EditorError::OrdinalOutOfRange { ordinal, len })?;
        entry.action_id = action_id.into();
        Ok(())
    }

    /// Remove the entry at `ordinal` (1-based) and close the gap.
    ///
    /// Returns false without touching the list when `ordinal` is out of range
    /// or when it is the only entry left.
    pub fn remove_entry_at(&mut self, ordinal: usize) -> bool {
        if self.entries.len() <= 1 || ordinal == 0 || ordinal > self.entries.len() {
            return false;
        }
        self.entries.remove(ordinal - 1);
        self.renumber();
        true
    }

    fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.ordinal = i + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list_of(ids: &[&str]) -> GambitList {
        let mut list = GambitList::new();
        for _ in 1..ids.len() {
            list.add_entry();
        }
        for (i, id) in ids.iter().enumerate() {
            list.set_entry_value(i + 1, *id).unwrap();
        }
        list
    }

    fn ordinals(list: &GambitList) -> Vec<usize> {
        list.entries().iter().map(|e| e.ordinal).collect()
    }

    #[test]
    fn test_new_has_one_default_entry() {
        let list = GambitList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0], GambitEntry { ordinal: 1, action_id: "999".into() });
        assert!(list.entries()[0].is_unset());
    }

    #[test]
    fn test_add_entry_appends_default() {
        let mut list = list_of(&["7"]);
        list.add_entry();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(2).unwrap().action_id, DEFAULT_ACTION_ID);
        assert_eq!(list.get(1).unwrap().action_id, "7");
    }

    #[test]
    fn test_remove_last_is_noop_on_single_entry() {
        let mut list = list_of(&["7"]);
        assert!(!list.remove_entry());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(1).unwrap().action_id, "7");
    }

    #[test]
    fn test_add_then_remove_restores() {
        let original = list_of(&["7", "9", "404"]);
        let mut list = original.clone();
        list.add_entry();
        assert!(list.remove_entry());
        assert_eq!(list, original);
    }

    #[test]
    fn test_set_entry_out_of_range() {
        let mut list = GambitList::new();
        let err = list.set_entry_value(2, "7").unwrap_err();
        assert!(matches!(err, EditorError::OrdinalOutOfRange { ordinal: 2, len: 1 }));
        assert!(list.set_entry_value(0, "7").is_err());
        assert_eq!(list, GambitList::new());
    }

    #[test]
    fn test_set_entry_accepts_any_string() {
        let mut list = GambitList::new();
        list.set_entry_value(1, "not-a-number").unwrap();
        assert_eq!(list.get(1).unwrap().action_id, "not-a-number");
        assert!(!list.get(1).unwrap().is_unset());
    }

    #[rstest]
    #[case(1, &["9", "404"])]
    #[case(2, &["7", "404"])]
    #[case(3, &["7", "9"])]
    fn test_remove_entry_at_closes_gap(#[case] ordinal: usize, #[case] expected: &[&str]) {
        let mut list = list_of(&["7", "9", "404"]);
        assert!(list.remove_entry_at(ordinal));
        let ids: Vec<&str> = list.action_ids().collect();
        assert_eq!(ids, expected);
        assert_eq!(ordinals(&list), vec![1, 2]);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    fn test_remove_entry_at_out_of_range(#[case] ordinal: usize) {
        let mut list = list_of(&["7", "9", "404"]);
        assert!(!list.remove_entry_at(ordinal));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_entry_at_keeps_last_entry() {
        let mut list = list_of(&["7"]);
        assert!(!list.remove_entry_at(1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_zero_is_none() {
        assert!(GambitList::new().get(0).is_none());
    }
}
