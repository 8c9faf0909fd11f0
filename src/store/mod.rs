pub mod id;
pub mod query;

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::model::item::{ItemField, ItemPriority, ItemStatus, NewItem, ProjectItem};
use self::id::IdGenerator;

/// Error type for id-targeted store operations that report failure.
///
/// Toggle and restore operations deliberately do not use this: a missing id
/// there is an expected condition and surfaces as `None`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(String),
}

/// The authoritative in-memory collection of project items.
///
/// One instance per process; every mutation goes through `&mut self`, so a
/// threaded host has to wrap the store in a single lock held for the whole
/// operation, and reads can never observe a half-applied mutation. Items are
/// kept in an insertion-ordered map keyed by id; ordering for display is
/// imposed only by the query layer.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: IndexMap<String, ProjectItem>,
    ids: IdGenerator,
}

impl ItemStore {
    pub fn new() -> Self {
        ItemStore::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProjectItem> {
        self.items.get(id)
    }

    /// Add a new item with a freshly generated id. Lifecycle flags always
    /// start false; the caller is responsible for field validation.
    pub fn add(&mut self, fields: NewItem) -> &ProjectItem {
        let id = self.ids.next();
        debug!("add {} '{}'", id, fields.title);
        let item = ProjectItem::new(id.clone(), fields);
        self.items.entry(id).or_insert(item)
    }

    /// Set the workflow status of an existing item.
    pub fn update_status(
        &mut self,
        id: &str,
        status: ItemStatus,
    ) -> Result<&ProjectItem, StoreError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.status = status;
        debug!("status {} -> {}", id, status.as_str());
        Ok(item)
    }

    /// Set the priority of an existing item.
    pub fn update_priority(
        &mut self,
        id: &str,
        priority: ItemPriority,
    ) -> Result<&ProjectItem, StoreError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.priority = priority;
        debug!("priority {} -> {}", id, priority.as_str());
        Ok(item)
    }

    /// Overwrite one free-text field of an existing item.
    pub fn update_field(
        &mut self,
        id: &str,
        field: ItemField,
        value: String,
    ) -> Result<&ProjectItem, StoreError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        match field {
            ItemField::Title => item.title = value,
            ItemField::Notes => item.notes = value,
            ItemField::FileUrl => item.file_url = value,
            ItemField::MediaUrl => item.media_url = value,
        }
        debug!("set {} on {}", field.as_str(), id);
        Ok(item)
    }

    /// Flip the approved flag. Unknown ids mutate nothing and return `None`.
    pub fn toggle_approved(&mut self, id: &str) -> Option<&ProjectItem> {
        let item = self.items.get_mut(id)?;
        item.approved = !item.approved;
        Some(item)
    }

    /// Flip the completed flag. Unknown ids mutate nothing and return `None`.
    pub fn toggle_completed(&mut self, id: &str) -> Option<&ProjectItem> {
        let item = self.items.get_mut(id)?;
        item.completed = !item.completed;
        Some(item)
    }

    /// Force `completed = false`. Idempotent; unknown ids return `None`.
    pub fn uncomplete(&mut self, id: &str) -> Option<&ProjectItem> {
        let item = self.items.get_mut(id)?;
        item.completed = false;
        Some(item)
    }

    /// Force `archived = false`. Idempotent; unknown ids return `None`.
    pub fn unarchive(&mut self, id: &str) -> Option<&ProjectItem> {
        let item = self.items.get_mut(id)?;
        item.archived = false;
        Some(item)
    }

    /// Delete an item. Returns whether removal occurred.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.items.shift_remove(id).is_some();
        if removed {
            debug!("remove {}", id);
        }
        removed
    }

    /// Delete every item whose id appears in `ids`. The input is treated as a
    /// set: duplicates are applied once, unknown ids skipped. Returns the
    /// number of items removed.
    pub fn remove_many(&mut self, ids: &[String]) -> usize {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.items.len();
        self.items.retain(|id, _| !targets.contains(id.as_str()));
        let removed = before - self.items.len();
        debug!("remove_many: {} of {} requested", removed, targets.len());
        removed
    }

    /// Archive every item whose id appears in `ids`, with the same set
    /// semantics as `remove_many`. Only `archived` changes; the other
    /// lifecycle flags are untouched. Returns the number of items matched.
    pub fn archive_many(&mut self, ids: &[String]) -> usize {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut matched = 0;
        for (id, item) in self.items.iter_mut() {
            if targets.contains(id.as_str()) {
                item.archived = true;
                matched += 1;
            }
        }
        debug!("archive_many: {} of {} requested", matched, targets.len());
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn fields(title: &str, date: &str) -> NewItem {
        NewItem {
            title: title.into(),
            date: date.into(),
            ..NewItem::default()
        }
    }

    fn seeded() -> (ItemStore, Vec<String>) {
        let mut store = ItemStore::new();
        let ids = vec![
            store.add(fields("Ship v1", "2024-03-01")).id.clone(),
            store.add(fields("Write docs", "2024-03-02")).id.clone(),
            store.add(fields("Fix login", "2024-03-01")).id.clone(),
        ];
        (store, ids)
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut store = ItemStore::new();
        let ids: Vec<String> = (0..200)
            .map(|i| store.add(fields(&format!("Item {}", i), "2024-01-01")).id.clone())
            .collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 200);
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn test_add_defaults_lifecycle_flags() {
        let mut store = ItemStore::new();
        let item = store.add(fields("Ship v1", "2024-03-01"));
        assert!(!item.archived && !item.completed && !item.approved);
    }

    #[test]
    fn test_update_status_and_priority() {
        let (mut store, ids) = seeded();
        let item = store.update_status(&ids[0], ItemStatus::Done).unwrap();
        assert_eq!(item.status, ItemStatus::Done);
        let item = store.update_priority(&ids[0], ItemPriority::Urgent).unwrap();
        assert_eq!(item.priority, ItemPriority::Urgent);
    }

    #[test]
    fn test_update_unknown_id_is_not_found_and_mutates_nothing() {
        let (mut store, _) = seeded();
        let before: Vec<ProjectItem> = store.all().into_iter().cloned().collect();

        let err = store.update_status("nonexistent-id", ItemStatus::Done);
        assert_eq!(err, Err(StoreError::NotFound("nonexistent-id".into())));
        let err = store.update_field("nonexistent-id", ItemField::Title, "x".into());
        assert!(err.is_err());

        let after: Vec<ProjectItem> = store.all().into_iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_field_each_variant() {
        let (mut store, ids) = seeded();
        store
            .update_field(&ids[0], ItemField::Title, "Ship v2".into())
            .unwrap();
        store
            .update_field(&ids[0], ItemField::Notes, "blocked on QA".into())
            .unwrap();
        store
            .update_field(&ids[0], ItemField::FileUrl, "https://x/f.pdf".into())
            .unwrap();
        store
            .update_field(&ids[0], ItemField::MediaUrl, "https://x/m.mp4".into())
            .unwrap();
        let item = store.get(&ids[0]).unwrap();
        assert_eq!(item.title, "Ship v2");
        assert_eq!(item.notes, "blocked on QA");
        assert_eq!(item.file_url, "https://x/f.pdf");
        assert_eq!(item.media_url, "https://x/m.mp4");
    }

    #[test]
    fn test_toggle_flags_flip_and_back() {
        let (mut store, ids) = seeded();
        assert!(store.toggle_completed(&ids[0]).unwrap().completed);
        assert!(!store.toggle_completed(&ids[0]).unwrap().completed);
        assert!(store.toggle_approved(&ids[0]).unwrap().approved);
        assert!(!store.toggle_approved(&ids[0]).unwrap().approved);
    }

    #[test]
    fn test_toggle_unknown_id_returns_none() {
        let (mut store, _) = seeded();
        assert!(store.toggle_completed("missing").is_none());
        assert!(store.toggle_approved("missing").is_none());
        assert!(store.uncomplete("missing").is_none());
        assert!(store.unarchive("missing").is_none());
    }

    #[test]
    fn test_flag_independence() {
        let (mut store, ids) = seeded();
        store.toggle_completed(&ids[0]).unwrap();
        store.toggle_approved(&ids[0]).unwrap();
        store.archive_many(std::slice::from_ref(&ids[0]));

        let item = store.get(&ids[0]).unwrap();
        assert!(item.archived);
        assert!(item.completed, "archiving must not clear completed");
        assert!(item.approved, "archiving must not clear approved");
    }

    #[test]
    fn test_restore_operations_are_idempotent() {
        let (mut store, ids) = seeded();
        // Already unarchived / uncompleted: forcing false again changes nothing.
        let before = store.get(&ids[0]).unwrap().clone();
        store.unarchive(&ids[0]).unwrap();
        store.uncomplete(&ids[0]).unwrap();
        assert_eq!(store.get(&ids[0]).unwrap(), &before);

        store.archive_many(std::slice::from_ref(&ids[0]));
        store.unarchive(&ids[0]).unwrap();
        store.unarchive(&ids[0]).unwrap();
        assert!(!store.get(&ids[0]).unwrap().archived);
    }

    #[test]
    fn test_remove_reports_outcome() {
        let (mut store, ids) = seeded();
        assert!(store.remove(&ids[0]));
        assert!(!store.remove(&ids[0]));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_many_set_semantics() {
        let (mut store, ids) = seeded();
        let removed = store.remove_many(&[
            ids[0].clone(),
            ids[0].clone(),
            "missing".to_string(),
            ids[1].clone(),
        ]);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&ids[2]).is_some());
    }

    #[test]
    fn test_archive_many_set_semantics() {
        let (mut store, ids) = seeded();
        let matched = store.archive_many(&[ids[0].clone(), ids[0].clone(), ids[1].clone()]);
        assert_eq!(matched, 2);
        assert!(store.get(&ids[0]).unwrap().archived);
        assert!(store.get(&ids[1]).unwrap().archived);
        assert!(!store.get(&ids[2]).unwrap().archived);
    }
}
