use std::collections::HashSet;

use crate::metadata::{EditableMetadata, KEY_CAMERA_MODEL, KEY_LOCATION};

pub mod export;
pub mod types;
pub mod validate;

pub use export::*;
pub use types::*;
pub use validate::*;

/// Fields reachable by the bulk edit panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkField {
    Author,
    Title,
}

impl BulkField {
    pub fn label(&self) -> &'static str {
        match self {
            BulkField::Author => "Author",
            BulkField::Title => "Title",
        }
    }
}

/// Independent sanitize actions. `Location` and `Camera` target fabricated
/// technical keys; the rest clear editable fields. Removing an absent key is
/// a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SanitizeField {
    Author,
    Title,
    Description,
    Location,
    Camera,
}

/// In-memory ordered collection of file entries plus the active pointer and
/// the selection set. All mutation goes through these methods; invariants:
/// the active id always references an existing entry (or is `None`), and the
/// selection set never holds an id the registry dropped.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
    active: Option<String>,
    selected: HashSet<String>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut FileEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&FileEntry> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn selected_ids(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Synthesizes metadata for each file and appends in insertion order.
    /// The first added entry becomes active when nothing was. Never fails;
    /// an empty input is a no-op.
    pub fn add(&mut self, files: Vec<RawFile>) -> &[FileEntry] {
        let start = self.entries.len();
        for file in files {
            self.entries.push(FileEntry::new(file));
        }
        if self.active.is_none() {
            if let Some(first) = self.entries.get(start) {
                self.active = Some(first.id.clone());
            }
        }
        if self.entries.len() > start {
            log::info!(
                "[registry] added {} entries ({} total)",
                self.entries.len() - start,
                self.entries.len()
            );
        }
        &self.entries[start..]
    }

    /// Sets the active pointer if the id exists; unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        if self.entries.iter().any(|e| e.id == id) {
            self.active = Some(id.to_string());
        } else {
            log::debug!("[registry] select ignored for unknown id {id}");
        }
    }

    pub fn set_selected(&mut self, id: &str, included: bool) {
        if included {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Removes the entry and its selection membership in one step. Returns
    /// the removed entry so the caller can report its file name.
    pub fn delete(&mut self, id: &str) -> Option<FileEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(idx);
        self.selected.remove(id);
        self.reassign_active();
        Some(removed)
    }

    /// Removes every matching entry atomically; ids not present are ignored.
    pub fn bulk_delete(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        self.selected.retain(|id| !ids.contains(id));
        self.reassign_active();
        let removed = before - self.entries.len();
        if removed > 0 {
            log::info!("[registry] bulk deleted {removed} entries");
        }
        removed
    }

    // Active falls back to the first remaining entry in display order, or
    // clears when the registry empties.
    fn reassign_active(&mut self) {
        let still_present = self
            .active
            .as_deref()
            .map(|id| self.entries.iter().any(|e| e.id == id))
            .unwrap_or(false);
        if !still_present {
            self.active = self.entries.first().map(|e| e.id.clone());
        }
    }

    /// Wholesale replacement of the editable record. Validation failures are
    /// reported per-field and leave the stored record untouched.
    pub fn save_editable(
        &mut self,
        id: &str,
        data: EditableMetadata,
    ) -> Result<(), ValidationErrors> {
        validate_editable(&data)?;
        if let Some(entry) = self.get_mut(id) {
            entry.metadata.editable = data;
        }
        Ok(())
    }

    /// Sets one field on every matching entry; returns how many were updated.
    pub fn bulk_update_field(
        &mut self,
        ids: &HashSet<String>,
        field: BulkField,
        value: &str,
    ) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter_mut().filter(|e| ids.contains(&e.id)) {
            match field {
                BulkField::Author => entry.metadata.editable.author = value.to_string(),
                BulkField::Title => entry.metadata.editable.title = value.to_string(),
            }
            updated += 1;
        }
        updated
    }

    /// Writes a generated description into the editable record. Returns
    /// false when the entry no longer exists (late arrivals are dropped).
    pub fn apply_description(&mut self, id: &str, description: &str) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                entry.metadata.editable.description = description.to_string();
                true
            }
            None => false,
        }
    }

    /// Clears the requested fields on the targeted entry only.
    pub fn sanitize(&mut self, id: &str, fields: &[SanitizeField]) -> bool {
        let Some(entry) = self.get_mut(id) else {
            return false;
        };
        for field in fields {
            match field {
                SanitizeField::Author => entry.metadata.editable.author.clear(),
                SanitizeField::Title => entry.metadata.editable.title.clear(),
                SanitizeField::Description => entry.metadata.editable.description.clear(),
                SanitizeField::Location => {
                    entry.metadata.technical.remove(KEY_LOCATION);
                }
                SanitizeField::Camera => {
                    entry.metadata.technical.remove(KEY_CAMERA_MODEL);
                }
            }
        }
        true
    }

    /// Case-insensitive substring match on file name. A view, not a
    /// mutation: registry order, selection and the active pointer are
    /// untouched. An empty term yields every entry in insertion order.
    pub fn filter<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a FileEntry> + 'a {
        let needle = term.to_lowercase();
        self.entries.iter().filter(move |e| {
            needle.is_empty()
                || e.metadata
                    .general
                    .file_name
                    .to_lowercase()
                    .contains(&needle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};

    fn ts() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap()
    }

    fn raw(name: &str, bytes: Vec<u8>) -> RawFile {
        RawFile::from_bytes(name, bytes, ts())
    }

    fn registry_with(names: &[&str]) -> FileRegistry {
        let mut registry = FileRegistry::new();
        registry.add(names.iter().map(|n| raw(n, vec![0u8; 16])).collect());
        registry
    }

    fn ids(registry: &FileRegistry) -> Vec<String> {
        registry.entries().iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn adding_n_files_sizes_the_registry_and_activates_the_first() {
        let registry = registry_with(&["a.png", "b.png", "c.png"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.active_id(), Some(ids(&registry)[0].as_str()));
    }

    #[test]
    fn adding_nothing_is_a_noop() {
        let mut registry = FileRegistry::new();
        assert!(registry.add(Vec::new()).is_empty());
        assert!(registry.is_empty());
        assert_eq!(registry.active_id(), None);
    }

    #[test]
    fn later_adds_do_not_steal_the_active_pointer() {
        let mut registry = registry_with(&["a.png"]);
        let first = ids(&registry)[0].clone();
        registry.add(vec![raw("b.png", vec![0u8; 8])]);
        assert_eq!(registry.active_id(), Some(first.as_str()));
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let mut registry = registry_with(&["a.png", "b.png"]);
        let second = ids(&registry)[1].clone();
        registry.select(&second);
        registry.select("not-a-real-id");
        assert_eq!(registry.active_id(), Some(second.as_str()));
    }

    #[test]
    fn deleting_the_active_entry_reassigns_to_the_first_remaining() {
        let mut registry = registry_with(&["a.png", "b.png", "c.png"]);
        let all = ids(&registry);
        registry.select(&all[1]);
        registry.delete(&all[1]);
        assert_eq!(registry.active_id(), Some(all[0].as_str()));
    }

    #[test]
    fn deleting_a_non_active_entry_keeps_the_pointer() {
        let mut registry = registry_with(&["a.png", "b.png"]);
        let all = ids(&registry);
        registry.delete(&all[1]);
        assert_eq!(registry.active_id(), Some(all[0].as_str()));
    }

    #[test]
    fn deleting_the_last_entry_clears_the_pointer() {
        let mut registry = registry_with(&["a.png"]);
        let only = ids(&registry)[0].clone();
        registry.delete(&only);
        assert!(registry.is_empty());
        assert_eq!(registry.active_id(), None);
    }

    #[test]
    fn delete_drops_selection_membership_in_the_same_step() {
        let mut registry = registry_with(&["a.png", "b.png"]);
        let all = ids(&registry);
        registry.set_selected(&all[0], true);
        registry.delete(&all[0]);
        assert!(!registry.is_selected(&all[0]));
        assert_eq!(registry.selected_count(), 0);
    }

    #[test]
    fn bulk_delete_removes_exactly_the_given_set() {
        let mut registry = registry_with(&["a.png", "b.png", "c.png", "d.png"]);
        let all = ids(&registry);
        let doomed: HashSet<String> = [all[1].clone(), all[3].clone()].into();
        for id in &doomed {
            registry.set_selected(id, true);
        }
        registry.set_selected(&all[0], true);

        assert_eq!(registry.bulk_delete(&doomed), 2);
        assert_eq!(ids(&registry), vec![all[0].clone(), all[2].clone()]);
        // selection has an empty intersection with the removed set
        assert!(registry.selected_ids().is_disjoint(&doomed));
        assert!(registry.is_selected(&all[0]));
    }

    #[test]
    fn bulk_delete_reassigns_the_active_pointer_when_it_was_removed() {
        let mut registry = registry_with(&["a.png", "b.png", "c.png"]);
        let all = ids(&registry);
        let doomed: HashSet<String> = [all[0].clone()].into();
        registry.bulk_delete(&doomed);
        assert_eq!(registry.active_id(), Some(all[1].as_str()));
    }

    #[test]
    fn save_editable_rejects_an_oversized_title_without_mutating() {
        let mut registry = registry_with(&["a.png"]);
        let id = ids(&registry)[0].clone();
        let data = EditableMetadata {
            title: "t".repeat(501),
            ..Default::default()
        };
        let errors = registry.save_editable(&id, data).unwrap_err();
        assert!(errors.title.is_some());
        assert_eq!(registry.get(&id).unwrap().metadata.editable, EditableMetadata::default());
    }

    #[test]
    fn save_editable_replaces_the_record_wholesale() {
        let mut registry = registry_with(&["a.png"]);
        let id = ids(&registry)[0].clone();
        let data = EditableMetadata {
            title: "Holiday".into(),
            author: "Sam".into(),
            description: "Beach day".into(),
            tags: "travel, summer".into(),
        };
        registry.save_editable(&id, data.clone()).unwrap();
        assert_eq!(registry.get(&id).unwrap().metadata.editable, data);
    }

    #[test]
    fn bulk_update_field_touches_only_matching_ids() {
        let mut registry = registry_with(&["a.png", "b.png", "c.png"]);
        let all = ids(&registry);
        let mut targets: HashSet<String> = [all[0].clone(), all[2].clone()].into();
        targets.insert("ghost-id".to_string());

        let updated = registry.bulk_update_field(&targets, BulkField::Author, "Sam");
        assert_eq!(updated, 2);
        assert_eq!(registry.get(&all[0]).unwrap().metadata.editable.author, "Sam");
        assert_eq!(registry.get(&all[1]).unwrap().metadata.editable.author, "");
        assert_eq!(registry.get(&all[2]).unwrap().metadata.editable.author, "Sam");
    }

    #[test]
    fn sanitize_author_title_clears_exactly_those_fields() {
        let mut registry = registry_with(&["a.png"]);
        let id = ids(&registry)[0].clone();
        registry
            .save_editable(
                &id,
                EditableMetadata {
                    title: "Holiday".into(),
                    author: "Sam".into(),
                    description: "Beach day".into(),
                    tags: "travel".into(),
                },
            )
            .unwrap();
        let technical_before = registry.get(&id).unwrap().metadata.technical.clone();

        registry.sanitize(&id, &[SanitizeField::Author, SanitizeField::Title]);

        let entry = registry.get(&id).unwrap();
        assert_eq!(entry.metadata.editable.title, "");
        assert_eq!(entry.metadata.editable.author, "");
        assert_eq!(entry.metadata.editable.description, "Beach day");
        assert_eq!(entry.metadata.editable.tags, "travel");
        assert_eq!(entry.metadata.technical, technical_before);
    }

    #[test]
    fn sanitize_location_and_camera_remove_absent_keys_as_a_noop() {
        let mut registry = registry_with(&["a.png"]);
        let id = ids(&registry)[0].clone();
        let before = registry.get(&id).unwrap().metadata.technical.clone();
        registry.sanitize(&id, &[SanitizeField::Location, SanitizeField::Camera]);
        assert_eq!(registry.get(&id).unwrap().metadata.technical, before);
    }

    #[test]
    fn sanitize_description_clears_only_the_description() {
        let mut registry = registry_with(&["a.png"]);
        let id = ids(&registry)[0].clone();
        registry
            .save_editable(
                &id,
                EditableMetadata {
                    description: "Beach day".into(),
                    tags: "travel".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        registry.sanitize(&id, &[SanitizeField::Description]);
        let entry = registry.get(&id).unwrap();
        assert_eq!(entry.metadata.editable.description, "");
        assert_eq!(entry.metadata.editable.tags, "travel");
    }

    #[test]
    fn sanitize_touches_only_the_targeted_entry() {
        let mut registry = registry_with(&["a.png", "b.png"]);
        let all = ids(&registry);
        for id in &all {
            registry
                .save_editable(
                    id,
                    EditableMetadata {
                        author: "Sam".into(),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        registry.sanitize(&all[0], &[SanitizeField::Author]);
        assert_eq!(registry.get(&all[0]).unwrap().metadata.editable.author, "");
        assert_eq!(registry.get(&all[1]).unwrap().metadata.editable.author, "Sam");
    }

    #[test]
    fn empty_filter_returns_everything_in_insertion_order() {
        let registry = registry_with(&["c.png", "a.png", "b.png"]);
        let names: Vec<&str> = registry
            .filter("")
            .map(|e| e.metadata.general.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["c.png", "a.png", "b.png"]);
    }

    #[test]
    fn filter_is_case_insensitive_and_idempotent() {
        let registry = registry_with(&["Report.pdf", "photo.png", "REPORT-final.pdf"]);
        let first: Vec<&str> = registry
            .filter("report")
            .map(|e| e.metadata.general.file_name.as_str())
            .collect();
        assert_eq!(first, vec!["Report.pdf", "REPORT-final.pdf"]);
        // restartable view: a second pass over the same term sees the same rows
        let second: Vec<&str> = registry
            .filter("report")
            .map(|e| e.metadata.general.file_name.as_str())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn filter_does_not_disturb_selection_or_active_state() {
        let mut registry = registry_with(&["a.png", "b.png"]);
        let all = ids(&registry);
        registry.set_selected(&all[1], true);
        let _ = registry.filter("a").count();
        assert_eq!(registry.active_id(), Some(all[0].as_str()));
        assert!(registry.is_selected(&all[1]));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn uploaded_pdf_end_to_end() {
        let mut registry = FileRegistry::new();
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.resize(2_097_152, 0);
        registry.add(vec![RawFile::from_bytes("report.pdf", bytes, ts())]);

        let entry = &registry.entries()[0];
        assert_eq!(entry.metadata.general.file_name, "report.pdf");
        assert_eq!(entry.metadata.general.file_type.mime(), "application/pdf");
        assert_eq!(entry.metadata.general.file_size, "2 MB");
        let keys: Vec<&str> = entry.metadata.technical.keys().collect();
        assert_eq!(
            keys,
            vec!["PDF Version", "Page Count", "Creator Tool", "Date Created"]
        );
        assert_eq!(entry.metadata.editable, EditableMetadata::default());
        assert_eq!(registry.active_id(), Some(entry.id.as_str()));
    }
}
