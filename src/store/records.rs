//! The in-memory record store. Holds the ordered record list, hands out
//! stable ids for selection tracking, and mirrors every mutation straight
//! back to the document file. There is no batching and no dirty flag, so
//! the file on disk always reflects the last completed operation.

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Record;

use super::file::{load_records, save_records};

/// Stable runtime identity of a record. Ids are assigned when a record
/// enters the store (at load or insert) and are never serialized, so two
/// field-for-field identical records stay individually addressable for
/// update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(u64);

struct Entry {
    id: RecordId,
    record: Record,
}

/// Ordered record list mirrored to a JSON document on disk.
pub struct RecordStore {
    path: PathBuf,
    entries: Vec<Entry>,
    next_id: u64,
}

impl RecordStore {
    /// Load the store from `path`. A missing file yields an empty store;
    /// unreadable or malformed files propagate as errors.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = load_records(&path)?;

        let mut store = Self {
            path,
            entries: Vec::with_capacity(records.len()),
            next_id: 1,
        };
        for record in records {
            let id = store.allocate_id();
            store.entries.push(Entry { id, record });
        }
        Ok(store)
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.record)
    }

    /// Clone the current contents in store order. The UI rebuilds its view
    /// from this snapshot after every search and every mutation instead of
    /// aliasing the live list.
    pub fn snapshot(&self) -> Vec<(RecordId, Record)> {
        self.entries
            .iter()
            .map(|entry| (entry.id, entry.record.clone()))
            .collect()
    }

    /// Append a record and persist. Rejects a blank name or region without
    /// touching the list.
    pub fn add(&mut self, record: Record) -> Result<RecordId, StoreError> {
        validate(&record)?;

        let id = self.allocate_id();
        self.entries.push(Entry { id, record });
        if let Err(err) = self.save() {
            self.entries.pop();
            return Err(err);
        }
        Ok(id)
    }

    /// Replace the record behind `id` in place and persist. An id that no
    /// longer resolves reports a stale selection and mutates nothing.
    pub fn update(&mut self, id: RecordId, record: Record) -> Result<(), StoreError> {
        validate(&record)?;

        let position = self
            .position(id)
            .ok_or(StoreError::StaleSelection)?;
        let previous = std::mem::replace(&mut self.entries[position].record, record);
        if let Err(err) = self.save() {
            self.entries[position].record = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Remove the record behind `id` and persist, preserving the relative
    /// order of the remaining entries. Returns the removed record so the UI
    /// can name it in the status line.
    pub fn remove(&mut self, id: RecordId) -> Result<Record, StoreError> {
        let position = self
            .position(id)
            .ok_or(StoreError::StaleSelection)?;
        let entry = self.entries.remove(position);
        if let Err(err) = self.save() {
            self.entries.insert(
                position,
                Entry {
                    id: entry.id,
                    record: entry.record,
                },
            );
            return Err(err);
        }
        Ok(entry.record)
    }

    /// Write the full list back to the document file.
    pub fn save(&self) -> Result<(), StoreError> {
        let records: Vec<Record> = self
            .entries
            .iter()
            .map(|entry| entry.record.clone())
            .collect();
        save_records(&self.path, &records)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Presence checks shared by add and update: name and region must survive
/// trimming. Nothing else is validated; coordinates and contact fields are
/// free-form by design.
fn validate(record: &Record) -> Result<(), StoreError> {
    if record.name.trim().is_empty() {
        return Err(StoreError::Validation {
            field: "Store name",
        });
    }
    if record.region.trim().is_empty() {
        return Err(StoreError::Validation { field: "Region" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{RecordStore, StoreError};
    use crate::models::Record;

    fn record(name: &str, region: &str) -> Record {
        Record {
            name: name.to_string(),
            region: region.to_string(),
            ..Record::default()
        }
    }

    fn scratch_store() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(dir.path().join("stores.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn add_grows_the_store_and_persists() {
        let (_dir, mut store) = scratch_store();

        store.add(record("Alpha", "Seoul")).unwrap();
        assert_eq!(store.len(), 1);

        let reloaded = RecordStore::load(store.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.snapshot()[0].1, record("Alpha", "Seoul"));
    }

    #[test]
    fn blank_name_or_region_is_rejected_without_mutation() {
        let (_dir, mut store) = scratch_store();

        for bad in [record("   ", "Seoul"), record("Alpha", "")] {
            match store.add(bad) {
                Err(StoreError::Validation { .. }) => {}
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn update_touches_only_the_targeted_record() {
        let (_dir, mut store) = scratch_store();
        let _first = store.add(record("Alpha", "Seoul")).unwrap();
        let second = store.add(record("Beta", "Busan")).unwrap();
        let third = store.add(record("Gamma", "Daegu")).unwrap();

        store.update(second, record("Beta", "Incheon")).unwrap();

        let reloaded = RecordStore::load(store.path().to_path_buf()).unwrap();
        let records: Vec<Record> = reloaded.snapshot().into_iter().map(|(_, r)| r).collect();
        assert_eq!(
            records,
            vec![
                record("Alpha", "Seoul"),
                record("Beta", "Incheon"),
                record("Gamma", "Daegu"),
            ]
        );
        assert_eq!(store.get(third).unwrap().region, "Daegu");
    }

    #[test]
    fn remove_deletes_exactly_one_and_keeps_order() {
        let (_dir, mut store) = scratch_store();
        // Duplicates are allowed; ids keep them apart.
        let first = store.add(record("Twin", "Seoul")).unwrap();
        let second = store.add(record("Twin", "Seoul")).unwrap();
        let tail = store.add(record("Omega", "Jeju")).unwrap();

        let removed = store.remove(first).unwrap();
        assert_eq!(removed, record("Twin", "Seoul"));
        assert_eq!(store.len(), 2);
        assert!(store.get(second).is_some());
        assert!(store.get(tail).is_some());

        let order: Vec<String> = store
            .snapshot()
            .into_iter()
            .map(|(_, r)| r.name)
            .collect();
        assert_eq!(order, vec!["Twin", "Omega"]);
    }

    #[test]
    fn stale_ids_report_stale_selection_without_mutation() {
        let (_dir, mut store) = scratch_store();
        let id = store.add(record("Alpha", "Seoul")).unwrap();
        store.remove(id).unwrap();

        match store.update(id, record("Alpha", "Busan")) {
            Err(StoreError::StaleSelection) => {}
            other => panic!("expected stale selection, got {other:?}"),
        }
        match store.remove(id) {
            Err(StoreError::StaleSelection) => {}
            other => panic!("expected stale selection, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn reload_assigns_resolvable_ids_to_every_entry() {
        let (_dir, mut store) = scratch_store();
        store.add(record("Alpha", "Seoul")).unwrap();
        store.add(record("Beta", "Busan")).unwrap();

        let reloaded = RecordStore::load(store.path().to_path_buf()).unwrap();
        let snapshot = reloaded.snapshot();
        assert_eq!(snapshot.len(), 2);
        // Fresh ids per process; both must resolve.
        assert!(reloaded.get(snapshot[0].0).is_some());
        assert!(reloaded.get(snapshot[1].0).is_some());
    }
}
