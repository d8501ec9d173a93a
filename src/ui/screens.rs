//! The record list screen: a snapshot of the store, the filtered view
//! derived from the active keyword, and the selection the edit/delete flows
//! operate on. The view is rebuilt from a fresh snapshot after every search
//! and every mutation; it never aliases the live store.

use crate::models::Record;
use crate::store::RecordId;

pub(crate) struct RecordListScreen {
    pub(crate) records: Vec<(RecordId, Record)>,
    pub(crate) visible: Vec<(RecordId, Record)>,
    pub(crate) filter: Option<String>,
    /// `None` is the tracker's Unselected state. Search, add, update,
    /// delete, and explicit clear all reset to it.
    pub(crate) selected: Option<usize>,
}

impl RecordListScreen {
    pub(crate) fn new(records: Vec<(RecordId, Record)>) -> Self {
        let mut screen = Self {
            visible: Vec::new(),
            records,
            filter: None,
            selected: None,
        };
        screen.apply_filter();
        screen
    }

    /// Replace the snapshot after a store mutation. The active keyword is
    /// re-applied and the selection resets to Unselected.
    pub(crate) fn set_records(&mut self, records: Vec<(RecordId, Record)>) {
        self.records = records;
        self.selected = None;
        self.apply_filter();
    }

    /// Execute a search. A keyword that trims to empty clears the filter so
    /// the view equals the full snapshot. Either way the selection resets.
    pub(crate) fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|keyword| !keyword.trim().is_empty());
        self.selected = None;
        self.apply_filter();
    }

    pub(crate) fn apply_filter(&mut self) {
        self.visible = match &self.filter {
            Some(keyword) => {
                let keyword = keyword.trim();
                self.records
                    .iter()
                    .filter(|(_, record)| record.matches_keyword(keyword))
                    .cloned()
                    .collect()
            }
            None => self.records.clone(),
        };
        self.ensure_in_bounds();
    }

    /// The record behind the current selection, if any.
    pub(crate) fn current(&self) -> Option<(RecordId, &Record)> {
        let index = self.selected?;
        self.visible.get(index).map(|(id, record)| (*id, record))
    }

    /// Move the selection by `offset` rows, entering Selected(0) from the
    /// Unselected state on the first movement.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        let len = self.visible.len() as isize;
        let current = match self.selected {
            Some(index) => index as isize,
            None => {
                self.selected = Some(if offset >= 0 { 0 } else { self.visible.len() - 1 });
                return;
            }
        };
        let next = (current + offset).clamp(0, len - 1);
        self.selected = Some(next as usize);
    }

    pub(crate) fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(0);
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(self.visible.len() - 1);
        }
    }

    /// Explicit clear back to the Unselected state.
    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn ensure_in_bounds(&mut self) {
        match self.selected {
            Some(index) if index >= self.visible.len() => {
                self.selected = if self.visible.is_empty() {
                    None
                } else {
                    Some(self.visible.len() - 1)
                };
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordListScreen;
    use crate::models::Record;
    use crate::store::RecordStore;

    fn record(name: &str, region: &str) -> Record {
        Record {
            name: name.to_string(),
            region: region.to_string(),
            ..Record::default()
        }
    }

    fn screen_with(records: &[(&str, &str)]) -> RecordListScreen {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordStore::load(dir.path().join("stores.json")).unwrap();
        for (name, region) in records {
            store.add(record(name, region)).unwrap();
        }
        RecordListScreen::new(store.snapshot())
    }

    #[test]
    fn empty_keyword_shows_the_full_store_in_order() {
        let mut screen = screen_with(&[("Alpha", "Seoul"), ("Beta", "Busan"), ("Gamma", "Daegu")]);
        screen.set_filter(Some("   ".to_string()));

        let names: Vec<&str> = screen
            .visible
            .iter()
            .map(|(_, r)| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert!(screen.filter.is_none());
    }

    #[test]
    fn keyword_filters_by_name_or_region_preserving_order() {
        let mut screen = screen_with(&[
            ("Alpha", "Seoul"),
            ("Beta", "Busan"),
            ("Seoulite", "Incheon"),
        ]);
        screen.set_filter(Some("Seoul".to_string()));

        let names: Vec<&str> = screen
            .visible
            .iter()
            .map(|(_, r)| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Seoulite"]);
    }

    #[test]
    fn repeating_a_search_against_an_unchanged_store_is_idempotent() {
        let mut screen = screen_with(&[("Alpha", "Seoul"), ("Beta", "Busan")]);
        screen.set_filter(Some("Alp".to_string()));
        let first: Vec<_> = screen.visible.clone();

        screen.set_filter(Some("Alp".to_string()));
        assert_eq!(screen.visible, first);
    }

    #[test]
    fn unmatched_keyword_yields_an_empty_view() {
        let mut screen = screen_with(&[("Alpha", "Seoul")]);
        screen.set_filter(Some("Busan".to_string()));
        assert!(screen.visible.is_empty());
        assert_eq!(screen.current(), None);
    }

    #[test]
    fn search_and_snapshot_refresh_reset_the_selection() {
        let mut screen = screen_with(&[("Alpha", "Seoul"), ("Beta", "Busan")]);
        screen.move_selection(1);
        assert!(screen.selected.is_some());

        screen.set_filter(Some("Alpha".to_string()));
        assert_eq!(screen.selected, None);

        screen.move_selection(1);
        let snapshot = screen.records.clone();
        screen.set_records(snapshot);
        assert_eq!(screen.selected, None);
    }

    #[test]
    fn selection_enters_at_the_edges_and_clamps() {
        let mut screen = screen_with(&[("Alpha", "Seoul"), ("Beta", "Busan")]);

        screen.move_selection(1);
        assert_eq!(screen.selected, Some(0));
        screen.move_selection(5);
        assert_eq!(screen.selected, Some(1));

        screen.clear_selection();
        screen.move_selection(-1);
        assert_eq!(screen.selected, Some(1));
        screen.move_selection(-5);
        assert_eq!(screen.selected, Some(0));
    }
}
