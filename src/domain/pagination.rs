//! Client-side mirror of a paginated collection.
//!
//! Fetched pages overwrite the state wholesale: when two fetches for the same
//! list race, whichever resolves last wins. Single-record mutations are
//! applied as explicit patches once the server has confirmed them.

use crate::models::{Identified, PageMeta, Paginated, RecordId};

/// What the view should do after a row was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterRemoval {
    /// The current page still has rows (or is the first page)
    Stay,
    /// The page emptied out; fetch this page instead
    Refetch { page: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    meta: PageMeta,
    loaded: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
            loaded: false,
        }
    }
}

impl<T: Identified> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn meta(&self) -> PageMeta {
        self.meta
    }

    pub fn current_page(&self) -> u32 {
        self.meta.current_page
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace everything with a freshly fetched page.
    pub fn apply_page(&mut self, page: Paginated<T>) {
        self.meta = page.meta();
        self.items = page.data;
        self.loaded = true;
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Swap in the server's version of an updated record.
    /// Returns false when the record is not on the current page.
    pub fn replace(&mut self, record: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Show a newly created record at the top of the list.
    pub fn prepend(&mut self, record: T) {
        self.items.retain(|item| item.id() != record.id());
        self.items.insert(0, record);
        self.meta.total += 1;
    }

    /// Drop a deleted record. When that empties a page past the first,
    /// step back one page.
    pub fn remove(&mut self, id: RecordId) -> AfterRemoval {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() < before {
            self.meta.total = self.meta.total.saturating_sub(1);
        }

        if self.items.is_empty() && self.meta.current_page > 1 {
            let page = self.meta.current_page - 1;
            self.meta.current_page = page;
            self.meta.last_page = page;
            AfterRemoval::Refetch { page }
        } else {
            AfterRemoval::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: RecordId,
        label: &'static str,
    }

    impl Identified for Row {
        fn id(&self) -> RecordId {
            self.id
        }
    }

    fn page(rows: Vec<Row>, current: u32, last: u32, total: u64) -> Paginated<Row> {
        Paginated {
            data: rows,
            current_page: current,
            last_page: last,
            total,
        }
    }

    #[test]
    fn test_removing_last_row_of_later_page_steps_back() {
        let mut list = ListState::new();
        list.apply_page(page(vec![Row { id: 21, label: "last" }], 3, 3, 21));

        assert_eq!(list.remove(21), AfterRemoval::Refetch { page: 2 });
        assert_eq!(list.current_page(), 2);
        assert_eq!(list.meta().total, 20);
    }

    #[test]
    fn test_removing_last_row_of_first_page_stays() {
        let mut list = ListState::new();
        list.apply_page(page(vec![Row { id: 1, label: "only" }], 1, 1, 1));

        assert_eq!(list.remove(1), AfterRemoval::Stay);
        assert!(list.is_empty());
        assert_eq!(list.meta().total, 0);
    }

    #[test]
    fn test_removing_one_of_many_stays() {
        let mut list = ListState::new();
        list.apply_page(page(
            vec![Row { id: 11, label: "a" }, Row { id: 12, label: "b" }],
            2,
            2,
            12,
        ));
        assert_eq!(list.remove(11), AfterRemoval::Stay);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn test_last_applied_page_wins() {
        let mut list = ListState::new();
        assert!(!list.is_loaded());
        list.apply_page(page(vec![Row { id: 1, label: "fresh" }], 1, 2, 11));
        assert!(list.is_loaded());
        list.apply_page(page(vec![Row { id: 2, label: "stale" }], 2, 2, 11));
        assert_eq!(list.items()[0].label, "stale");
        assert_eq!(list.current_page(), 2);
        assert!(list.meta().has_previous());
        assert!(!list.meta().has_next());
    }

    #[test]
    fn test_replace_and_prepend() {
        let mut list = ListState::new();
        list.apply_page(page(vec![Row { id: 1, label: "old" }], 1, 1, 1));

        assert!(list.replace(Row { id: 1, label: "new" }));
        assert!(!list.replace(Row { id: 9, label: "elsewhere" }));
        assert_eq!(list.get(1).unwrap().label, "new");

        list.prepend(Row { id: 2, label: "created" });
        assert_eq!(list.items()[0].id, 2);
        assert_eq!(list.meta().total, 2);
    }
}
