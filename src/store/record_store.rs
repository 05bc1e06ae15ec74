use std::collections::vec_deque::{self, VecDeque};

use log::debug;

use super::sort::{exchange_sort_by_name, exchange_sort_by_priority};
use crate::models::Record;

/// Ordered, exclusively owned collection of backpack records.
///
/// New records go to the front. The order only changes again when one of the
/// sorts runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordStore {
    records: VecDeque<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `record` to the front of the store. Never fails; running out of
    /// memory aborts the process.
    pub fn insert(&mut self, record: Record) {
        debug!(
            "event=record_insert module=store priority={} len={}",
            record.priority,
            self.records.len() + 1
        );
        self.records.push_front(record);
    }

    /// Remove the first record whose name matches `name` byte for byte.
    ///
    /// Returns `None` when nothing matches, leaving the store untouched.
    pub fn remove(&mut self, name: &str) -> Option<Record> {
        let index = self.records.iter().position(|record| record.name == name);
        let removed = index.and_then(|idx| self.records.remove(idx));
        debug!(
            "event=record_remove module=store found={} len={}",
            removed.is_some(),
            self.records.len()
        );
        removed
    }

    /// Iterate over every record in current store order.
    pub fn list(&self) -> vec_deque::Iter<'_, Record> {
        self.records.iter()
    }

    /// Reorder whole records by name, byte-wise ascending.
    pub fn sort_by_name(&mut self) {
        let passes = exchange_sort_by_name(&mut self.records);
        debug!(
            "event=store_sort module=store key=name passes={passes} len={}",
            self.records.len()
        );
    }

    /// Reorder priority values ascending across positions.
    ///
    /// Only the priority numbers move. Names and categories keep their
    /// positions, so after this call a priority may sit next to a name it did
    /// not start with.
    pub fn sort_by_priority(&mut self) {
        let passes = exchange_sort_by_priority(&mut self.records);
        debug!(
            "event=store_sort module=store key=priority passes={passes} len={}",
            self.records.len()
        );
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Drop every record, returning how many were released.
    pub fn clear(&mut self) -> usize {
        let released = self.records.len();
        self.records.clear();
        released
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = vec_deque::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.list()
    }
}
