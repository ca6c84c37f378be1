//! In-memory record collections.
//!
//! The store never touches the disk. Every mutation returns a [`Change`] and
//! callers persist and re-render only when [`Change::needs_refresh`] is set.

use crate::models::{MatchRecord, ResultRecord};
use serde::Serialize;

/// Outcome of a mutation: how many records were added, removed or replaced.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Change {
    pub affected: usize,
}

impl Change {
    pub fn needs_refresh(self) -> bool {
        self.affected > 0
    }

    pub fn merge(self, other: Change) -> Change {
        Change {
            affected: self.affected + other.affected,
        }
    }
}

/// Ordered collection keyed by nothing but insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn all(&self) -> &[T] {
        &self.rows
    }

    pub fn append(&mut self, row: T) -> Change {
        self.rows.push(row);
        Change { affected: 1 }
    }

    /// Drops every row matching `predicate`, keeping the order of the rest.
    pub fn remove(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Change {
        let before = self.rows.len();
        self.rows.retain(|row| !predicate(row));
        Change {
            affected: before - self.rows.len(),
        }
    }

    /// Swaps the whole table; affected is the larger of the old and new row counts.
    pub fn replace_all(&mut self, rows: Vec<T>) -> Change {
        let old = std::mem::replace(&mut self.rows, rows);
        Change {
            affected: old.len().max(self.rows.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    matches: Table<MatchRecord>,
    results: Table<ResultRecord>,
}

impl RecordStore {
    pub fn new(matches: Vec<MatchRecord>, results: Vec<ResultRecord>) -> Self {
        Self {
            matches: Table::new(matches),
            results: Table::new(results),
        }
    }

    pub fn all_matches(&self) -> &[MatchRecord] {
        self.matches.all()
    }

    pub fn all_results(&self) -> &[ResultRecord] {
        self.results.all()
    }

    pub fn append_match(&mut self, record: MatchRecord) -> Change {
        self.matches.append(record)
    }

    pub fn append_result(&mut self, record: ResultRecord) -> Change {
        self.results.append(record)
    }

    pub fn remove_matches(&mut self, predicate: impl FnMut(&MatchRecord) -> bool) -> Change {
        self.matches.remove(predicate)
    }

    pub fn remove_results(&mut self, predicate: impl FnMut(&ResultRecord) -> bool) -> Change {
        self.results.remove(predicate)
    }

    pub fn replace_all_matches(&mut self, records: Vec<MatchRecord>) -> Change {
        self.matches.replace_all(records)
    }

    pub fn replace_all_results(&mut self, records: Vec<ResultRecord>) -> Change {
        self.results.replace_all(records)
    }
}
