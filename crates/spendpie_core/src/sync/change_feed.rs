//! Cursor-based change feed.
//!
//! The feed reads the store's append-only change log. It never re-delivers
//! an entry, and it may re-deliver snapshot rows that race with the initial
//! read; the reducer's duplicate-add and unknown-remove policies absorb that.

use crate::model::change::ChangeEvent;
use crate::repo::expense_repo::{ExpenseRepository, RepoResult};
use log::debug;

/// Subscription state for one consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFeed {
    cursor: Option<i64>,
    batch_limit: Option<u32>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps incremental batches at `limit` entries; `0` means unlimited.
    pub fn with_batch_limit(limit: Option<u32>) -> Self {
        Self {
            cursor: None,
            batch_limit: limit.filter(|value| *value > 0),
        }
    }

    /// Change-log position of the last delivered entry.
    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    pub fn has_snapshot(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns the next batch; empty when nothing changed.
    pub fn poll<R: ExpenseRepository>(&mut self, repo: &R) -> RepoResult<Vec<ChangeEvent>> {
        let Some(cursor) = self.cursor else {
            // Read the position first so nothing committed mid-snapshot is lost.
            let seq = repo.latest_change_seq()?;
            let events: Vec<ChangeEvent> = repo
                .list_expenses()?
                .into_iter()
                .map(ChangeEvent::added)
                .collect();
            self.cursor = Some(seq);
            debug!(
                "event=feed_poll module=sync status=snapshot size={} cursor={seq}",
                events.len()
            );
            return Ok(events);
        };

        let records = repo.changes_since(cursor, self.batch_limit)?;
        if let Some(last) = records.last() {
            self.cursor = Some(last.seq);
        }
        let events: Vec<ChangeEvent> = records.into_iter().map(|record| record.event).collect();
        if !events.is_empty() {
            debug!(
                "event=feed_poll module=sync status=ok size={} cursor={}",
                events.len(),
                self.cursor.unwrap_or(cursor)
            );
        }
        Ok(events)
    }
}
