//! Change-stream reducer.
//!
//! # Responsibility
//! - Own the in-memory expense collection shown by the chart.
//! - Fold ordered `ChangeEvent`s into that collection.
//!
//! # Invariants
//! - At most one expense per id.
//! - Only `apply`/`apply_batch` mutate the collection.
//! - Insertion order is kept and drives the pie layout order.
//!
//! # Policy
//! - Duplicate `added`: replace fields in place, keep position, warn.
//! - `modified` for an unknown id: no-op, warn.
//! - `removed` for an unknown id: no-op.

use crate::model::change::{ChangeEvent, ChangeKind};
use crate::model::expense::{Expense, ExpenseId};
use log::{debug, warn};

/// Result of folding one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Inserted,
    /// Duplicate add overwrote an existing record.
    Replaced,
    Updated,
    Removed,
    /// Event referenced an id in a state where it has no effect.
    Ignored,
}

/// Counters for one folded batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub applied: usize,
    pub ignored: usize,
}

impl BatchSummary {
    pub fn is_empty(&self) -> bool {
        self.applied == 0 && self.ignored == 0
    }
}

/// Sole owner of the current expense collection.
#[derive(Debug, Default, Clone)]
pub struct ChangeReducer {
    expenses: Vec<Expense>,
}

impl ChangeReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Folds one event into the collection.
    pub fn apply(&mut self, event: ChangeEvent) -> ApplyOutcome {
        let ChangeEvent { kind, expense } = event;
        let position = self.position_of(&expense.id);

        match (kind, position) {
            (ChangeKind::Added, None) => {
                self.expenses.push(expense);
                ApplyOutcome::Inserted
            }
            (ChangeKind::Added, Some(index)) => {
                warn!(
                    "event=reducer_apply module=reducer status=duplicate kind=added id={}",
                    expense.id
                );
                self.expenses[index] = expense;
                ApplyOutcome::Replaced
            }
            (ChangeKind::Modified, Some(index)) => {
                self.expenses[index] = expense;
                ApplyOutcome::Updated
            }
            (ChangeKind::Modified, None) => {
                warn!(
                    "event=reducer_apply module=reducer status=inconsistent kind=modified id={}",
                    expense.id
                );
                ApplyOutcome::Ignored
            }
            (ChangeKind::Removed, Some(_)) => {
                self.expenses.retain(|item| item.id != expense.id);
                ApplyOutcome::Removed
            }
            (ChangeKind::Removed, None) => {
                debug!(
                    "event=reducer_apply module=reducer status=noop kind=removed id={}",
                    expense.id
                );
                ApplyOutcome::Ignored
            }
        }
    }

    /// Folds a whole batch in order.
    ///
    /// Callers re-render once after this returns, never per event.
    pub fn apply_batch(&mut self, events: impl IntoIterator<Item = ChangeEvent>) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for event in events {
            match self.apply(event) {
                ApplyOutcome::Ignored => summary.ignored += 1,
                _ => summary.applied += 1,
            }
        }
        debug!(
            "event=reducer_batch module=reducer status=ok applied={} ignored={} size={}",
            summary.applied,
            summary.ignored,
            self.expenses.len()
        );
        summary
    }

    fn position_of(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|expense| &expense.id == id)
    }
}
