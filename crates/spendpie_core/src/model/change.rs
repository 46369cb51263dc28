//! Change-stream notifications.
//!
//! A change event carries the full record after the change. `Removed`
//! events carry the last known record so consumers can key on `id`.

use crate::model::expense::{Expense, ExpenseId};
use serde::{Deserialize, Serialize};

/// Kind of mutation observed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "added" => Some(Self::Added),
            "modified" => Some(Self::Modified),
            "removed" => Some(Self::Removed),
            _ => None,
        }
    }
}

/// One ordered notification from the change stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(rename = "doc")]
    pub expense: Expense,
}

impl ChangeEvent {
    pub fn added(expense: Expense) -> Self {
        Self {
            kind: ChangeKind::Added,
            expense,
        }
    }

    pub fn modified(expense: Expense) -> Self {
        Self {
            kind: ChangeKind::Modified,
            expense,
        }
    }

    pub fn removed(expense: Expense) -> Self {
        Self {
            kind: ChangeKind::Removed,
            expense,
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.expense.id
    }
}
