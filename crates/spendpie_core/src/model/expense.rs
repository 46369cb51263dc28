//! Expense domain model.
//!
//! # Responsibility
//! - Define the record rendered as one chart segment.
//! - Validate record fields on construction and deserialization.
//!
//! # Invariants
//! - `id` is opaque, non-empty and never reused for another expense.
//! - `name` is non-empty after trimming.
//! - `cost` is finite and `>= 0`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Wraps an externally assigned identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Field-level validation failures for expense records.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyId,
    EmptyName,
    InvalidCost(f64),
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "expense id cannot be empty"),
            Self::EmptyName => write!(f, "expense name cannot be empty"),
            Self::InvalidCost(cost) => {
                write!(f, "expense cost must be finite and >= 0, got {cost}")
            }
        }
    }
}

impl Error for ExpenseValidationError {}

/// One expense entry: a labelled, non-negative amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseWire")]
pub struct Expense {
    pub id: ExpenseId,
    /// Display label, also the color-scale key.
    pub name: String,
    /// Segment weight.
    pub cost: f64,
}

#[derive(Deserialize)]
struct ExpenseWire {
    id: ExpenseId,
    name: String,
    cost: f64,
}

impl TryFrom<ExpenseWire> for Expense {
    type Error = ExpenseValidationError;

    fn try_from(value: ExpenseWire) -> Result<Self, Self::Error> {
        Self::with_id(value.id, value.name, value.cost)
    }
}

impl Expense {
    /// Creates an expense with a generated id.
    pub fn new(name: impl Into<String>, cost: f64) -> Result<Self, ExpenseValidationError> {
        Self::with_id(ExpenseId::generate(), name, cost)
    }

    /// Creates an expense with a caller-provided id.
    ///
    /// Used by store read paths and change events where identity already exists.
    pub fn with_id(
        id: ExpenseId,
        name: impl Into<String>,
        cost: f64,
    ) -> Result<Self, ExpenseValidationError> {
        let expense = Self {
            id,
            name: name.into(),
            cost,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Checks field invariants.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(ExpenseValidationError::InvalidCost(self.cost));
        }
        Ok(())
    }
}
