//! Add-expense form.
//!
//! # Responsibility
//! - Hold raw `name` / `cost` input text and the inline error message.
//! - Validate input and issue one create request per accepted submission.
//!
//! # Invariants
//! - A rejected submission never reaches the store.
//! - The error message persists until a submission is accepted.
//! - Fields are cleared only after the store confirms the create.

use crate::model::expense::ExpenseId;
use crate::repo::expense_repo::ExpenseRepository;
use crate::service::expense_service::ExpenseService;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MISSING_VALUES_MESSAGE: &str = "Please enter values";

static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer regex"));

/// Accepted form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub name: String,
    pub cost: i64,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ExpenseId),
    /// Input incomplete; the error message is now shown.
    Rejected,
    /// The store refused or failed the create; input is kept.
    Failed(String),
}

/// Two-field form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub name: String,
    pub cost: String,
    error: Option<String>,
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(name: impl Into<String>, cost: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: cost.into(),
            error: None,
        }
    }

    /// Inline error text; empty when nothing is wrong.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }

    /// Parses the current fields without side effects.
    ///
    /// `cost` reads a leading integer the way a lenient integer parser does:
    /// `" 12abc"` is `12`, `"abc"` is absent. Negative amounts are refused.
    pub fn validate(&self) -> Option<ExpenseInput> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let cost = parse_leading_integer(&self.cost)?;
        if cost < 0 {
            return None;
        }
        Some(ExpenseInput {
            name: name.to_string(),
            cost,
        })
    }

    /// Validates and, when complete, sends one create request.
    pub fn submit<R: ExpenseRepository>(&mut self, service: &ExpenseService<R>) -> SubmitOutcome {
        let Some(input) = self.validate() else {
            self.error = Some(MISSING_VALUES_MESSAGE.to_string());
            info!("event=form_submit module=form status=rejected");
            return SubmitOutcome::Rejected;
        };

        match service.create_expense(input.name, input.cost as f64) {
            Ok(id) => {
                self.name.clear();
                self.cost.clear();
                self.error = None;
                SubmitOutcome::Created(id)
            }
            Err(err) => {
                error!("event=form_submit module=form status=error error={err}");
                SubmitOutcome::Failed(err.to_string())
            }
        }
    }
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let captures = LEADING_INTEGER_RE.captures(raw)?;
    captures.get(1)?.as_str().parse().ok()
}
