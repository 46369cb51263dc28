//! Hover tooltip content.

use crate::model::expense::{Expense, ExpenseId};

pub const DELETE_HINT: &str = "Click to delete";

/// Tooltip for the hovered segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub id: ExpenseId,
    pub name: String,
    pub cost: f64,
    /// Anchor relative to the chart center.
    pub anchor: (f64, f64),
}

impl Tooltip {
    pub fn for_expense(expense: &Expense, anchor: (f64, f64)) -> Self {
        Self {
            id: expense.id.clone(),
            name: expense.name.clone(),
            cost: expense.cost,
            anchor,
        }
    }

    /// `$12`, or `$12.5` for fractional costs.
    pub fn cost_label(&self) -> String {
        if self.cost.fract() == 0.0 {
            format!("${:.0}", self.cost)
        } else {
            format!("${}", self.cost)
        }
    }

    /// HTML fragment shown in the tooltip card.
    pub fn to_html(&self) -> String {
        format!(
            "<p>{}<br/>{}</p><small>{DELETE_HINT}</small>",
            escape_html(&self.name),
            self.cost_label()
        )
    }
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
