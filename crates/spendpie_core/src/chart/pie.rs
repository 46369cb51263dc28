//! Proportional pie layout.
//!
//! Angles are radians, `0` at twelve o'clock, increasing clockwise, and the
//! full circle is `[0, TAU]`.

use crate::model::expense::Expense;
use std::f64::consts::TAU;

/// Angular extent of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Zero-width span sitting at `angle`.
    pub const fn collapsed_at(angle: f64) -> Self {
        Self::new(angle, angle)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Fraction of the full circle covered by this span.
    pub fn fraction(&self) -> f64 {
        self.width() / TAU
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.start + (other.start - self.start) * t,
            self.end + (other.end - self.end) * t,
        )
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// One laid-out expense.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub expense: Expense,
    pub span: Span,
}

/// Partitions the full circle across `expenses` weighted by `cost`.
///
/// Collection order is kept; no sorting. When the total cost is zero every
/// slice collapses at angle `0`.
///
/// Costs are divided by the largest one before summing, so the total stays
/// finite for any finite inputs.
pub fn pie_layout(expenses: &[Expense]) -> Vec<PieSlice> {
    let max = expenses
        .iter()
        .map(|expense| expense.cost)
        .fold(0.0_f64, f64::max);
    let weight = |cost: f64| if max > 0.0 { cost / max } else { 0.0 };
    let total: f64 = expenses.iter().map(|expense| weight(expense.cost)).sum();
    let scale = if total > 0.0 { TAU / total } else { 0.0 };

    let mut cursor = 0.0;
    expenses
        .iter()
        .enumerate()
        .map(|(index, expense)| {
            let start = cursor;
            // Pin the last boundary so rounding never leaves a sliver.
            let end = if total > 0.0 && index + 1 == expenses.len() {
                TAU
            } else {
                start + weight(expense.cost) * scale
            };
            cursor = end;
            PieSlice {
                expense: expense.clone(),
                span: Span::new(start, end),
            }
        })
        .collect()
}
