//! Expense domain model and change-stream events.
//!
//! # Responsibility
//! - Define the canonical expense record shared by store, reducer and chart.
//! - Define the change notification shape consumed by the reducer.
//!
//! # Invariants
//! - Every expense is identified by a stable, non-empty `ExpenseId`.
//! - `cost` is finite and non-negative.

pub mod change;
pub mod expense;
