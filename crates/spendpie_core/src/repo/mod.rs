//! Repository layer for expense persistence and the change log.
//!
//! # Responsibility
//! - Define the data access contract used by services and the change feed.
//! - Keep SQL details out of service and chart code.
//!
//! # Invariants
//! - Write paths call `Expense::validate()` before touching storage.
//! - Every successful mutation appends exactly one change-log entry in the
//!   same transaction.

pub mod expense_repo;
