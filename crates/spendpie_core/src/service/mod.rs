//! Use-case services over the expense store.
//!
//! # Responsibility
//! - Expose create/update/delete entry points used by the form and chart.
//! - Orchestrate the feed → reducer → renderer loop.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Chart state only changes in response to change-feed batches.

pub mod dashboard;
pub mod expense_service;
