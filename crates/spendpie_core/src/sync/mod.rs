//! Real-time change subscription over the expense store.
//!
//! # Responsibility
//! - Deliver ordered batches of `ChangeEvent`s to the reducer.
//!
//! # Invariants
//! - The first batch is a full snapshot expressed as `added` events.
//! - Later batches contain only changes committed after the previous batch.

pub mod change_feed;
