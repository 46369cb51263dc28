//! Core of SpendPie: a live donut chart over an expense store.
//!
//! Data flows one way: store change log → [`ChangeFeed`] → [`ChangeReducer`]
//! → [`ChartRenderer`]. User interactions flow back out as store writes.

pub mod chart;
pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod reducer;
pub mod repo;
pub mod service;
pub mod sync;

pub use chart::color::{OrdinalColorScale, Rgb, SET2};
pub use chart::pie::{pie_layout, PieSlice, Span};
pub use chart::renderer::{
    ChartFrame, ChartRenderer, DeleteRequest, RenderPass, SegmentFrame, SegmentPhase,
};
pub use config::{ChartConfig, ConfigError, SpendPieConfig};
pub use form::{ExpenseForm, SubmitOutcome, MISSING_VALUES_MESSAGE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::change::{ChangeEvent, ChangeKind};
pub use model::expense::{Expense, ExpenseId, ExpenseValidationError};
pub use reducer::{ApplyOutcome, BatchSummary, ChangeReducer};
pub use repo::expense_repo::{
    ChangeRecord, ExpenseRepository, RepoError, RepoResult, SqliteExpenseRepository,
};
pub use service::dashboard::ExpenseDashboard;
pub use service::expense_service::ExpenseService;
pub use sync::change_feed::ChangeFeed;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
