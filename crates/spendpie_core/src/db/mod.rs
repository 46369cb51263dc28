//! Expense store bootstrap: connection setup and schema upgrades.
//!
//! The store refuses to hand out a connection until its schema matches
//! [`migrations::latest_version`]. A file written by a newer build is left
//! untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the expense store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// One upgrade step failed; the file keeps its previous version.
    Migration { version: u32, source: rusqlite::Error },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "expense store: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "expense store is at schema {found}, this build reads up to {supported}"
            ),
            Self::Migration { version, source } => {
                write!(f, "expense store upgrade to schema {version} failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
