//! Expense repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/delete/list over the `expenses` table.
//! - Record every mutation in the append-only `expense_changes` log.
//!
//! # Invariants
//! - Change-log `seq` values are strictly increasing in commit order.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::change::{ChangeEvent, ChangeKind};
use crate::model::expense::{Expense, ExpenseId, ExpenseValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EXPENSE_SELECT_SQL: &str = "SELECT id, name, cost FROM expenses";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for expense persistence and change-log reads.
#[derive(Debug)]
pub enum RepoError {
    Validation(ExpenseValidationError),
    Db(DbError),
    NotFound(ExpenseId),
    AlreadyExists(ExpenseId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "expense not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "expense already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted expense data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExpenseValidationError> for RepoError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One change-log entry with its position in the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub seq: i64,
    pub event: ChangeEvent,
}

/// Repository interface for the expense collection and its change log.
pub trait ExpenseRepository {
    fn create_expense(&self, expense: &Expense) -> RepoResult<ExpenseId>;
    fn update_expense(&self, expense: &Expense) -> RepoResult<()>;
    /// Hard-deletes one expense and returns the removed record.
    fn delete_expense(&self, id: &ExpenseId) -> RepoResult<Expense>;
    fn get_expense(&self, id: &ExpenseId) -> RepoResult<Option<Expense>>;
    /// Lists live expenses in insertion order.
    fn list_expenses(&self) -> RepoResult<Vec<Expense>>;
    /// Highest committed change-log position, `0` when the log is empty.
    fn latest_change_seq(&self) -> RepoResult<i64>;
    /// Change-log entries with `seq > after`, oldest first.
    fn changes_since(&self, after: i64, limit: Option<u32>) -> RepoResult<Vec<ChangeRecord>>;
}

/// SQLite-backed expense repository.
pub struct SqliteExpenseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExpenseRepository<'conn> {
    /// Wraps a connection whose schema is already migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if version != latest_version() {
            return Err(RepoError::InvalidData(format!(
                "schema version {version} does not match expected {}",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }

    fn record_change(&self, kind: ChangeKind, expense: &Expense) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO expense_changes (expense_id, kind, name, cost)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                expense.id.as_str(),
                kind.as_str(),
                expense.name.as_str(),
                expense.cost
            ],
        )?;
        Ok(())
    }
}

impl ExpenseRepository for SqliteExpenseRepository<'_> {
    fn create_expense(&self, expense: &Expense) -> RepoResult<ExpenseId> {
        expense.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO expenses (id, name, cost) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO NOTHING;",
            params![expense.id.as_str(), expense.name.as_str(), expense.cost],
        )?;
        if inserted == 0 {
            return Err(RepoError::AlreadyExists(expense.id.clone()));
        }
        self.record_change(ChangeKind::Added, expense)?;
        tx.commit()?;

        Ok(expense.id.clone())
    }

    fn update_expense(&self, expense: &Expense) -> RepoResult<()> {
        expense.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE expenses
             SET name = ?1,
                 cost = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![expense.name.as_str(), expense.cost, expense.id.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(expense.id.clone()));
        }
        self.record_change(ChangeKind::Modified, expense)?;
        tx.commit()?;

        Ok(())
    }

    fn delete_expense(&self, id: &ExpenseId) -> RepoResult<Expense> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(existing) = self.get_expense(id)? else {
            return Err(RepoError::NotFound(id.clone()));
        };
        tx.execute("DELETE FROM expenses WHERE id = ?1;", [id.as_str()])?;
        self.record_change(ChangeKind::Removed, &existing)?;
        tx.commit()?;

        Ok(existing)
    }

    fn get_expense(&self, id: &ExpenseId) -> RepoResult<Option<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPENSE_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id.as_str()], |row| Ok(parse_expense_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_expenses(&self) -> RepoResult<Vec<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPENSE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut expenses = Vec::new();
        while let Some(row) = rows.next()? {
            expenses.push(parse_expense_row(row)?);
        }
        Ok(expenses)
    }

    fn latest_change_seq(&self) -> RepoResult<i64> {
        let seq = self.conn.query_row(
            "SELECT COALESCE(MAX(seq), 0) FROM expense_changes;",
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(seq)
    }

    fn changes_since(&self, after: i64, limit: Option<u32>) -> RepoResult<Vec<ChangeRecord>> {
        let limit = limit.map_or(-1, i64::from);
        let mut stmt = self.conn.prepare(
            "SELECT seq, expense_id, kind, name, cost
             FROM expense_changes
             WHERE seq > ?1
             ORDER BY seq ASC
             LIMIT ?2;",
        )?;
        let mut rows = stmt.query(params![after, limit])?;
        let mut changes = Vec::new();
        while let Some(row) = rows.next()? {
            changes.push(parse_change_row(row)?);
        }
        Ok(changes)
    }
}

fn parse_expense_row(row: &Row<'_>) -> RepoResult<Expense> {
    let id: String = row.get("id")?;
    let name: String = row.get("name")?;
    let expense = Expense::with_id(ExpenseId::new(id), name, row.get("cost")?)
        .map_err(|err| RepoError::InvalidData(format!("expenses row: {err}")))?;
    Ok(expense)
}

fn parse_change_row(row: &Row<'_>) -> RepoResult<ChangeRecord> {
    let seq: i64 = row.get("seq")?;
    let kind_text: String = row.get("kind")?;
    let kind = ChangeKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid change kind `{kind_text}` in expense_changes.kind (seq {seq})"
        ))
    })?;
    let expense = Expense::with_id(
        ExpenseId::new(row.get::<_, String>("expense_id")?),
        row.get::<_, String>("name")?,
        row.get("cost")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("expense_changes seq {seq}: {err}")))?;

    Ok(ChangeRecord {
        seq,
        event: ChangeEvent { kind, expense },
    })
}
