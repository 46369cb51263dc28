//! Expense use-case service.
//!
//! # Responsibility
//! - Provide the outbound `create(name, cost)` / `delete(id)` operations.
//! - Delegate persistence to a repository implementation.

use crate::model::expense::{Expense, ExpenseId};
use crate::repo::expense_repo::{ExpenseRepository, RepoResult};
use log::info;

/// Use-case wrapper for expense mutations and reads.
pub struct ExpenseService<R: ExpenseRepository> {
    repo: R,
}

impl<R: ExpenseRepository> ExpenseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Underlying repository, used by the change feed.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates an expense and returns its store-assigned id.
    pub fn create_expense(&self, name: impl Into<String>, cost: f64) -> RepoResult<ExpenseId> {
        let expense = Expense::new(name, cost)?;
        let id = self.repo.create_expense(&expense)?;
        info!("event=expense_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Replaces name and cost of an existing expense.
    pub fn update_expense(
        &self,
        id: &ExpenseId,
        name: impl Into<String>,
        cost: f64,
    ) -> RepoResult<()> {
        let expense = Expense::with_id(id.clone(), name, cost)?;
        self.repo.update_expense(&expense)?;
        info!("event=expense_update module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes an expense by id.
    pub fn delete_expense(&self, id: &ExpenseId) -> RepoResult<()> {
        self.repo.delete_expense(id)?;
        info!("event=expense_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn get_expense(&self, id: &ExpenseId) -> RepoResult<Option<Expense>> {
        self.repo.get_expense(id)
    }

    pub fn list_expenses(&self) -> RepoResult<Vec<Expense>> {
        self.repo.list_expenses()
    }
}
