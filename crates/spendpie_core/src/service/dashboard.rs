//! Single-threaded dashboard loop.
//!
//! # Responsibility
//! - Poll the change feed, fold each batch, render once per batch.
//! - Route segment clicks to delete requests and form submits to creates.
//!
//! # Invariants
//! - The reducer is the only writer of the displayed collection.
//! - Deletes are not applied locally; they show up through the feed.
//! - Store failures from interactions are logged and swallowed.

use crate::chart::renderer::{ChartFrame, ChartRenderer, DeleteRequest, RenderPass};
use crate::chart::tooltip::Tooltip;
use crate::config::ChartConfig;
use crate::form::{ExpenseForm, SubmitOutcome};
use crate::model::expense::{Expense, ExpenseId};
use crate::reducer::ChangeReducer;
use crate::repo::expense_repo::{ExpenseRepository, RepoResult};
use crate::service::expense_service::ExpenseService;
use crate::sync::change_feed::ChangeFeed;
use log::{error, info};
use std::time::Duration;

/// Feed, reducer and renderer wired to one store.
pub struct ExpenseDashboard<R: ExpenseRepository> {
    service: ExpenseService<R>,
    feed: ChangeFeed,
    reducer: ChangeReducer,
    renderer: ChartRenderer,
}

impl<R: ExpenseRepository> ExpenseDashboard<R> {
    pub fn new(service: ExpenseService<R>, config: &ChartConfig) -> Self {
        Self::with_feed(service, ChangeFeed::new(), config)
    }

    pub fn with_feed(service: ExpenseService<R>, feed: ChangeFeed, config: &ChartConfig) -> Self {
        Self {
            service,
            feed,
            reducer: ChangeReducer::new(),
            renderer: ChartRenderer::new(config),
        }
    }

    /// Pulls one batch from the feed and re-renders if it changed anything.
    ///
    /// The initial snapshot always renders, even when the store is empty.
    pub fn sync(&mut self, now: Duration) -> RepoResult<Option<RenderPass>> {
        let initial = !self.feed.has_snapshot();
        let events = self.feed.poll(self.service.repo())?;
        if events.is_empty() && !initial {
            return Ok(None);
        }

        let summary = self.reducer.apply_batch(events);
        if summary.applied == 0 && !initial {
            return Ok(None);
        }
        Ok(Some(self.renderer.render(self.reducer.expenses(), now)))
    }

    pub fn frame(&mut self, now: Duration) -> ChartFrame {
        self.renderer.frame(now)
    }

    pub fn hover_enter(&mut self, id: &ExpenseId, now: Duration) -> Option<Tooltip> {
        self.renderer.hover_enter(id, now)
    }

    pub fn hover_exit(&mut self, id: &ExpenseId, now: Duration) {
        self.renderer.hover_exit(id, now);
    }

    /// Issues a delete for the clicked segment.
    ///
    /// Returns the request that was sent, or `None` when the click hit
    /// nothing deletable. The segment stays until the feed reports removal.
    pub fn click(&mut self, id: &ExpenseId) -> Option<DeleteRequest> {
        let request = self.renderer.click(id)?;
        match self.service.delete_expense(&request.id) {
            Ok(()) => info!("event=chart_click module=dashboard status=ok id={}", request.id),
            Err(err) => error!(
                "event=chart_click module=dashboard status=error id={} error={err}",
                request.id
            ),
        }
        Some(request)
    }

    pub fn submit(&mut self, form: &mut ExpenseForm) -> SubmitOutcome {
        form.submit(&self.service)
    }

    pub fn expenses(&self) -> &[Expense] {
        self.reducer.expenses()
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn service(&self) -> &ExpenseService<R> {
        &self.service
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}
