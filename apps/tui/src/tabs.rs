use std::future::Future;
use std::sync::Arc;

use crate::domain::{entity_index, find_entity, LEADERBOARD};
use crate::loader::FleetCache;
use crate::render::FleetRenderer;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TabError {
    #[error("unknown entity `{0}`")]
    UnknownEntity(String),
}

/// Identifies one switch request. A ticket whose generation is no longer
/// current is stale and must not render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchTicket {
    pub code: &'static str,
    pub generation: u64,
}

/// What the content pane shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TabView<T> {
    Empty,
    AwaitingData { code: &'static str },
    Rendered { code: &'static str, content: T },
}

impl<T> TabView<T> {
    pub const fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingData { .. })
    }
}

/// Result of [`TabController::switch_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    /// Data was already there; the view is rendered.
    Rendered,
    /// Data is still loading; await [`TabController::readiness`] then call
    /// [`TabController::complete`].
    Pending(SwitchTicket),
}

/// Tracks the active tab and renders it once its roster is available.
pub struct TabController<R: FleetRenderer> {
    cache: Arc<FleetCache>,
    renderer: R,
    active: Option<&'static str>,
    generation: u64,
    view: TabView<R::Output>,
}

impl<R: FleetRenderer> TabController<R> {
    pub const fn new(cache: Arc<FleetCache>, renderer: R) -> Self {
        Self {
            cache,
            renderer,
            active: None,
            generation: 0,
            view: TabView::Empty,
        }
    }

    pub const fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub const fn view(&self) -> &TabView<R::Output> {
        &self.view
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.and_then(entity_index)
    }

    pub fn switch_to(&mut self, code: &str) -> Result<Switch, TabError> {
        let entity = find_entity(code).ok_or_else(|| TabError::UnknownEntity(code.to_string()))?;

        self.active = Some(entity.code);
        self.generation += 1;

        if self.cache.is_resolved(entity.code) {
            self.render(entity.code);
            return Ok(Switch::Rendered);
        }

        tracing::debug!(code = entity.code, "tab awaiting roster");
        self.view = TabView::AwaitingData { code: entity.code };
        Ok(Switch::Pending(SwitchTicket {
            code: entity.code,
            generation: self.generation,
        }))
    }

    /// Switch to the next tab in leaderboard order, wrapping around.
    pub fn next(&mut self) -> Result<Switch, TabError> {
        let index = self
            .active_index()
            .map_or(0, |index| (index + 1) % LEADERBOARD.len());
        self.switch_to(LEADERBOARD[index].code)
    }

    pub fn previous(&mut self) -> Result<Switch, TabError> {
        let index = match self.active_index() {
            Some(0) | None => LEADERBOARD.len() - 1,
            Some(index) => index - 1,
        };
        self.switch_to(LEADERBOARD[index].code)
    }

    /// Resolves once the ticket's roster is loaded or failed. Holds no borrow
    /// on the controller, so it can be spawned.
    pub fn readiness(
        &self,
        ticket: SwitchTicket,
    ) -> impl Future<Output = SwitchTicket> + Send + 'static {
        let cache = Arc::clone(&self.cache);
        async move {
            cache.wait_resolved(ticket.code).await;
            ticket
        }
    }

    /// Finish a pending switch. Returns `false` when the ticket is stale or
    /// its data is still missing; the view is left untouched in that case.
    pub fn complete(&mut self, ticket: &SwitchTicket) -> bool {
        if ticket.generation != self.generation || self.active != Some(ticket.code) {
            tracing::debug!(code = ticket.code, "discarding stale tab render");
            return false;
        }
        if !self.cache.is_resolved(ticket.code) {
            return false;
        }
        self.render(ticket.code);
        true
    }

    fn render(&mut self, code: &'static str) {
        let Some(entity) = find_entity(code) else {
            return;
        };
        let roster = self.cache.roster(code);
        let content = self.renderer.render(entity, &roster);
        self.view = TabView::Rendered { code, content };
    }
}
