//! Page controller.
//!
//! Owns the session state and the catalog client. User events are applied on
//! the caller's task; fetches run on spawned tasks and report back over a
//! channel, tagged with the token they were issued under.

use crate::core::session::{DetailsTicket, RequestToken, SearchTicket, SessionState};
use crate::models::catalog::{DetailRecord, MediaKind, SearchPage};
use crate::services::catalog::CatalogApi;
use crate::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// User actions on the explorer page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// Query text edited.
    Type(String),
    /// Query text cleared.
    Clear,
    /// Search button or Enter.
    Submit,
    SetKind(Option<MediaKind>),
    /// Raw year filter input.
    SetYear(String),
    Page(u32),
    NextPage,
    PrevPage,
    /// Card chosen, carrying the item id.
    Select(String),
    /// A card's poster failed to load.
    PosterFailed(String),
    /// Overlay dismissed.
    Close,
}

/// A finished fetch.
#[derive(Debug)]
pub enum Completion {
    Search {
        token: RequestToken,
        result: Result<SearchPage>,
    },
    Details {
        token: RequestToken,
        id: String,
        result: Result<DetailRecord>,
    },
}

/// Explorer page controller.
pub struct PageController<C> {
    client: Arc<C>,
    state: SessionState,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<C> PageController<C>
where
    C: CatalogApi + Sync + 'static,
{
    /// Create a controller with a fresh session.
    pub fn new(client: C) -> Self {
        Self::with_shared(Arc::new(client))
    }

    /// Create a controller around a client shared with the caller.
    pub fn with_shared(client: Arc<C>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = SessionState::new(client.has_credential());
        Self {
            client,
            state,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply a user event, spawning a fetch when the transition calls for one.
    pub fn handle(&mut self, event: UserEvent) {
        tracing::debug!("Event: {:?}", event);
        match event {
            UserEvent::Type(text) => self.state.set_text(text),
            UserEvent::Clear => self.state.clear_text(),
            UserEvent::Submit => {
                let ticket = self.state.submit();
                self.spawn_search(ticket);
            }
            UserEvent::SetKind(kind) => {
                let ticket = self.state.set_kind(kind);
                self.spawn_search(ticket);
            }
            UserEvent::SetYear(raw) => {
                let ticket = self.state.set_year_input(&raw);
                self.spawn_search(ticket);
            }
            UserEvent::Page(page) => {
                let ticket = self.state.set_page(page);
                self.spawn_search(ticket);
            }
            UserEvent::NextPage => {
                let ticket = self.state.next_page();
                self.spawn_search(ticket);
            }
            UserEvent::PrevPage => {
                let ticket = self.state.prev_page();
                self.spawn_search(ticket);
            }
            UserEvent::Select(id) => {
                let ticket = self.state.select(id);
                self.spawn_details(ticket);
            }
            UserEvent::PosterFailed(id) => self.state.mark_poster_failed(id),
            UserEvent::Close => self.state.close_details(),
        }
    }

    /// Apply a finished fetch. Returns `false` if it was stale and dropped.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Search { token, result } => self.state.complete_search(token, result),
            Completion::Details { token, id, result } => {
                self.state.complete_details(token, &id, result)
            }
        }
    }

    /// Wait for the next finished fetch and apply it.
    ///
    /// Returns whether it changed the state. The controller keeps a sender
    /// alive, so this only resolves when a fetch completes.
    pub async fn next_completion(&mut self) -> Option<bool> {
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    fn spawn_search(&self, ticket: Option<SearchTicket>) {
        let Some(SearchTicket { token, query }) = ticket else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.search(&query).await;
            if tx.send(Completion::Search { token, result }).is_err() {
                tracing::debug!("Controller gone, discarding search result");
            }
        });
    }

    fn spawn_details(&self, ticket: Option<DetailsTicket>) {
        let Some(DetailsTicket { token, id }) = ticket else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_details(&id).await;
            if tx.send(Completion::Details { token, id, result }).is_err() {
                tracing::debug!("Controller gone, discarding details result");
            }
        });
    }
}
