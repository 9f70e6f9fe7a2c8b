//! Search session state machine.
//!
//! `SessionState` is the single mutable record behind the explorer page. User
//! actions return a ticket when they warrant a fetch; the caller runs the
//! fetch and hands the outcome back with the ticket's token. Completions whose
//! token is no longer pending are dropped, so a slow response can never
//! overwrite a newer one.

use crate::core::input::sanitize_year_input;
use crate::models::catalog::{DetailRecord, MediaKind, Query, SearchPage, SearchResultItem};
use crate::Result;
use std::collections::HashSet;

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// A search the caller must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: RequestToken,
    pub query: Query,
}

/// A detail lookup the caller must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsTicket {
    pub token: RequestToken,
    pub id: String,
}

/// Search phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet.
    Idle,
    /// A search is in flight.
    Searching,
    /// A result set (possibly empty) is on display.
    Results,
}

/// Main content region.
#[derive(Debug, PartialEq, Eq)]
pub enum Content<'a> {
    Loading,
    Empty { has_searched: bool },
    Results(&'a [SearchResultItem]),
}

/// Details overlay region.
#[derive(Debug, PartialEq, Eq)]
pub enum Overlay<'a> {
    Closed,
    Loading { id: &'a str },
    Open(&'a DetailRecord),
}

/// Page session state.
#[derive(Debug)]
pub struct SessionState {
    query: Query,
    has_credential: bool,
    items: Vec<SearchResultItem>,
    total_pages: u32,
    is_searching: bool,
    has_searched: bool,
    selected: Option<String>,
    details: Option<DetailRecord>,
    is_loading_details: bool,
    poster_failures: HashSet<String>,
    next_token: u64,
    pending_search: Option<RequestToken>,
    pending_details: Option<RequestToken>,
    last_failure: Option<String>,
}

impl SessionState {
    /// Fresh session: empty query, page 1.
    pub fn new(has_credential: bool) -> Self {
        Self {
            query: Query::default(),
            has_credential,
            items: Vec::new(),
            total_pages: 1,
            is_searching: false,
            has_searched: false,
            selected: None,
            details: None,
            is_loading_details: false,
            poster_failures: HashSet::new(),
            next_token: 0,
            pending_search: None,
            pending_details: None,
            last_failure: None,
        }
    }

    // ========== Accessors ==========

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn has_credential(&self) -> bool {
        self.has_credential
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn details(&self) -> Option<&DetailRecord> {
        self.details.as_ref()
    }

    pub fn is_loading_details(&self) -> bool {
        self.is_loading_details
    }

    /// Last failure swallowed by the session, for logging and tests only.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Whether any fetch the session still cares about is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_searching || self.is_loading_details
    }

    pub fn phase(&self) -> Phase {
        if self.is_searching {
            Phase::Searching
        } else if self.has_searched {
            Phase::Results
        } else {
            Phase::Idle
        }
    }

    /// What the main region shows.
    pub fn content(&self) -> Content<'_> {
        if self.is_searching {
            Content::Loading
        } else if self.items.is_empty() {
            Content::Empty {
                has_searched: self.has_searched,
            }
        } else {
            Content::Results(&self.items)
        }
    }

    /// What the overlay shows.
    pub fn overlay(&self) -> Overlay<'_> {
        match (self.selected.as_deref(), &self.details) {
            (Some(id), _) if self.is_loading_details => Overlay::Loading { id },
            (Some(_), Some(record)) => Overlay::Open(record),
            _ => Overlay::Closed,
        }
    }

    /// Pagination is shown for multi-page results when nothing is loading.
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1 && !self.is_searching
    }

    pub fn has_previous_page(&self) -> bool {
        self.query.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.query.page < self.total_pages
    }

    /// Whether the poster of `id` failed to load for the current results.
    pub fn poster_failed(&self, id: &str) -> bool {
        self.poster_failures.contains(id)
    }

    // ========== Search transitions ==========

    /// Update the query text. Never fetches.
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.query.text = text.into();
    }

    /// Empty the query text. Never fetches; results stay on display.
    pub fn clear_text(&mut self) {
        self.query.text.clear();
    }

    /// Explicit submission. Resets to page 1.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        if !self.can_search() {
            tracing::debug!("Ignoring submit: empty query or no credential");
            return None;
        }
        self.query.page = 1;
        Some(self.begin_search())
    }

    /// Change the type filter, re-fetching the current page when a query
    /// exists.
    pub fn set_kind(&mut self, kind: Option<MediaKind>) -> Option<SearchTicket> {
        let kind = kind.filter(|k| k.as_filter().is_some());
        if self.query.kind == kind {
            return None;
        }
        self.query.kind = kind;
        self.refetch_current_page()
    }

    /// Change the year filter from raw input, re-fetching the current page
    /// when a query exists. Non-digits are stripped and the value is cut to 4 characters.
    pub fn set_year_input(&mut self, raw: &str) -> Option<SearchTicket> {
        let year = Some(sanitize_year_input(raw)).filter(|y| !y.is_empty());
        if self.query.year == year {
            return None;
        }
        self.query.year = year;
        self.refetch_current_page()
    }

    /// Change page. Page 0, the current page and forward moves past the
    /// last page are ignored. Moving back is always allowed, since a filter
    /// change can leave the current page beyond `total_pages`.
    pub fn set_page(&mut self, page: u32) -> Option<SearchTicket> {
        if page == 0 || page == self.query.page {
            return None;
        }
        if page > self.total_pages && page > self.query.page {
            return None;
        }
        self.query.page = page;
        if self.can_search() {
            Some(self.begin_search())
        } else {
            None
        }
    }

    pub fn next_page(&mut self) -> Option<SearchTicket> {
        self.set_page(self.query.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<SearchTicket> {
        self.set_page(self.query.page.saturating_sub(1))
    }

    /// Apply a search outcome. Returns `false` when the ticket is stale.
    pub fn complete_search(&mut self, token: RequestToken, outcome: Result<SearchPage>) -> bool {
        if self.pending_search != Some(token) {
            tracing::debug!("Dropping stale search response {:?}", token);
            return false;
        }
        self.pending_search = None;
        self.is_searching = false;
        self.poster_failures.clear();

        match outcome {
            Ok(page) => {
                self.total_pages = page.total_pages();
                self.items = page.items;
            }
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                self.last_failure = Some(e.to_string());
                self.items.clear();
                self.total_pages = 1;
            }
        }
        true
    }

    // ========== Details transitions ==========

    /// Select an item and start loading its details.
    pub fn select<S: Into<String>>(&mut self, id: S) -> Option<DetailsTicket> {
        if !self.has_credential {
            return None;
        }
        let id = id.into();
        let token = self.issue_token();
        self.selected = Some(id.clone());
        self.details = None;
        self.is_loading_details = true;
        self.pending_details = Some(token);
        Some(DetailsTicket { token, id })
    }

    /// Apply a detail outcome. Returns `false` when the ticket is stale.
    pub fn complete_details(
        &mut self,
        token: RequestToken,
        id: &str,
        outcome: Result<DetailRecord>,
    ) -> bool {
        if self.pending_details != Some(token) || self.selected.as_deref() != Some(id) {
            tracing::debug!("Dropping stale details response for {}", id);
            return false;
        }
        self.pending_details = None;
        self.is_loading_details = false;

        match outcome {
            Ok(record) => self.details = Some(record),
            Err(e) => {
                tracing::warn!("Details fetch for {} failed: {}", id, e);
                self.last_failure = Some(e.to_string());
                self.selected = None;
            }
        }
        true
    }

    /// Close the overlay and forget any in-flight lookup.
    pub fn close_details(&mut self) {
        self.selected = None;
        self.details = None;
        self.is_loading_details = false;
        self.pending_details = None;
    }

    /// Record that a card's poster failed to load.
    pub fn mark_poster_failed<S: Into<String>>(&mut self, id: S) {
        self.poster_failures.insert(id.into());
    }

    // ========== Internals ==========

    fn can_search(&self) -> bool {
        self.has_credential && self.query.has_text()
    }

    fn refetch_current_page(&mut self) -> Option<SearchTicket> {
        if !self.can_search() {
            return None;
        }
        Some(self.begin_search())
    }

    fn begin_search(&mut self) -> SearchTicket {
        let token = self.issue_token();
        self.pending_search = Some(token);
        self.is_searching = true;
        self.has_searched = true;
        SearchTicket {
            token,
            query: self.query.clone(),
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }
}
