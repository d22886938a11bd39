//! Paged grid controller for one resource.
//!
//! State changes that need data hand out a [`FetchTicket`]; completing a
//! ticket applies its result only if no newer ticket was issued since, so a
//! slow earlier response can never overwrite a later one.

use blogdesk_api_types::EntityId;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::resource::Resource;

use super::error::AppError;
use super::queries::{ListQuery, ListResult, ResourceQueries};

const SOURCE: &str = "application::list_view";

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const ACTIONS_CELL: &str = "edit | delete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Success,
    Error { message: String },
}

/// A list fetch in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
    generation: u64,
    force: bool,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Whether the fetch bypasses cached pages.
    pub fn is_forced(&self) -> bool {
        self.force
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// Row action surfaced to the page container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListIntent {
    Edit(EntityId),
    Delete(EntityId),
}

/// Render-ready snapshot of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<GridRow>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub id: EntityId,
    pub cells: Vec<String>,
}

pub struct ListView<R: Resource> {
    queries: ResourceQueries<R>,
    page: u32,
    page_size: u32,
    search: String,
    status: ListStatus,
    rows: Vec<R::ListItem>,
    total: u64,
    last_seq: u64,
    seen_generation: u64,
}

impl<R: Resource> ListView<R> {
    pub fn new(queries: ResourceQueries<R>, page_size: u32) -> Self {
        let seen_generation = queries.generation();
        Self {
            queries,
            page: 0,
            page_size: page_size.max(1),
            search: String::new(),
            status: ListStatus::Idle,
            rows: Vec::new(),
            total: 0,
            last_seq: 0,
            seen_generation,
        }
    }

    /// View positioned at `query` before its first fetch.
    pub fn at(queries: ResourceQueries<R>, query: ListQuery) -> Self {
        let mut view = Self::new(queries, query.page_size);
        view.page = query.page;
        view.search = query.search;
        view
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn rows(&self) -> &[R::ListItem] {
        &self.rows
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn query(&self) -> ListQuery {
        ListQuery::new(self.page, self.page_size, self.search.clone())
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    fn issue(&mut self, force: bool) -> FetchTicket {
        self.last_seq += 1;
        self.status = ListStatus::Loading;
        FetchTicket {
            seq: self.last_seq,
            query: self.query(),
            generation: self.queries.generation(),
            force,
        }
    }

    /// Ticket for the initial load.
    pub fn mount_ticket(&mut self) -> FetchTicket {
        self.issue(false)
    }

    /// Ticket for a manual reload, bypassing cached pages.
    pub fn reload_ticket(&mut self) -> FetchTicket {
        self.issue(true)
    }

    pub fn page_ticket(&mut self, page: u32) -> Option<FetchTicket> {
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.issue(false))
    }

    pub fn page_size_ticket(&mut self, page_size: u32) -> Option<FetchTicket> {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return None;
        }
        self.page_size = page_size;
        Some(self.issue(false))
    }

    /// A new search term always returns to the first page and yields exactly
    /// one ticket, including when the page already was the first.
    pub fn search_ticket(&mut self, search: &str) -> Option<FetchTicket> {
        if search == self.search {
            return None;
        }
        self.search = search.to_string();
        self.page = 0;
        Some(self.issue(false))
    }

    /// Ticket when the resource was invalidated since the last applied fetch.
    /// It bypasses cached pages.
    pub fn sync_ticket(&mut self) -> Option<FetchTicket> {
        (self.queries.generation() > self.seen_generation).then(|| self.issue(true))
    }

    /// Fetch the page a ticket describes without touching view state.
    pub async fn execute(
        queries: &ResourceQueries<R>,
        ticket: &FetchTicket,
    ) -> Result<ListResult<R::ListItem>, AppError> {
        if ticket.force {
            queries.fetch_list(&ticket.query).await
        } else {
            queries.list(&ticket.query).await
        }
    }

    /// Apply a finished fetch. Returns `false` when a newer ticket exists and
    /// the result was discarded.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListResult<R::ListItem>, AppError>,
    ) -> bool {
        if ticket.seq != self.last_seq {
            debug!(
                target = SOURCE,
                resource = %R::KIND,
                seq = ticket.seq,
                latest = self.last_seq,
                "discarding superseded list response"
            );
            return false;
        }

        self.seen_generation = self.seen_generation.max(ticket.generation);
        match result {
            Ok(page) => {
                self.rows = page.items;
                self.total = page.total;
                self.status = ListStatus::Success;
            }
            Err(err) => {
                warn!(
                    target = SOURCE,
                    resource = %R::KIND,
                    error = %err,
                    "list fetch failed"
                );
                // Rows from the last successful fetch stay visible.
                self.status = ListStatus::Error {
                    message: err.to_string(),
                };
            }
        }
        true
    }

    pub async fn run(&mut self, ticket: FetchTicket) -> bool {
        let queries = self.queries.clone();
        let result = Self::execute(&queries, &ticket).await;
        self.complete(ticket, result)
    }

    // ========================================================================
    // Convenience drivers
    // ========================================================================

    pub async fn mount(&mut self) {
        let ticket = self.mount_ticket();
        self.run(ticket).await;
    }

    pub async fn reload(&mut self) {
        let ticket = self.reload_ticket();
        self.run(ticket).await;
    }

    pub async fn set_page(&mut self, page: u32) {
        if let Some(ticket) = self.page_ticket(page) {
            self.run(ticket).await;
        }
    }

    pub async fn set_page_size(&mut self, page_size: u32) {
        if let Some(ticket) = self.page_size_ticket(page_size) {
            self.run(ticket).await;
        }
    }

    pub async fn set_search(&mut self, search: &str) {
        if let Some(ticket) = self.search_ticket(search) {
            self.run(ticket).await;
        }
    }

    /// Refetch if the resource was invalidated elsewhere.
    pub async fn sync(&mut self) -> bool {
        match self.sync_ticket() {
            Some(ticket) => self.run(ticket).await,
            None => false,
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Row actions are disabled while a fetch is in flight.
    pub fn row_action(&self, id: EntityId, action: RowAction) -> Option<ListIntent> {
        if self.is_loading() || !self.rows.iter().any(|row| R::item_id(row) == id) {
            return None;
        }
        Some(match action {
            RowAction::Edit => ListIntent::Edit(id),
            RowAction::Delete => ListIntent::Delete(id),
        })
    }

    pub fn grid(&self) -> Grid {
        let columns = R::columns();
        let mut headers = Vec::with_capacity(columns.len() + 2);
        headers.push("Id");
        headers.extend(columns.iter().map(|column| column.title));
        headers.push("Actions");

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let id = R::item_id(row);
                let mut cells = Vec::with_capacity(headers.len());
                cells.push(id.to_string());
                cells.extend(columns.iter().map(|column| column.render(row)));
                cells.push(ACTIONS_CELL.to_string());
                GridRow { id, cells }
            })
            .collect();

        let error = match &self.status {
            ListStatus::Error { message } => Some(message.clone()),
            _ => None,
        };

        Grid {
            title: R::KIND.title(),
            headers,
            rows,
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            loading: self.is_loading(),
            error,
        }
    }
}
