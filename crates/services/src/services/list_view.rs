//! Search / filter / paginate / mutate orchestration behind every list screen.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use client::RequestBody;
use models::{
    Entity, FilterMode, ListParams,
    envelope::{decode_message, decode_page},
};
use serde_json::Value;
use tracing::{debug, warn};
use utils::debounce::Debouncer;

use super::{
    confirm::{ConfirmModal, ModalError, PendingAction},
    notification::Notifier,
    query::{QueryClient, QueryKey},
    table::Pagination,
};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListPage<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Loaded(ListPage<T>),
    /// Page-level read failure; replaces the table.
    Failed { message: String },
}

impl<T> ListState<T> {
    pub fn page(&self) -> Option<&ListPage<T>> {
        match self {
            Self::Loaded(page) => Some(page),
            Self::Failed { .. } => None,
        }
    }
}

/// What a confirmed row action ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Succeeded { id: String, message: String },
    Failed { id: String, message: String },
}

pub struct ListView<T: Entity> {
    query: QueryClient,
    notifier: Arc<dyn Notifier>,
    search: Debouncer<String>,
    filters: BTreeMap<String, String>,
    page: u32,
    page_size: u32,
    modal: ConfirmModal<T>,
}

impl<T: Entity> ListView<T> {
    pub fn new(query: QueryClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            query,
            notifier,
            search: Debouncer::new(String::new(), SEARCH_DEBOUNCE),
            filters: BTreeMap::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            modal: ConfirmModal::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Raw search box contents.
    pub fn search_input(&self) -> &str {
        self.search.latest()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search.push(term.into());
    }

    /// Apply the pending search immediately (e.g. on Enter).
    pub fn submit_search(&mut self) {
        if self.search.flush() {
            self.page = 0;
        }
    }

    /// Sleep until the pending search term settles.
    pub async fn wait_for_search(&mut self) {
        if let Some(deadline) = self.search.deadline() {
            tokio::time::sleep_until(deadline).await;
        }
        self.sync_search();
    }

    /// Set or clear (`None` / empty) one filter. Resets to the first page.
    pub fn set_filter(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        let changed = match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.filters.insert(key, value.clone()).as_ref() != Some(&value),
            None => self.filters.remove(&key).is_some(),
        };
        if changed {
            self.page = 0;
        }
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn sync_search(&mut self) {
        if self.search.poll() {
            debug!(resource = %T::RESOURCE, search = %self.search.value(), "search settled");
            self.page = 0;
        }
    }

    /// Fetch parameters derived from the debounced search, filters and page.
    pub fn params(&mut self) -> ListParams {
        self.sync_search();
        let mut params = ListParams::new(self.page, self.page_size).with_search(self.search.value().as_str());
        params.filters = self.filters.clone();
        params
    }

    /// Read the current page through the query cache.
    pub async fn load(&mut self) -> ListState<T> {
        let resource = T::RESOURCE;
        let params = self.params();
        let body = match self.query.read(QueryKey::list(resource, params.clone())).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%resource, error = %e, "list read failed");
                return ListState::Failed {
                    message: format!("Failed to load {}", resource.label()),
                };
            }
        };

        let page = decode_page::<T>(resource, &body);

        let mut rows = page.results;
        if resource.filter_mode() == FilterMode::Client {
            rows.retain(|row| matches_locally(row, &params));
        }
        let limit = self.page_size as usize;
        if rows.len() > limit {
            warn!(%resource, rows = rows.len(), limit, "server returned more rows than requested");
            rows.truncate(limit);
        }

        ListState::Loaded(ListPage {
            rows,
            pagination: Pagination {
                current_page: self.page,
                total_pages: page.total_pages,
                total_count: page.total_count,
                page_size: self.page_size,
            },
        })
    }

    pub fn modal(&self) -> &ConfirmModal<T> {
        &self.modal
    }

    pub fn request_delete(&mut self, entity: T) -> Result<(), ModalError> {
        self.modal.open(entity, PendingAction::Delete)
    }

    /// Ask to apply a partial update (status toggle and the like) to `entity`.
    pub fn request_update(&mut self, entity: T, patch: Value) -> Result<(), ModalError> {
        self.modal.open(entity, PendingAction::Update(patch))
    }

    pub fn cancel(&mut self) -> Result<(), ModalError> {
        self.modal.cancel()
    }

    /// Run the pending action, notify, and close the dialog either way. The
    /// dialog also closes if this future is dropped before it completes.
    pub async fn confirm(&mut self) -> Result<MutationOutcome, ModalError> {
        let resource = T::RESOURCE;
        let in_flight = self.modal.start()?;
        let id = in_flight.target().id().to_string();
        let verb = match in_flight.action() {
            PendingAction::Delete => "deleted",
            PendingAction::Update(_) => "updated",
        };

        let result = match in_flight.action() {
            PendingAction::Delete => self.query.delete(resource, &id).await,
            PendingAction::Update(patch) => {
                self.query
                    .update(resource, &id, RequestBody::Json(patch.clone()))
                    .await
            }
        };
        drop(in_flight);

        Ok(match result {
            Ok(body) => {
                let message = decode_message(&body)
                    .unwrap_or_else(|| format!("{} {verb} successfully", resource.noun()));
                self.notifier.success(&message);
                MutationOutcome::Succeeded { id, message }
            }
            Err(e) => {
                warn!(%resource, id = %id, error = %e, "row action failed");
                let message = e.user_message();
                self.notifier.error(&message);
                MutationOutcome::Failed { id, message }
            }
        })
    }
}

/// Local re-filter for endpoints that ignore `search` / `filter`.
fn matches_locally<T: Entity>(row: &T, params: &ListParams) -> bool {
    let search_ok = params.search.as_deref().is_none_or(|term| {
        row.display_name()
            .to_lowercase()
            .contains(&term.to_lowercase())
    });
    let filters_ok = params.filters.iter().all(|(key, wanted)| {
        row.filter_value(key)
            .is_none_or(|actual| actual.eq_ignore_ascii_case(wanted))
    });
    search_ok && filters_ok
}
