//! Page, search and filter state for list screens.
//!
//! The controller never knows which resource it lists: every load receives a
//! fetch function that closes over a repository call. Mutators are
//! synchronous and never fetch on their own; the owner reloads after changing
//! state.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error};

use crate::pagination::{
    DEFAULT_PAGE_SIZE, FilterMap, PaginatedResponse, PaginatedSearchParams, page_links,
};
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

const GENERIC_FETCH_ERROR: &str = "An unexpected error occurred while loading data";

/// Failure reported by a fetch function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchError {
    message: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// An error that carries no message of its own.
    pub fn without_message() -> Self {
        Self { message: None }
    }

    /// Human readable message, falling back to a generic one.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_FETCH_ERROR)
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FetchError {}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<RepositoryError> for FetchError {
    fn from(err: RepositoryError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ServiceError> for FetchError {
    fn from(err: ServiceError) -> Self {
        Self::new(err.to_string())
    }
}

/// How overlapping [`PaginationController::load_data`] calls are reconciled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadOrdering {
    /// Every completed load is applied; whichever resolves last wins.
    #[default]
    LastResolved,
    /// Only the most recently started load is applied. Older responses are
    /// dropped and leave the loading flag of the newer request untouched.
    LatestRequest,
}

/// Construction options for a [`PaginationController`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PaginationOptions {
    pub initial_page: Option<u32>,
    pub initial_page_size: Option<u32>,
    pub ordering: LoadOrdering,
}

/// Coarse lifecycle derived from the loading flag, error and data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Snapshot of everything a list page renders.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginationState<T> {
    pub current_page: u32,
    pub page_size: u32,
    pub search_term: String,
    pub filters: FilterMap,
    pub data: Vec<T>,
    pub total_items: u64,
    pub total_pages: u32,
    pub is_loading: bool,
    pub error: Option<String>,
    settled: bool,
    pending: u32,
}

impl<T> PaginationState<T> {
    fn new(options: &PaginationOptions) -> Self {
        Self {
            current_page: options.initial_page.filter(|p| *p > 0).unwrap_or(1),
            page_size: options
                .initial_page_size
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            search_term: String::new(),
            filters: FilterMap::new(),
            data: Vec::new(),
            total_items: 0,
            total_pages: 0,
            is_loading: false,
            error: None,
            settled: false,
            pending: 0,
        }
    }

    pub fn status(&self) -> LoadStatus {
        if self.is_loading {
            LoadStatus::Loading
        } else if self.error.is_some() {
            LoadStatus::Errored
        } else if self.settled {
            LoadStatus::Loaded
        } else {
            LoadStatus::Idle
        }
    }

    /// Pager entries for the current position.
    pub fn page_links(&self) -> Vec<Option<u32>> {
        page_links(self.total_pages, self.current_page)
    }

    /// Request parameters derived from the current state. An empty search
    /// term leaves `search` unset.
    pub fn search_params(&self) -> PaginatedSearchParams {
        PaginatedSearchParams {
            page: Some(self.current_page),
            limit: Some(self.page_size),
            search: Some(self.search_term.clone()).filter(|s| !s.is_empty()),
            filters: self.filters.clone(),
        }
    }

    fn clamp_page(&self, page: i64) -> u32 {
        let last = i64::from(self.total_pages.max(1));
        // `last` fits in u32, so the clamped value does too.
        u32::try_from(page.clamp(1, last)).unwrap_or(1)
    }

    /// Retires one in-flight load without publishing anything; the loading
    /// flag drops once no load is left pending.
    fn finish_pending(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.is_loading = false;
        }
    }

    fn apply_success(&mut self, response: PaginatedResponse<T>) {
        self.data = response.items;
        self.total_items = response.total;
        self.total_pages = response.total_pages;
        self.error = None;
        self.settled = true;
    }

    fn apply_failure(&mut self, err: &FetchError) {
        self.error = Some(err.message().to_string());
        self.data = Vec::new();
        self.total_items = 0;
        self.total_pages = 0;
        self.settled = true;
    }
}

/// Stateful pagination/search/filter tracker shared by list pages.
///
/// State sits behind a mutex so loads can be awaited while the owner keeps
/// mutating page or search state; the lock is never held across an await.
#[derive(Debug)]
pub struct PaginationController<T> {
    state: Mutex<PaginationState<T>>,
    ordering: LoadOrdering,
    latest_request: AtomicU64,
}

impl<T> Default for PaginationController<T> {
    fn default() -> Self {
        Self::new(PaginationOptions::default())
    }
}

impl<T> PaginationController<T> {
    pub fn new(options: PaginationOptions) -> Self {
        Self {
            state: Mutex::new(PaginationState::new(&options)),
            ordering: options.ordering,
            latest_request: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PaginationState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone of the full state for rendering.
    pub fn state(&self) -> PaginationState<T>
    where
        T: Clone,
    {
        self.lock().clone()
    }

    pub fn current_page(&self) -> u32 {
        self.lock().current_page
    }

    pub fn page_size(&self) -> u32 {
        self.lock().page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.lock().total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn search_params(&self) -> PaginatedSearchParams {
        self.lock().search_params()
    }

    /// Replaces the search term verbatim and returns to the first page.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let mut state = self.lock();
        state.search_term = term.into();
        state.current_page = 1;
    }

    /// Replaces the whole filter map and returns to the first page.
    pub fn set_filters(&self, filters: FilterMap) {
        let mut state = self.lock();
        state.filters = filters;
        state.current_page = 1;
    }

    /// Replaces the page size and returns to the first page.
    pub fn set_page_size(&self, size: u32) {
        let mut state = self.lock();
        state.page_size = size;
        state.current_page = 1;
    }

    /// Moves to `page`, clamped into `[1, max(1, total_pages)]`.
    pub fn go_to_page(&self, page: i64) {
        let mut state = self.lock();
        state.current_page = state.clamp_page(page);
    }

    pub fn go_to_first_page(&self) {
        self.go_to_page(1);
    }

    pub fn go_to_last_page(&self) {
        let last = self.total_pages();
        self.go_to_page(i64::from(last));
    }

    pub fn go_to_next_page(&self) {
        let current = self.current_page();
        self.go_to_page(i64::from(current) + 1);
    }

    pub fn go_to_previous_page(&self) {
        let current = self.current_page();
        self.go_to_page(i64::from(current) - 1);
    }

    /// Extension point kept for list pages that expect it. The controller
    /// does not remember the last fetch function; callers reload through
    /// [`Self::load_data`].
    pub fn refresh(&self) {}

    /// Runs `fetch` against the current state and publishes its outcome.
    ///
    /// Failures never propagate: the message lands in `error` and the visible
    /// data is cleared. The loading flag is reset on every exit path,
    /// including when the returned future is dropped before completion.
    pub async fn load_data<F, Fut, E>(&self, fetch: F)
    where
        F: FnOnce(PaginatedSearchParams) -> Fut,
        Fut: Future<Output = Result<PaginatedResponse<T>, E>>,
        E: Into<FetchError>,
    {
        let (request_id, params) = {
            let mut state = self.lock();
            state.is_loading = true;
            state.error = None;
            state.pending += 1;
            let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            (request_id, state.search_params())
        };
        debug!("Loading page {:?} (request #{request_id})", params.page);

        let mut guard = LoadingGuard {
            controller: self,
            request_id,
            armed: true,
        };

        let outcome = fetch(params).await.map_err(Into::into);

        guard.armed = false;
        let mut state = self.lock();
        if !self.accepts(request_id) {
            debug!("Discarding stale response for request #{request_id}");
            state.finish_pending();
            return;
        }
        state.pending = state.pending.saturating_sub(1);
        match outcome {
            Ok(response) => state.apply_success(response),
            Err(err) => {
                error!("Failed to load page: {err}");
                state.apply_failure(&err);
            }
        }
        state.is_loading = false;
    }

    fn accepts(&self, request_id: u64) -> bool {
        match self.ordering {
            LoadOrdering::LastResolved => true,
            LoadOrdering::LatestRequest => {
                self.latest_request.load(Ordering::SeqCst) == request_id
            }
        }
    }
}

/// Clears the loading flag if a load is abandoned mid-flight and no other
/// load is still pending.
struct LoadingGuard<'a, T> {
    controller: &'a PaginationController<T>,
    request_id: u64,
    armed: bool,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Request #{} abandoned", self.request_id);
            self.controller.lock().finish_pending();
        }
    }
}
