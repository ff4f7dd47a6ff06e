//! Request and response shapes shared by every paginated list.
//!
//! Repositories translate their backend envelopes into [`PaginatedResponse`]
//! and the [`PaginationController`] builds [`PaginatedSearchParams`] from its
//! own state, so list pages never see resource-specific wire formats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod controller;
mod pages;

pub use controller::{
    FetchError, LoadOrdering, LoadStatus, PaginationController, PaginationOptions,
    PaginationState,
};
pub use pages::page_links;

/// Page size used when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Query keys owned by the pagination contract itself.
const RESERVED_KEYS: [&str; 3] = ["page", "limit", "search"];

/// Value attached to an arbitrary list filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Whether the value would be sent at all.
    ///
    /// Empty text, empty lists, zero and `false` are left out of the query
    /// string rather than being sent as placeholders.
    pub fn is_present(&self) -> bool {
        match self {
            FilterValue::Bool(value) => *value,
            FilterValue::Number(value) => *value != 0.0 && !value.is_nan(),
            FilterValue::Text(value) => !value.is_empty(),
            FilterValue::List(values) => !values.is_empty(),
        }
    }

    fn query_values(&self) -> Vec<String> {
        match self {
            FilterValue::Bool(value) => vec![value.to_string()],
            FilterValue::Number(value) => vec![value.to_string()],
            FilterValue::Text(value) => vec![value.clone()],
            FilterValue::List(values) => values.iter().filter(|v| !v.is_empty()).cloned().collect(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Number(f64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(f64::from(value))
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::List(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        FilterValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Filter key to value mapping. Keys are unique; order carries no meaning.
pub type FilterMap = BTreeMap<String, FilterValue>;

/// Parameters of a single list request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaginatedSearchParams {
    /// 1-based page number.
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// Resource specific filters appended after the paging fields.
    pub filters: FilterMap,
}

impl PaginatedSearchParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Ordered query pairs containing only present, truthy fields.
    ///
    /// Lists expand into one pair per element. Filters named like one of the
    /// paging fields are dropped so they cannot shadow them.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }

        for (key, value) in &self.filters {
            if RESERVED_KEYS.contains(&key.as_str()) {
                log::warn!("Ignoring filter `{key}`: the name is reserved for pagination");
                continue;
            }
            if !value.is_present() {
                continue;
            }
            pairs.extend(value.query_values().into_iter().map(|v| (key.clone(), v)));
        }

        pairs
    }
}

/// Canonical page of results handed to list pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32, total_pages: u32) -> Self {
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Number of pages needed for `total` items at `limit` per page.
///
/// A zero `limit` yields zero pages instead of dividing by zero.
pub fn total_pages_for(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
