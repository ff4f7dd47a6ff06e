//! Client core for the clinic management backend.
//!
//! [`pagination::PaginationController`] tracks page, search and filter state
//! for list screens; [`repository::HttpRepository`] turns each resource's REST
//! envelope into [`pagination::PaginatedResponse`] and typed records.

pub mod api;
pub mod backends;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod http_client;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "client")]
use std::time::Duration;

#[cfg(feature = "client")]
use crate::api::ApiClient;
#[cfg(feature = "client")]
use crate::backends::ReqwestClient;
#[cfg(feature = "client")]
use crate::http_client::HttpClientError;
#[cfg(feature = "client")]
use crate::models::config::ClientConfig;
#[cfg(feature = "client")]
use crate::repository::HttpRepository;

/// Builds the reqwest-backed repository described by `config`.
#[cfg(feature = "client")]
pub fn connect(config: &ClientConfig) -> Result<HttpRepository<ReqwestClient>, HttpClientError> {
    let http = ReqwestClient::new(Duration::from_secs(config.request_timeout_secs))?;
    let api = ApiClient::new(http, config.api_base_url.as_str()).with_token(config.api_token.clone());
    Ok(HttpRepository::new(api))
}
