//! Per-resource response unwrapping.
//!
//! Backends disagree on how they wrap payloads: some add a
//! `{state, data, message}` discriminator, some report `totalPages`, some
//! nest single entities one level deeper. Each resource declares its
//! [`EnvelopeShape`] and the helpers below turn an [`ApiResponse`] into the
//! canonical types or a [`RepositoryError`].

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ApiResponse;
use crate::pagination::{PaginatedResponse, PaginatedSearchParams, total_pages_for};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Where the page count of a list response comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TotalPagesSource {
    /// The backend reports `totalPages`.
    Server,
    /// Derived locally as `ceil(total / limit)`.
    Computed,
}

/// How a resource wraps its payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvelopeShape {
    /// Bodies look like `{state: "success" | "error", data, message}`.
    pub state_discriminator: bool,
    pub total_pages: TotalPagesSource,
    /// Single entities arrive as `{data: T}` even without a discriminator.
    pub entity_wrapped: bool,
}

/// Static description of one backend resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceConfig {
    pub path: &'static str,
    pub shape: EnvelopeShape,
    /// Message used when the backend gives no usable one.
    pub fallback_error: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage<T> {
    data: Vec<T>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
}

fn non_blank(message: Option<&str>) -> Option<String> {
    message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Checks transport and domain errors and returns the response body.
fn body(resource: &ResourceConfig, response: ApiResponse) -> RepositoryResult<Value> {
    if let Some(error) = response.error {
        let message = non_blank(Some(&error)).unwrap_or_else(|| resource.fallback_error.into());
        return Err(RepositoryError::Transport(message));
    }

    let body = response
        .data
        .ok_or_else(|| RepositoryError::MalformedResponse(resource.fallback_error.into()))?;

    // An explicit error discriminator is honoured even on resources that
    // usually omit it.
    if body.get("state").and_then(Value::as_str) == Some("error") {
        let message = non_blank(body.get("message").and_then(Value::as_str))
            .unwrap_or_else(|| resource.fallback_error.into());
        return Err(RepositoryError::Domain(message));
    }

    Ok(body)
}

fn take_data(resource: &ResourceConfig, mut body: Value) -> RepositoryResult<Value> {
    if resource.shape.state_discriminator {
        match body.get("state").and_then(Value::as_str) {
            Some("success") => {}
            other => warn!(
                "Unexpected state {other:?} in response from {}",
                resource.path
            ),
        }
    }
    match body.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => Err(RepositoryError::MalformedResponse(
            resource.fallback_error.into(),
        )),
        Some(data) => Ok(data),
    }
}

fn decode<T: DeserializeOwned>(resource: &ResourceConfig, value: Value) -> RepositoryResult<T> {
    serde_json::from_value(value).map_err(|e| {
        warn!("Failed to decode response from {}: {e}", resource.path);
        RepositoryError::MalformedResponse(resource.fallback_error.into())
    })
}

/// Unwraps a list response into a [`PaginatedResponse`].
///
/// `page` and `limit` fall back to the requested values when the backend
/// omits them.
pub fn unwrap_page<T: DeserializeOwned>(
    resource: &ResourceConfig,
    requested: &PaginatedSearchParams,
    response: ApiResponse,
) -> RepositoryResult<PaginatedResponse<T>> {
    let body = body(resource, response)?;
    let payload = if resource.shape.state_discriminator {
        take_data(resource, body)?
    } else {
        body
    };
    let raw: RawPage<T> = decode(resource, payload)?;

    let page = raw.page.or(requested.page).unwrap_or(1);
    let limit = raw
        .limit
        .or(requested.limit)
        .unwrap_or(u32::try_from(raw.data.len()).unwrap_or(u32::MAX));

    let total_pages = match (resource.shape.total_pages, raw.total_pages) {
        (TotalPagesSource::Server, Some(total_pages)) => total_pages,
        (TotalPagesSource::Server, None) => {
            warn!(
                "{} did not report totalPages; computing it locally",
                resource.path
            );
            total_pages_for(raw.total, limit)
        }
        (TotalPagesSource::Computed, _) => total_pages_for(raw.total, limit),
    };

    Ok(PaginatedResponse::new(
        raw.data,
        raw.total,
        page,
        limit,
        total_pages,
    ))
}

/// Unwraps a single-entity response.
pub fn unwrap_entity<T: DeserializeOwned>(
    resource: &ResourceConfig,
    response: ApiResponse,
) -> RepositoryResult<T> {
    let body = body(resource, response)?;
    let payload = if resource.shape.state_discriminator || resource.shape.entity_wrapped {
        take_data(resource, body)?
    } else {
        body
    };
    decode(resource, payload)
}
