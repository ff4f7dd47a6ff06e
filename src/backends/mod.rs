//! HTTP client backend implementations.

#[cfg(feature = "client")]
mod reqwest_client;
#[cfg(feature = "client")]
pub use reqwest_client::ReqwestClient;
