//! Models loaded from outside the backend API.

pub mod config;
