//! Data transfer objects shaped for screens rather than the backend.

pub mod patient;
