//! Entities exchanged with the clinic backend.

pub mod kardex;
pub mod patient;
pub mod product;
pub mod types;
