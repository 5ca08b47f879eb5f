//! Data transfer objects served by the read-only HTTP API.

pub mod api;
pub mod contributor;
pub mod vote;
