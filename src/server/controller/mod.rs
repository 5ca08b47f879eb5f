//! Read-only HTTP API over vote history and contributor mentions.

pub mod contributor;
pub mod vote;
