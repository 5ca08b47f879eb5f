//! Business logic between the command surface, the HTTP API, and the data layer.
//!
//! Services orchestrate repositories and Discord calls. They never build queries
//! themselves; that is the repositories' job.

pub mod contributor;
pub mod event_notification;
pub mod proposal;
pub mod publisher;
pub mod relay;
pub mod vote;
