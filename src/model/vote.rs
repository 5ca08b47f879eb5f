use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::api::serialize_u64_as_string;

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct OngoingVoteDto {
    pub proposal_id: i32,
    pub title: String,
    #[serde(serialize_with = "serialize_u64_as_string")]
    #[schema(value_type = String)]
    pub thread_id: u64,
    pub thread_url: String,
    pub published_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ConcludedVoteDto {
    pub proposal_id: i32,
    pub title: String,
    #[serde(serialize_with = "serialize_u64_as_string")]
    #[schema(value_type = String)]
    pub thread_id: u64,
    pub thread_url: String,
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
    pub passed: bool,
    pub concluded_at: DateTime<Utc>,
    pub snapshot_url: Option<String>,
}
