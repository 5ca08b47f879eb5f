use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::api::serialize_u64_as_string;

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ContributorDto {
    #[serde(serialize_with = "serialize_u64_as_string")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub note: String,
    pub emoji: String,
    pub active: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MentionDto {
    #[serde(serialize_with = "serialize_u64_as_string")]
    #[schema(value_type = String)]
    pub author_id: u64,
    pub message_url: String,
    pub by_reaction: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ContributorMentionsDto {
    pub contributor: ContributorDto,
    pub mentions: Vec<MentionDto>,
}
