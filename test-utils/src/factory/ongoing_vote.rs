//! Ongoing vote factory for creating published votes.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test ongoing votes for an existing proposal.
///
/// Defaults to a vote published now that ends in 48 hours.
pub struct OngoingVoteFactory<'a> {
    db: &'a DatabaseConnection,
    proposal_id: i32,
    guild_id: String,
    title: String,
    channel_id: String,
    thread_id: String,
    message_id: String,
    published_at: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl<'a> OngoingVoteFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, proposal: &entity::proposal::Model) -> Self {
        let now = Utc::now();
        Self {
            db,
            proposal_id: proposal.id,
            guild_id: proposal.guild_id.clone(),
            title: proposal.title.clone(),
            channel_id: next_id().to_string(),
            thread_id: next_id().to_string(),
            message_id: next_id().to_string(),
            published_at: now,
            end_time: now + Duration::hours(48),
        }
    }

    pub fn end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    /// Builds and inserts the ongoing vote entity into the database.
    pub async fn build(self) -> Result<entity::ongoing_vote::Model, DbErr> {
        entity::ongoing_vote::ActiveModel {
            proposal_id: ActiveValue::Set(self.proposal_id),
            guild_id: ActiveValue::Set(self.guild_id),
            title: ActiveValue::Set(self.title),
            channel_id: ActiveValue::Set(self.channel_id),
            thread_id: ActiveValue::Set(self.thread_id),
            message_id: ActiveValue::Set(self.message_id),
            published_at: ActiveValue::Set(self.published_at),
            end_time: ActiveValue::Set(self.end_time),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an ongoing vote for the proposal with default timing.
pub async fn create_ongoing_vote(
    db: &DatabaseConnection,
    proposal: &entity::proposal::Model,
) -> Result<entity::ongoing_vote::Model, DbErr> {
    OngoingVoteFactory::new(db, proposal).build().await
}
