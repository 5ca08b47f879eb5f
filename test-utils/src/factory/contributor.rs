//! Contributor factory for creating mention-relay registrations.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test contributors.
///
/// Defaults to an active contributor in the given guild with a unique custom emoji marker.
pub struct ContributorFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    note: String,
    emoji: String,
    active: bool,
}

impl<'a> ContributorFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.to_string(),
            user_id: next_id().to_string(),
            note: format!("Contributor {}", id),
            emoji: format!("<:marker:{}>", id),
            active: true,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Builds and inserts the contributor entity into the database.
    pub async fn build(self) -> Result<entity::contributor::Model, DbErr> {
        entity::contributor::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            note: ActiveValue::Set(self.note),
            emoji: ActiveValue::Set(self.emoji),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active contributor in the guild with default values.
pub async fn create_contributor(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::contributor::Model, DbErr> {
    ContributorFactory::new(db, guild_id).build().await
}
