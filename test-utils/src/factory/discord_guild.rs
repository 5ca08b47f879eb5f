//! Discord guild factory for creating test guild entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test Discord guilds.
pub struct DiscordGuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    last_seen_at: DateTime<Utc>,
}

impl<'a> DiscordGuildFactory<'a> {
    /// Creates a new factory with a unique guild id and name.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("Guild {}", id),
            last_seen_at: Utc::now(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn last_seen_at(mut self, last_seen_at: DateTime<Utc>) -> Self {
        self.last_seen_at = last_seen_at;
        self
    }

    /// Builds and inserts the guild entity into the database.
    pub async fn build(self) -> Result<entity::discord_guild::Model, DbErr> {
        entity::discord_guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            last_seen_at: ActiveValue::Set(self.last_seen_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a Discord guild with default values.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::discord_guild::Model, DbErr> {
    DiscordGuildFactory::new(db).build().await
}
