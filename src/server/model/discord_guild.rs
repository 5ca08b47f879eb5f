use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// A guild the bot has joined, remembered so periodic jobs know where to run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordGuild {
    pub guild_id: u64,
    pub name: String,
    pub last_seen_at: DateTime<Utc>,
}

impl DiscordGuild {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(DiscordGuild)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored guild id is not a valid u64
    pub fn from_entity(entity: entity::discord_guild::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        Ok(Self {
            guild_id,
            name: entity.name,
            last_seen_at: entity.last_seen_at,
        })
    }
}
