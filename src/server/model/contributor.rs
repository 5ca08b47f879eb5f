use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// A guild member who is notified when their emoji marker is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Contributor {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub note: String,
    /// Emoji as Discord renders it in message content, e.g. `<:name:id>` or a unicode emoji.
    pub emoji: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Contributor {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Contributor)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored guild or user id is not a valid u64
    pub fn from_entity(entity: entity::contributor::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            id: entity.id,
            guild_id,
            user_id,
            note: entity.note,
            emoji: entity.emoji,
            active: entity.active,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateContributorParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub note: String,
    pub emoji: String,
}
