use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// A relayed use of a contributor's marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Mention {
    pub id: i32,
    pub contributor_id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    /// User who wrote the message or added the reaction.
    pub author_id: u64,
    pub by_reaction: bool,
    pub created_at: DateTime<Utc>,
}

impl Mention {
    pub fn from_entity(entity: entity::mention::Model) -> Result<Self, DbErr> {
        let parse = |field: &str, value: &str| {
            value
                .parse::<u64>()
                .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
        };

        Ok(Self {
            id: entity.id,
            contributor_id: entity.contributor_id,
            guild_id: parse("guild_id", &entity.guild_id)?,
            channel_id: parse("channel_id", &entity.channel_id)?,
            message_id: parse("message_id", &entity.message_id)?,
            author_id: parse("author_id", &entity.author_id)?,
            by_reaction: entity.by_reaction,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateMentionParam {
    pub contributor_id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub by_reaction: bool,
}
