use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serenity::all::Guild;

use crate::server::model::discord_guild::DiscordGuild;

pub struct DiscordGuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordGuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a guild the bot is a member of, refreshing its name and last-seen time.
    pub async fn upsert(&self, guild: &Guild) -> Result<DiscordGuild, DbErr> {
        let model = entity::prelude::DiscordGuild::insert(entity::discord_guild::ActiveModel {
            guild_id: ActiveValue::Set(guild.id.get().to_string()),
            name: ActiveValue::Set(guild.name.clone()),
            last_seen_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::discord_guild::Column::GuildId)
                .update_columns([
                    entity::discord_guild::Column::Name,
                    entity::discord_guild::Column::LastSeenAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        DiscordGuild::from_entity(model)
    }

    pub async fn get_all(&self) -> Result<Vec<DiscordGuild>, DbErr> {
        entity::prelude::DiscordGuild::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordGuild::from_entity)
            .collect()
    }

    /// Finds a guild by its Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(DiscordGuild))`: Guild found in database
    /// - `Ok(None)`: The bot has not seen this guild
    /// - `Err(DbErr)`: Database error during query
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<DiscordGuild>, DbErr> {
        entity::prelude::DiscordGuild::find()
            .filter(entity::discord_guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(DiscordGuild::from_entity)
            .transpose()
    }

    /// Forgets a guild the bot was removed from.
    pub async fn delete(&self, guild_id: u64) -> Result<(), DbErr> {
        entity::prelude::DiscordGuild::delete_by_id(guild_id.to_string())
            .exec(self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod test;
