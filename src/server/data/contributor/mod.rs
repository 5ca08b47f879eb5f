use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::contributor::{Contributor, CreateContributorParam};

pub struct ContributorRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContributorRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a contributor, reactivating a previous registration of the same user.
    ///
    /// A user keeps a single row per guild so their mention history survives removal and
    /// re-registration.
    pub async fn upsert(&self, param: CreateContributorParam) -> Result<Contributor, DbErr> {
        let existing = entity::prelude::Contributor::find()
            .filter(entity::contributor::Column::GuildId.eq(param.guild_id.to_string()))
            .filter(entity::contributor::Column::UserId.eq(param.user_id.to_string()))
            .one(self.db)
            .await?;

        let model = match existing {
            Some(existing) => {
                let mut active: entity::contributor::ActiveModel = existing.into();
                active.note = ActiveValue::Set(param.note);
                active.emoji = ActiveValue::Set(param.emoji);
                active.active = ActiveValue::Set(true);
                active.update(self.db).await?
            }
            None => {
                entity::contributor::ActiveModel {
                    guild_id: ActiveValue::Set(param.guild_id.to_string()),
                    user_id: ActiveValue::Set(param.user_id.to_string()),
                    note: ActiveValue::Set(param.note),
                    emoji: ActiveValue::Set(param.emoji),
                    active: ActiveValue::Set(true),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Contributor::from_entity(model)
    }

    /// Finds a user's registration in a guild, active or not.
    pub async fn find_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<Contributor>, DbErr> {
        entity::prelude::Contributor::find()
            .filter(entity::contributor::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::contributor::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
            .map(Contributor::from_entity)
            .transpose()
    }

    /// Finds the registration that owns an emoji marker in a guild, active or not.
    pub async fn find_by_emoji(
        &self,
        guild_id: u64,
        emoji: &str,
    ) -> Result<Option<Contributor>, DbErr> {
        entity::prelude::Contributor::find()
            .filter(entity::contributor::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::contributor::Column::Emoji.eq(emoji))
            .one(self.db)
            .await?
            .map(Contributor::from_entity)
            .transpose()
    }

    /// Gets the contributors whose markers are currently relayed.
    pub async fn get_active_by_guild(&self, guild_id: u64) -> Result<Vec<Contributor>, DbErr> {
        entity::prelude::Contributor::find()
            .filter(entity::contributor::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::contributor::Column::Active.eq(true))
            .order_by_asc(entity::contributor::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Contributor::from_entity)
            .collect()
    }

    /// Stops relaying a contributor's marker without deleting their history.
    ///
    /// # Returns
    /// - `Ok(true)`: Contributor deactivated
    /// - `Ok(false)`: No active registration for this user
    pub async fn deactivate(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Contributor::update_many()
            .col_expr(
                entity::contributor::Column::Active,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(entity::contributor::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::contributor::Column::UserId.eq(user_id.to_string()))
            .filter(entity::contributor::Column::Active.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod test;
