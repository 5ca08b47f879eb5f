use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::mention::{CreateMentionParam, Mention};

pub struct MentionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MentionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateMentionParam) -> Result<Mention, DbErr> {
        let model = entity::mention::ActiveModel {
            contributor_id: ActiveValue::Set(param.contributor_id),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(param.message_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            by_reaction: ActiveValue::Set(param.by_reaction),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Mention::from_entity(model)
    }

    /// Gets a contributor's most recent relayed mentions.
    ///
    /// # Arguments
    /// - `contributor_id`: Contributor whose mentions to list
    /// - `limit`: Maximum number of mentions returned
    pub async fn get_recent_by_contributor(
        &self,
        contributor_id: i32,
        limit: u64,
    ) -> Result<Vec<Mention>, DbErr> {
        entity::prelude::Mention::find()
            .filter(entity::mention::Column::ContributorId.eq(contributor_id))
            .order_by_desc(entity::mention::Column::CreatedAt)
            .order_by_desc(entity::mention::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Mention::from_entity)
            .collect()
    }
}

#[cfg(test)]
mod test;
