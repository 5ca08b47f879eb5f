use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::proposal::{
    CreateProposalParam, Proposal, ProposalStatus, UpdateProposalParam,
};

/// Repository for proposals in every lifecycle state.
///
/// Status changes are conditional on the current status so concurrent callers cannot both
/// move a proposal out of the same state.
pub struct ProposalRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProposalRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new draft.
    pub async fn create(&self, param: CreateProposalParam) -> Result<Proposal, DbErr> {
        let now = Utc::now();
        let model = entity::proposal::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            title: ActiveValue::Set(param.title),
            category: ActiveValue::Set(param.category.as_str().to_string()),
            abstract_text: ActiveValue::Set(param.abstract_text),
            background: ActiveValue::Set(param.background),
            additional: ActiveValue::Set(param.additional),
            status: ActiveValue::Set(ProposalStatus::Draft.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Proposal::from_entity(model)
    }

    /// Replaces the content of a draft.
    ///
    /// # Returns
    /// - `Ok(Some(Proposal))`: Draft updated
    /// - `Ok(None)`: No draft with this id (absent or no longer a draft)
    /// - `Err(DbErr)`: Database error
    pub async fn update(&self, param: UpdateProposalParam) -> Result<Option<Proposal>, DbErr> {
        let result = entity::prelude::Proposal::update_many()
            .col_expr(entity::proposal::Column::Title, Expr::value(param.title))
            .col_expr(
                entity::proposal::Column::Category,
                Expr::value(param.category.as_str()),
            )
            .col_expr(
                entity::proposal::Column::AbstractText,
                Expr::value(param.abstract_text),
            )
            .col_expr(
                entity::proposal::Column::Background,
                Expr::value(param.background),
            )
            .col_expr(
                entity::proposal::Column::Additional,
                Expr::value(param.additional),
            )
            .col_expr(entity::proposal::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::proposal::Column::Id.eq(param.id))
            .filter(entity::proposal::Column::Status.eq(ProposalStatus::Draft.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(param.id).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Proposal>, DbErr> {
        entity::prelude::Proposal::find_by_id(id)
            .one(self.db)
            .await?
            .map(Proposal::from_entity)
            .transpose()
    }

    /// Checks whether a guild already has a proposal with exactly this title.
    ///
    /// Titles are compared case-sensitively across all statuses.
    ///
    /// # Arguments
    /// - `guild_id`: Guild to check within
    /// - `title`: Title to look for
    /// - `exclude_id`: Proposal to ignore, used when a draft keeps its own title on edit
    pub async fn title_exists(
        &self,
        guild_id: u64,
        title: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Proposal::find()
            .filter(entity::proposal::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::proposal::Column::Title.eq(title));

        if let Some(id) = exclude_id {
            query = query.filter(entity::proposal::Column::Id.ne(id));
        }

        Ok(query.one(self.db).await?.is_some())
    }

    /// Lists an author's drafts in a guild, most recently edited first.
    pub async fn get_drafts_by_author(
        &self,
        guild_id: u64,
        author_id: u64,
    ) -> Result<Vec<Proposal>, DbErr> {
        entity::prelude::Proposal::find()
            .filter(entity::proposal::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::proposal::Column::AuthorId.eq(author_id.to_string()))
            .filter(entity::proposal::Column::Status.eq(ProposalStatus::Draft.as_str()))
            .order_by_desc(entity::proposal::Column::UpdatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Proposal::from_entity)
            .collect()
    }

    /// Deletes a proposal if it is still a draft.
    ///
    /// # Returns
    /// - `Ok(true)`: Draft deleted
    /// - `Ok(false)`: No draft with this id
    pub async fn delete_draft(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Proposal::delete_many()
            .filter(entity::proposal::Column::Id.eq(id))
            .filter(entity::proposal::Column::Status.eq(ProposalStatus::Draft.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Moves a proposal from one status to another.
    ///
    /// # Returns
    /// - `Ok(true)`: Status changed
    /// - `Ok(false)`: Proposal absent or not in the `from` status
    pub async fn transition_status(
        &self,
        id: i32,
        from: ProposalStatus,
        to: ProposalStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Proposal::update_many()
            .col_expr(entity::proposal::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::proposal::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::proposal::Column::Id.eq(id))
            .filter(entity::proposal::Column::Status.eq(from.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod test;
