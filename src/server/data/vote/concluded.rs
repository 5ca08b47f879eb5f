use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::vote::{ConcludedVote, CreateConcludedVoteParam};

pub struct ConcludedVoteRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ConcludedVoteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores the final tally of a closed vote.
    ///
    /// Counts are stored as i32; tallies beyond that range are clamped.
    pub async fn create(&self, param: CreateConcludedVoteParam) -> Result<ConcludedVote, DbErr> {
        let clamp = |count: u64| i32::try_from(count).unwrap_or(i32::MAX);

        let model = entity::concluded_vote::ActiveModel {
            proposal_id: ActiveValue::Set(param.vote.proposal_id),
            guild_id: ActiveValue::Set(param.vote.guild_id.to_string()),
            title: ActiveValue::Set(param.vote.title),
            channel_id: ActiveValue::Set(param.vote.channel_id.to_string()),
            thread_id: ActiveValue::Set(param.vote.thread_id.to_string()),
            yes_count: ActiveValue::Set(clamp(param.tally.yes)),
            no_count: ActiveValue::Set(clamp(param.tally.no)),
            abstain_count: ActiveValue::Set(clamp(param.tally.abstain)),
            passed: ActiveValue::Set(param.passed),
            concluded_at: ActiveValue::Set(param.concluded_at),
            snapshot_url: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        ConcludedVote::from_entity(model)
    }

    pub async fn find_by_proposal_id(
        &self,
        proposal_id: i32,
    ) -> Result<Option<ConcludedVote>, DbErr> {
        entity::prelude::ConcludedVote::find_by_id(proposal_id)
            .one(self.db)
            .await?
            .map(ConcludedVote::from_entity)
            .transpose()
    }

    /// Gets a guild's concluded votes, most recent first.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<ConcludedVote>, DbErr> {
        entity::prelude::ConcludedVote::find()
            .filter(entity::concluded_vote::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::concluded_vote::Column::ConcludedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(ConcludedVote::from_entity)
            .collect()
    }

    /// Records the external ledger link for a passed proposal.
    ///
    /// # Returns
    /// - `Ok(ConcludedVote)`: Updated record
    /// - `Err(DbErr::RecordNotFound)`: No concluded vote for this proposal
    pub async fn set_snapshot_url(
        &self,
        proposal_id: i32,
        url: String,
    ) -> Result<ConcludedVote, DbErr> {
        let model = entity::prelude::ConcludedVote::find_by_id(proposal_id)
            .one(self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Concluded vote for proposal {} not found",
                    proposal_id
                ))
            })?;

        let mut active: entity::concluded_vote::ActiveModel = model.into();
        active.snapshot_url = ActiveValue::Set(Some(url));
        let updated = active.update(self.db).await?;

        ConcludedVote::from_entity(updated)
    }
}
