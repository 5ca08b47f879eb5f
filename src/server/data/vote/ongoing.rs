use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::vote::{CreateOngoingVoteParam, OngoingVote};

/// Repository for votes whose window is still open.
///
/// A row exists exactly while a proposal is published and unconcluded; deleting it is how
/// conclusion and cancellation claim the vote.
pub struct OngoingVoteRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OngoingVoteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateOngoingVoteParam) -> Result<OngoingVote, DbErr> {
        let model = entity::ongoing_vote::ActiveModel {
            proposal_id: ActiveValue::Set(param.proposal_id),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            title: ActiveValue::Set(param.title),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            thread_id: ActiveValue::Set(param.thread_id.to_string()),
            message_id: ActiveValue::Set(param.message_id.to_string()),
            published_at: ActiveValue::Set(param.published_at),
            end_time: ActiveValue::Set(param.end_time),
        }
        .insert(self.db)
        .await?;

        OngoingVote::from_entity(model)
    }

    pub async fn find_by_proposal_id(&self, proposal_id: i32) -> Result<Option<OngoingVote>, DbErr> {
        entity::prelude::OngoingVote::find_by_id(proposal_id)
            .one(self.db)
            .await?
            .map(OngoingVote::from_entity)
            .transpose()
    }

    /// Finds the ongoing vote published in a given thread.
    pub async fn find_by_thread_id(&self, thread_id: u64) -> Result<Option<OngoingVote>, DbErr> {
        entity::prelude::OngoingVote::find()
            .filter(entity::ongoing_vote::Column::ThreadId.eq(thread_id.to_string()))
            .one(self.db)
            .await?
            .map(OngoingVote::from_entity)
            .transpose()
    }

    /// Gets every ongoing vote across guilds, soonest ending first.
    ///
    /// Used on startup to re-arm conclusion timers.
    pub async fn get_all(&self) -> Result<Vec<OngoingVote>, DbErr> {
        entity::prelude::OngoingVote::find()
            .order_by_asc(entity::ongoing_vote::Column::EndTime)
            .all(self.db)
            .await?
            .into_iter()
            .map(OngoingVote::from_entity)
            .collect()
    }

    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<OngoingVote>, DbErr> {
        entity::prelude::OngoingVote::find()
            .filter(entity::ongoing_vote::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::ongoing_vote::Column::EndTime)
            .all(self.db)
            .await?
            .into_iter()
            .map(OngoingVote::from_entity)
            .collect()
    }

    /// Removes the ongoing vote for a proposal.
    ///
    /// # Returns
    /// - `Ok(true)`: This caller removed the vote
    /// - `Ok(false)`: No ongoing vote existed, someone else already claimed it
    pub async fn delete(&self, proposal_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::OngoingVote::delete_many()
            .filter(entity::ongoing_vote::Column::ProposalId.eq(proposal_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
