//! Read-only queries behind the HTTP API.

use sea_orm::DatabaseConnection;

use crate::{
    model::vote::{ConcludedVoteDto, OngoingVoteDto},
    server::{
        data::vote::{ConcludedVoteRepository, OngoingVoteRepository},
        error::AppError,
        util::discord::thread_link,
    },
};

pub struct VoteHistoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoteHistoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the guild's open votes, soonest ending first.
    pub async fn get_ongoing(&self, guild_id: u64) -> Result<Vec<OngoingVoteDto>, AppError> {
        let votes = OngoingVoteRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?;

        Ok(votes
            .into_iter()
            .map(|vote| OngoingVoteDto {
                proposal_id: vote.proposal_id,
                thread_url: thread_link(vote.guild_id, vote.thread_id),
                title: vote.title,
                thread_id: vote.thread_id,
                published_at: vote.published_at,
                end_time: vote.end_time,
            })
            .collect())
    }

    /// Gets the guild's concluded votes, most recent first.
    pub async fn get_concluded(&self, guild_id: u64) -> Result<Vec<ConcludedVoteDto>, AppError> {
        let votes = ConcludedVoteRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?;

        Ok(votes
            .into_iter()
            .map(|vote| ConcludedVoteDto {
                proposal_id: vote.proposal_id,
                thread_url: thread_link(vote.guild_id, vote.thread_id),
                title: vote.title,
                thread_id: vote.thread_id,
                yes: vote.tally.yes,
                no: vote.tally.no,
                abstain: vote.tally.abstain,
                passed: vote.passed,
                concluded_at: vote.concluded_at,
                snapshot_url: vote.snapshot_url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn lists_ongoing_votes_with_thread_links() -> Result<(), AppError> {
        let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (proposal, vote) = factory::helpers::create_published_proposal(db).await?;
        let guild_id: u64 = proposal.guild_id.parse().unwrap();

        let votes = VoteHistoryService::new(db).get_ongoing(guild_id).await?;

        assert_eq!(votes.len(), 1);
        assert_eq!(
            votes[0].thread_url,
            format!(
                "https://discord.com/channels/{}/{}",
                proposal.guild_id, vote.thread_id
            )
        );

        Ok(())
    }

    #[tokio::test]
    async fn returns_empty_concluded_list() -> Result<(), AppError> {
        let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let votes = VoteHistoryService::new(db).get_concluded(1).await?;

        assert!(votes.is_empty());

        Ok(())
    }
}
