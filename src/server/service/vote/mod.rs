//! Vote lifecycle: publishing a draft into a vote thread, concluding it when the window
//! closes, and cancelling it.
//!
//! The Discord-facing steps wrap database-only steps (`ProposalService::record_publication`,
//! [`VoteService::record_conclusion`], [`VoteService::record_cancellation`]) which carry the
//! state changes and their guards.

pub mod history;
pub mod render;

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serenity::{
    all::{ChannelId, CreateMessage, CreateThread, GuildId, MessageId},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    config::Config,
    data::{
        proposal::ProposalRepository,
        vote::{ConcludedVoteRepository, OngoingVoteRepository},
    },
    error::AppError,
    model::{
        proposal::{Proposal, ProposalCategory, ProposalStatus},
        vote::{
            ConcludedVote, CreateConcludedVoteParam, CreateOngoingVoteParam, OngoingVote,
            VoteChoice, VoteTally,
        },
    },
    service::{proposal::ProposalService, publisher::ProposalPublisher},
    util::discord::{find_text_channel, split_message, MESSAGE_LIMIT},
};

/// Vote rules and destinations taken from configuration.
#[derive(Debug, Clone)]
pub struct VoteSettings {
    pub window: Duration,
    pub quorum: u64,
    pub general_channel_name: String,
    pub budget_channel_name: String,
}

impl VoteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window: config.vote_window,
            quorum: config.vote_quorum,
            general_channel_name: config.general_channel_name.clone(),
            budget_channel_name: config.budget_channel_name.clone(),
        }
    }

    /// Name of the channel proposals of a category are published to.
    pub fn channel_name(&self, category: ProposalCategory) -> &str {
        match category {
            ProposalCategory::General => &self.general_channel_name,
            ProposalCategory::Budget => &self.budget_channel_name,
        }
    }
}

/// Discord messages created while publishing.
struct PostedVote {
    channel_id: ChannelId,
    starter_id: MessageId,
    thread_id: ChannelId,
    message_id: MessageId,
}

pub struct VoteService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
    /// `None` when ledger submission is disabled.
    publisher: Option<Arc<dyn ProposalPublisher>>,
    settings: &'a VoteSettings,
}

impl<'a> VoteService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http: Arc<Http>,
        publisher: Option<Arc<dyn ProposalPublisher>>,
        settings: &'a VoteSettings,
    ) -> Self {
        Self {
            db,
            http,
            publisher,
            settings,
        }
    }

    /// Publishes an author's draft into a vote thread.
    ///
    /// Validates the draft, posts the starter message, thread, proposal text and vote message,
    /// then records the vote. Arming the conclusion timer is left to the caller.
    ///
    /// # Arguments
    /// - `guild_id`: Guild the command was used in
    /// - `author_id`: User publishing; must own the draft
    /// - `proposal_id`: Draft to publish
    ///
    /// # Returns
    /// - `Ok(OngoingVote)`: Vote opened
    /// - `Err(AppError::NotFound)`: No such draft owned by the user
    /// - `Err(AppError::Validation)`: Category outside the enumeration
    /// - `Err(AppError::ChannelNotFound)`: Destination channel missing in the guild
    /// - `Err(AppError::Publish)`: Discord rejected one of the posts; the draft is kept
    pub async fn publish(
        &self,
        guild_id: u64,
        author_id: u64,
        proposal_id: i32,
    ) -> Result<OngoingVote, AppError> {
        let proposal_service = ProposalService::new(self.db);
        let (proposal, category) = proposal_service
            .prepare_publish(guild_id, author_id, proposal_id)
            .await?;

        let channel_name = self.settings.channel_name(category);
        let channels = GuildId::new(guild_id)
            .channels(&self.http)
            .await
            .map_err(|e| AppError::Publish(e.to_string()))?;
        let channel_id = find_text_channel(&channels, channel_name)
            .ok_or_else(|| AppError::ChannelNotFound(channel_name.to_string()))?;

        let published_at = Utc::now();
        let end_time = published_at + self.settings.window;

        let posted = self
            .post_vote_thread(channel_id, &proposal, category, end_time)
            .await
            .map_err(|e| AppError::Publish(e.to_string()))?;

        let recorded = proposal_service
            .record_publication(CreateOngoingVoteParam {
                proposal_id: proposal.id,
                guild_id,
                title: proposal.title.clone(),
                channel_id: posted.channel_id.get(),
                thread_id: posted.thread_id.get(),
                message_id: posted.message_id.get(),
                published_at,
                end_time,
            })
            .await;

        match recorded {
            Ok(vote) => {
                tracing::info!(
                    "Published proposal #{} \"{}\" in guild {}, voting ends {}",
                    vote.proposal_id,
                    vote.title,
                    guild_id,
                    vote.end_time
                );
                Ok(vote)
            }
            Err(e) => {
                self.remove_posted(&posted).await;
                Err(e)
            }
        }
    }

    async fn post_vote_thread(
        &self,
        channel_id: ChannelId,
        proposal: &Proposal,
        category: ProposalCategory,
        end_time: chrono::DateTime<Utc>,
    ) -> Result<PostedVote, serenity::Error> {
        let starter = channel_id
            .send_message(
                &self.http,
                CreateMessage::new().embed(render::starter_embed(proposal, category, end_time)),
            )
            .await?;

        let thread = match channel_id
            .create_thread_from_message(
                &self.http,
                starter.id,
                CreateThread::new(render::thread_name(&proposal.title)),
            )
            .await
        {
            Ok(thread) => thread,
            Err(e) => {
                if let Err(cleanup) = starter.delete(&self.http).await {
                    tracing::warn!("Failed to remove starter message {}: {}", starter.id, cleanup);
                }
                return Err(e);
            }
        };

        let mut posted = PostedVote {
            channel_id,
            starter_id: starter.id,
            thread_id: thread.id,
            message_id: starter.id,
        };

        match self.post_vote_message(&posted, proposal, category, end_time).await {
            Ok(message_id) => {
                posted.message_id = message_id;
                Ok(posted)
            }
            Err(e) => {
                self.remove_posted(&posted).await;
                Err(e)
            }
        }
    }

    async fn post_vote_message(
        &self,
        posted: &PostedVote,
        proposal: &Proposal,
        category: ProposalCategory,
        end_time: chrono::DateTime<Utc>,
    ) -> Result<MessageId, serenity::Error> {
        let text = render::proposal_text(proposal, category);
        for chunk in split_message(&text, MESSAGE_LIMIT) {
            posted
                .thread_id
                .send_message(&self.http, CreateMessage::new().content(chunk))
                .await?;
        }

        let vote_message = posted
            .thread_id
            .send_message(
                &self.http,
                CreateMessage::new().content(render::vote_prompt(end_time, self.settings.quorum)),
            )
            .await?;

        for choice in VoteChoice::ALL {
            vote_message.react(&self.http, choice.reaction()).await?;
        }

        Ok(vote_message.id)
    }

    /// Best-effort removal of a half-published vote thread.
    async fn remove_posted(&self, posted: &PostedVote) {
        if let Err(e) = posted.thread_id.delete(&self.http).await {
            tracing::warn!("Failed to remove vote thread {}: {}", posted.thread_id, e);
        }
        if let Err(e) = posted
            .channel_id
            .delete_message(&self.http, posted.starter_id)
            .await
        {
            tracing::warn!(
                "Failed to remove starter message {}: {}",
                posted.starter_id,
                e
            );
        }
    }

    /// Concludes a vote whose window has closed.
    ///
    /// Takes a single snapshot of the vote message's reactions, records the result and
    /// posts a summary to the vote thread.
    ///
    /// # Returns
    /// - `Ok(Some(ConcludedVote))`: This call concluded the vote
    /// - `Ok(None)`: The vote was not ongoing (already concluded or cancelled)
    /// - `Err(AppError)`: Discord or database failure; the vote stays ongoing
    pub async fn conclude(&self, proposal_id: i32) -> Result<Option<ConcludedVote>, AppError> {
        let Some(vote) = OngoingVoteRepository::new(self.db)
            .find_by_proposal_id(proposal_id)
            .await?
        else {
            tracing::debug!("Vote for proposal #{} is not ongoing, skipping", proposal_id);
            return Ok(None);
        };

        let message = self
            .http
            .get_message(ChannelId::new(vote.thread_id), MessageId::new(vote.message_id))
            .await?;
        let tally = VoteTally::from_reactions(
            message
                .reactions
                .iter()
                .map(|reaction| (&reaction.reaction_type, reaction.count, reaction.me)),
        );

        let Some(concluded) = self.record_conclusion(&vote, tally).await? else {
            return Ok(None);
        };

        if let Err(e) = ChannelId::new(vote.thread_id)
            .send_message(
                &self.http,
                CreateMessage::new().embed(render::result_embed(&concluded, self.settings.quorum)),
            )
            .await
        {
            tracing::warn!(
                "Failed to post result of proposal #{} to thread {}: {}",
                proposal_id,
                vote.thread_id,
                e
            );
        }

        Ok(Some(concluded))
    }

    /// Records the result of a vote and submits passed proposals to the ledger.
    ///
    /// The ongoing vote is deleted in the same transaction that stores the result, so only
    /// one caller can conclude a vote. The ledger is only contacted by that caller.
    ///
    /// # Returns
    /// - `Ok(Some(ConcludedVote))`: Vote concluded by this call
    /// - `Ok(None)`: The vote was already concluded or cancelled
    pub async fn record_conclusion(
        &self,
        vote: &OngoingVote,
        tally: VoteTally,
    ) -> Result<Option<ConcludedVote>, AppError> {
        let passed = tally.passes(self.settings.quorum);
        let txn = self.db.begin().await?;

        if !OngoingVoteRepository::new(&txn)
            .delete(vote.proposal_id)
            .await?
        {
            txn.rollback().await?;
            return Ok(None);
        }

        let concluded = ConcludedVoteRepository::new(&txn)
            .create(CreateConcludedVoteParam {
                vote: vote.clone(),
                tally,
                passed,
                concluded_at: Utc::now(),
            })
            .await?;
        if !ProposalRepository::new(&txn)
            .transition_status(
                vote.proposal_id,
                ProposalStatus::Published,
                ProposalStatus::Concluded,
            )
            .await?
        {
            txn.rollback().await?;
            tracing::warn!(
                "Proposal #{} is no longer published, not concluding its vote",
                vote.proposal_id
            );
            return Ok(None);
        }
        txn.commit().await?;

        tracing::info!(
            "Concluded proposal #{} \"{}\": {} yes / {} no / {} abstain, passed: {}",
            vote.proposal_id,
            vote.title,
            tally.yes,
            tally.no,
            tally.abstain,
            passed
        );

        if !passed {
            return Ok(Some(concluded));
        }

        Ok(Some(self.submit_to_ledger(concluded).await?))
    }

    /// Submits a passed proposal and stores the returned link.
    ///
    /// Publisher failures are logged and leave the vote concluded without a link.
    async fn submit_to_ledger(&self, concluded: ConcludedVote) -> Result<ConcludedVote, AppError> {
        let Some(publisher) = &self.publisher else {
            return Ok(concluded);
        };

        let Some(proposal) = ProposalRepository::new(self.db)
            .find_by_id(concluded.proposal_id)
            .await?
        else {
            return Ok(concluded);
        };

        match publisher.submit(&proposal).await {
            Ok(url) => Ok(ConcludedVoteRepository::new(self.db)
                .set_snapshot_url(concluded.proposal_id, url)
                .await?),
            Err(e) => {
                tracing::error!(
                    "Failed to submit proposal #{} to the ledger: {}",
                    concluded.proposal_id,
                    e
                );
                Ok(concluded)
            }
        }
    }

    /// Cancels an ongoing vote and tells the thread about it.
    ///
    /// The caller is responsible for permission checks and for aborting the timer.
    pub async fn cancel(&self, proposal_id: i32) -> Result<OngoingVote, AppError> {
        let vote = self.record_cancellation(proposal_id).await?;

        if let Err(e) = ChannelId::new(vote.thread_id)
            .send_message(
                &self.http,
                CreateMessage::new().content("This vote was cancelled by a core member."),
            )
            .await
        {
            tracing::warn!(
                "Failed to post cancellation to thread {}: {}",
                vote.thread_id,
                e
            );
        }

        Ok(vote)
    }

    /// Removes an ongoing vote and marks its proposal cancelled.
    ///
    /// # Returns
    /// - `Ok(OngoingVote)`: The cancelled vote
    /// - `Err(AppError::NotFound)`: No ongoing vote for this proposal, or it was concluded
    ///   concurrently
    pub async fn record_cancellation(&self, proposal_id: i32) -> Result<OngoingVote, AppError> {
        let txn = self.db.begin().await?;
        let votes = OngoingVoteRepository::new(&txn);

        let Some(vote) = votes.find_by_proposal_id(proposal_id).await? else {
            txn.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Proposal #{} has no ongoing vote",
                proposal_id
            )));
        };

        let cancelled = votes.delete(proposal_id).await?
            && ProposalRepository::new(&txn)
                .transition_status(
                    proposal_id,
                    ProposalStatus::Published,
                    ProposalStatus::Cancelled,
                )
                .await?;
        if !cancelled {
            txn.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Proposal #{} has no ongoing vote",
                proposal_id
            )));
        }
        txn.commit().await?;

        tracing::info!("Cancelled vote on proposal #{}", proposal_id);

        Ok(vote)
    }
}

#[cfg(test)]
mod tests;
