//! Proposal drafting.
//!
//! Drafts are owned by their author until published. This service only touches the
//! database; everything that talks to Discord lives in the vote service.

use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::server::{
    data::{proposal::ProposalRepository, vote::OngoingVoteRepository},
    error::AppError,
    model::{
        proposal::{
            CreateProposalParam, Proposal, ProposalCategory, ProposalStatus, SaveDraftParam,
            UpdateProposalParam,
        },
        vote::{CreateOngoingVoteParam, OngoingVote},
    },
};

/// Maximum title length; titles double as thread names.
pub const MAX_TITLE_LENGTH: usize = 100;

pub struct ProposalService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProposalService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft, or replaces the content of an existing one.
    ///
    /// # Arguments
    /// - `param`: Draft content; `proposal_id` selects the draft to edit
    ///
    /// # Returns
    /// - `Ok(Proposal)`: The saved draft
    /// - `Err(AppError::Validation)`: Unknown category, empty fields, or the title is taken
    /// - `Err(AppError::NotFound)`: The draft to edit does not exist or belongs to someone else
    pub async fn save_draft(&self, param: SaveDraftParam) -> Result<Proposal, AppError> {
        let category: ProposalCategory = param.category.parse()?;
        let title = param.title.trim().to_string();
        validate_content(&title, &param.abstract_text, &param.background)?;

        let repo = ProposalRepository::new(self.db);

        if let Some(id) = param.proposal_id {
            self.get_own_draft(param.author_id, id).await?;
        }

        if repo
            .title_exists(param.guild_id, &title, param.proposal_id)
            .await?
        {
            return Err(title_taken(&title));
        }

        let additional = param.additional.filter(|text| !text.trim().is_empty());
        let checked_title = title.clone();

        let proposal = match param.proposal_id {
            Some(id) => repo
                .update(UpdateProposalParam {
                    id,
                    title,
                    category,
                    abstract_text: param.abstract_text,
                    background: param.background,
                    additional,
                })
                .await
                .map_err(|e| unique_title_violation(e, &checked_title))?
                .ok_or_else(|| AppError::NotFound(format!("Draft #{} was not found", id)))?,
            None => {
                repo.create(CreateProposalParam {
                    guild_id: param.guild_id,
                    author_id: param.author_id,
                    title,
                    category,
                    abstract_text: param.abstract_text,
                    background: param.background,
                    additional,
                })
                .await
                .map_err(|e| unique_title_violation(e, &checked_title))?
            }
        };

        tracing::info!(
            "Saved draft #{} \"{}\" for user {}",
            proposal.id,
            proposal.title,
            proposal.author_id
        );

        Ok(proposal)
    }

    /// Gets a draft owned by the given user.
    ///
    /// # Returns
    /// - `Ok(Proposal)`: The draft
    /// - `Err(AppError::NotFound)`: No such draft, not a draft anymore, or owned by another user
    pub async fn get_own_draft(&self, author_id: u64, proposal_id: i32) -> Result<Proposal, AppError> {
        let proposal = ProposalRepository::new(self.db)
            .find_by_id(proposal_id)
            .await?
            .filter(|p| p.author_id == author_id && p.is_draft())
            .ok_or_else(|| AppError::NotFound(format!("Draft #{} was not found", proposal_id)))?;

        Ok(proposal)
    }

    pub async fn list_drafts(&self, guild_id: u64, author_id: u64) -> Result<Vec<Proposal>, AppError> {
        Ok(ProposalRepository::new(self.db)
            .get_drafts_by_author(guild_id, author_id)
            .await?)
    }

    /// Deletes a draft owned by the given user.
    pub async fn delete_draft(&self, author_id: u64, proposal_id: i32) -> Result<(), AppError> {
        self.get_own_draft(author_id, proposal_id).await?;

        if !ProposalRepository::new(self.db)
            .delete_draft(proposal_id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "Draft #{} was not found",
                proposal_id
            )));
        }

        tracing::info!("Deleted draft #{} of user {}", proposal_id, author_id);

        Ok(())
    }

    /// Loads a draft for publishing and validates its category.
    ///
    /// Runs before any Discord call so an invalid draft never produces messages.
    ///
    /// # Returns
    /// - `Ok((Proposal, ProposalCategory))`: The draft and its parsed category
    /// - `Err(AppError::NotFound)`: No such draft owned by the user in this guild
    /// - `Err(AppError::Validation)`: Stored category is outside the enumeration
    pub async fn prepare_publish(
        &self,
        guild_id: u64,
        author_id: u64,
        proposal_id: i32,
    ) -> Result<(Proposal, ProposalCategory), AppError> {
        let proposal = self.get_own_draft(author_id, proposal_id).await?;

        if proposal.guild_id != guild_id {
            return Err(AppError::NotFound(format!(
                "Draft #{} was not found",
                proposal_id
            )));
        }

        let category = proposal.category()?;

        Ok((proposal, category))
    }

    /// Stores a published vote and marks its proposal published, atomically.
    ///
    /// # Returns
    /// - `Ok(OngoingVote)`: Vote stored
    /// - `Err(AppError::Validation)`: The proposal stopped being a draft in the meantime
    pub async fn record_publication(
        &self,
        param: CreateOngoingVoteParam,
    ) -> Result<OngoingVote, AppError> {
        let proposal_id = param.proposal_id;
        let txn = self.db.begin().await?;

        let moved = ProposalRepository::new(&txn)
            .transition_status(proposal_id, ProposalStatus::Draft, ProposalStatus::Published)
            .await?;
        if !moved {
            txn.rollback().await?;
            return Err(AppError::Validation(format!(
                "Proposal #{} is no longer a draft",
                proposal_id
            )));
        }

        let vote = OngoingVoteRepository::new(&txn).create(param).await?;
        txn.commit().await?;

        Ok(vote)
    }
}

fn title_taken(title: &str) -> AppError {
    AppError::Validation(format!(
        "A proposal titled \"{}\" already exists in this server",
        title
    ))
}

/// Maps a write that lost a title race to the unique index onto the duplicate-title error.
fn unique_title_violation(err: DbErr, title: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => title_taken(title),
        _ => err.into(),
    }
}

fn validate_content(title: &str, abstract_text: &str, background: &str) -> Result<(), AppError> {
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if abstract_text.trim().is_empty() || background.trim().is_empty() {
        return Err(AppError::Validation(
            "Abstract and background must not be empty".to_string(),
        ));
    }

    Ok(())
}
