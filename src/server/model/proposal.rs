//! Proposal domain models and parameters.
//!
//! A proposal is authored as a draft, published into a vote thread, and ends either
//! concluded (vote window elapsed) or cancelled. Only drafts can be edited or deleted.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::fmt;
use std::str::FromStr;

use crate::server::error::AppError;

/// Kind of proposal, which decides the channel it is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalCategory {
    General,
    Budget,
}

impl ProposalCategory {
    pub const ALL: [ProposalCategory; 2] = [ProposalCategory::General, ProposalCategory::Budget];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Budget => "budget",
        }
    }

    /// Human readable label used in embeds and command choices.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Budget => "Budget",
        }
    }
}

impl fmt::Display for ProposalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalCategory {
    type Err = AppError;

    /// Parses a category case-insensitively.
    ///
    /// # Returns
    /// - `Ok(ProposalCategory)` - Known category
    /// - `Err(AppError::Validation)` - Anything other than `general` or `budget`
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "budget" => Ok(Self::Budget),
            other => Err(AppError::Validation(format!(
                "Unknown proposal category `{}`, expected `general` or `budget`",
                other
            ))),
        }
    }
}

/// Lifecycle state of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    Draft,
    Published,
    Concluded,
    Cancelled,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Concluded => "concluded",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ProposalStatus {
    type Err = DbErr;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "concluded" => Ok(Self::Concluded),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DbErr::Custom(format!("Unknown proposal status: {}", other))),
        }
    }
}

/// A proposal in any lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub id: i32,
    pub guild_id: u64,
    pub author_id: u64,
    pub title: String,
    /// Category as stored; parsed with [`Proposal::category`] when it matters.
    pub category: String,
    pub abstract_text: String,
    pub background: String,
    pub additional: Option<String>,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Proposal {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Proposal)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored ids are not valid u64 or the status is unknown
    pub fn from_entity(entity: entity::proposal::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;
        let author_id = entity
            .author_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse author_id: {}", e)))?;

        Ok(Self {
            id: entity.id,
            guild_id,
            author_id,
            title: entity.title,
            category: entity.category,
            abstract_text: entity.abstract_text,
            background: entity.background,
            additional: entity.additional,
            status: entity.status.parse()?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Parses the stored category.
    ///
    /// # Returns
    /// - `Ok(ProposalCategory)` - Category is known
    /// - `Err(AppError::Validation)` - Category is not `general` or `budget`
    pub fn category(&self) -> Result<ProposalCategory, AppError> {
        self.category.parse()
    }

    pub fn is_draft(&self) -> bool {
        self.status == ProposalStatus::Draft
    }
}

/// Draft content as submitted through the draft form.
///
/// `proposal_id` is set when an existing draft is being edited.
#[derive(Debug, Clone)]
pub struct SaveDraftParam {
    pub proposal_id: Option<i32>,
    pub guild_id: u64,
    pub author_id: u64,
    pub title: String,
    pub category: String,
    pub abstract_text: String,
    pub background: String,
    pub additional: Option<String>,
}

/// Parameters for inserting a new draft.
#[derive(Debug, Clone)]
pub struct CreateProposalParam {
    pub guild_id: u64,
    pub author_id: u64,
    pub title: String,
    pub category: ProposalCategory,
    pub abstract_text: String,
    pub background: String,
    pub additional: Option<String>,
}

/// Parameters for replacing the content of an existing draft.
#[derive(Debug, Clone)]
pub struct UpdateProposalParam {
    pub id: i32,
    pub title: String,
    pub category: ProposalCategory,
    pub abstract_text: String,
    pub background: String,
    pub additional: Option<String>,
}
