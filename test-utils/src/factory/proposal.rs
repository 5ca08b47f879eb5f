//! Proposal factory for creating test proposals in any lifecycle state.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test proposals with customizable fields.
///
/// Defaults to a `general` draft with a unique title, guild and author.
///
/// ```rust,ignore
/// let proposal = ProposalFactory::new(&db)
///     .author_id("123456789")
///     .status("published")
///     .build()
///     .await?;
/// ```
pub struct ProposalFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    author_id: String,
    title: String,
    category: String,
    abstract_text: String,
    background: String,
    additional: Option<String>,
    status: String,
}

impl<'a> ProposalFactory<'a> {
    /// Creates a new ProposalFactory with default values.
    ///
    /// Defaults:
    /// - guild_id / author_id: unique snowflake-like ids
    /// - title: `"Proposal {id}"`
    /// - category: `"general"`
    /// - status: `"draft"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: next_id().to_string(),
            author_id: next_id().to_string(),
            title: format!("Proposal {}", id),
            category: "general".to_string(),
            abstract_text: "A short abstract".to_string(),
            background: "Some background".to_string(),
            additional: None,
            status: "draft".to_string(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the raw category string; values outside the enumeration are allowed here so
    /// tests can exercise validation on stored data.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn additional(mut self, additional: Option<String>) -> Self {
        self.additional = additional;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the proposal entity into the database.
    pub async fn build(self) -> Result<entity::proposal::Model, DbErr> {
        let now = Utc::now();
        entity::proposal::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            category: ActiveValue::Set(self.category),
            abstract_text: ActiveValue::Set(self.abstract_text),
            background: ActiveValue::Set(self.background),
            additional: ActiveValue::Set(self.additional),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a draft proposal with default values.
pub async fn create_proposal(db: &DatabaseConnection) -> Result<entity::proposal::Model, DbErr> {
    ProposalFactory::new(db).build().await
}
