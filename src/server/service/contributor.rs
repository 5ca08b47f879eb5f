//! Contributor registry and mention history.

use sea_orm::DatabaseConnection;

use crate::{
    model::contributor::{ContributorDto, ContributorMentionsDto, MentionDto},
    server::{
        data::{contributor::ContributorRepository, mention::MentionRepository},
        error::AppError,
        model::{
            contributor::{Contributor, CreateContributorParam},
            mention::{CreateMentionParam, Mention},
        },
        util::discord::message_link,
    },
};

/// Number of mentions shown by `/mentions` and the API.
pub const RECENT_MENTIONS: u64 = 10;

pub struct ContributorService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContributorService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a user as contributor with an emoji marker.
    ///
    /// Registering an existing contributor again replaces their note and marker.
    ///
    /// # Returns
    /// - `Ok(Contributor)`: The active registration
    /// - `Err(AppError::Validation)`: Empty marker, or the marker belongs to another user
    pub async fn add(&self, param: CreateContributorParam) -> Result<Contributor, AppError> {
        let emoji = param.emoji.trim().to_string();
        if emoji.is_empty() {
            return Err(AppError::Validation("Emoji marker must not be empty".to_string()));
        }

        let repo = ContributorRepository::new(self.db);
        if let Some(owner) = repo.find_by_emoji(param.guild_id, &emoji).await? {
            if owner.user_id != param.user_id {
                return Err(AppError::Validation(format!(
                    "{} is already the marker of <@{}>",
                    emoji, owner.user_id
                )));
            }
        }

        let contributor = repo
            .upsert(CreateContributorParam {
                emoji,
                note: param.note.trim().to_string(),
                ..param
            })
            .await?;

        tracing::info!(
            "Registered contributor {} with marker {} in guild {}",
            contributor.user_id,
            contributor.emoji,
            contributor.guild_id
        );

        Ok(contributor)
    }

    /// Stops relaying a contributor's marker.
    pub async fn remove(&self, guild_id: u64, user_id: u64) -> Result<(), AppError> {
        if !ContributorRepository::new(self.db)
            .deactivate(guild_id, user_id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "<@{}> is not a registered contributor",
                user_id
            )));
        }

        tracing::info!("Removed contributor {} in guild {}", user_id, guild_id);

        Ok(())
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<Contributor>, AppError> {
        Ok(ContributorRepository::new(self.db)
            .get_active_by_guild(guild_id)
            .await?)
    }

    /// Finds the active contributors whose marker occurs in a message.
    ///
    /// Each contributor is returned at most once however often their marker occurs.
    pub async fn match_content(
        &self,
        guild_id: u64,
        content: &str,
    ) -> Result<Vec<Contributor>, AppError> {
        let contributors = self.list(guild_id).await?;

        Ok(contributors_in_content(&contributors, content)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Finds the active contributor owning a reaction emoji.
    pub async fn match_reaction(
        &self,
        guild_id: u64,
        emoji: &str,
    ) -> Result<Option<Contributor>, AppError> {
        Ok(ContributorRepository::new(self.db)
            .find_by_emoji(guild_id, emoji)
            .await?
            .filter(|contributor| contributor.active))
    }

    pub async fn record_mention(&self, param: CreateMentionParam) -> Result<Mention, AppError> {
        Ok(MentionRepository::new(self.db).create(param).await?)
    }

    /// Gets a contributor's registration and latest mentions.
    ///
    /// # Returns
    /// - `Ok((Contributor, Vec<Mention>))`: Registration (active or not) and mentions
    /// - `Err(AppError::NotFound)`: The user was never registered in this guild
    pub async fn recent_mentions(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<(Contributor, Vec<Mention>), AppError> {
        let contributor = ContributorRepository::new(self.db)
            .find_by_user(guild_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("<@{}> is not a registered contributor", user_id))
            })?;

        let mentions = MentionRepository::new(self.db)
            .get_recent_by_contributor(contributor.id, RECENT_MENTIONS)
            .await?;

        Ok((contributor, mentions))
    }

    /// Mention history as served by the HTTP API.
    pub async fn get_mentions_dto(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<ContributorMentionsDto, AppError> {
        let (contributor, mentions) = self.recent_mentions(guild_id, user_id).await?;

        Ok(ContributorMentionsDto {
            contributor: ContributorDto {
                user_id: contributor.user_id,
                note: contributor.note,
                emoji: contributor.emoji,
                active: contributor.active,
            },
            mentions: mentions
                .into_iter()
                .map(|mention| MentionDto {
                    author_id: mention.author_id,
                    message_url: message_link(
                        mention.guild_id,
                        mention.channel_id,
                        mention.message_id,
                    ),
                    by_reaction: mention.by_reaction,
                    created_at: mention.created_at,
                })
                .collect(),
        })
    }
}

/// Contributors whose marker occurs in `content`, each at most once.
pub fn contributors_in_content<'c>(
    contributors: &'c [Contributor],
    content: &str,
) -> Vec<&'c Contributor> {
    let mut matched: Vec<&Contributor> = Vec::new();

    for contributor in contributors {
        if contributor.emoji.is_empty() || !content.contains(contributor.emoji.as_str()) {
            continue;
        }
        if matched.iter().any(|m| m.user_id == contributor.user_id) {
            continue;
        }
        matched.push(contributor);
    }

    matched
}
