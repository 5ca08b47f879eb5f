//! Relays uses of contributor markers to the contributors by direct message.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{CreateEmbed, CreateMessage, UserId},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::AppError,
    model::{contributor::Contributor, mention::CreateMentionParam},
    service::contributor::ContributorService,
    util::discord::message_link,
};

/// Where a marker was used and by whom.
#[derive(Debug, Clone, Copy)]
pub struct MentionSource {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
}

pub struct MentionRelayService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> MentionRelayService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Relays every contributor marker found in a message.
    ///
    /// A contributor whose mention cannot be recorded is logged and skipped; the others are
    /// still relayed to.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of contributors relayed to
    pub async fn relay_message(
        &self,
        source: MentionSource,
        content: &str,
    ) -> Result<usize, AppError> {
        let matched = ContributorService::new(self.db)
            .match_content(source.guild_id, content)
            .await?;

        let mut relayed = 0;
        for contributor in &matched {
            match self.relay(contributor, source, false).await {
                Ok(()) => relayed += 1,
                Err(e) => tracing::error!(
                    "Failed to relay message {} to contributor {}: {}",
                    source.message_id,
                    contributor.user_id,
                    e
                ),
            }
        }

        Ok(relayed)
    }

    /// Relays a reaction if its emoji is a contributor marker.
    ///
    /// # Arguments
    /// - `emoji`: Reaction emoji as rendered in message content
    pub async fn relay_reaction(&self, source: MentionSource, emoji: &str) -> Result<bool, AppError> {
        let Some(contributor) = ContributorService::new(self.db)
            .match_reaction(source.guild_id, emoji)
            .await?
        else {
            return Ok(false);
        };

        self.relay(&contributor, source, true).await?;

        Ok(true)
    }

    /// Records the mention, then notifies the contributor.
    ///
    /// A failed DM (closed DMs, user left) is logged; the mention stays recorded so it shows
    /// up in `/mentions`.
    async fn relay(
        &self,
        contributor: &Contributor,
        source: MentionSource,
        by_reaction: bool,
    ) -> Result<(), AppError> {
        ContributorService::new(self.db)
            .record_mention(CreateMentionParam {
                contributor_id: contributor.id,
                guild_id: source.guild_id,
                channel_id: source.channel_id,
                message_id: source.message_id,
                author_id: source.author_id,
                by_reaction,
            })
            .await?;

        let link = message_link(source.guild_id, source.channel_id, source.message_id);
        let action = if by_reaction {
            "reacted with"
        } else {
            "used"
        };
        let embed = CreateEmbed::new()
            .title("You were mentioned")
            .url(&link)
            .description(format!(
                "<@{}> {} your marker {} in <#{}>.\n[Jump to message]({})",
                source.author_id, action, contributor.emoji, source.channel_id, link
            ));

        if let Err(e) = UserId::new(contributor.user_id)
            .direct_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!(
                "Failed to DM contributor {} about message {}: {}",
                contributor.user_id,
                source.message_id,
                e
            );
        }

        Ok(())
    }
}
