//! Announcements of guild scheduled events.
//!
//! Two paths announce events into the configured events channel: a periodic poll posting
//! events that start soon, and a delayed notice after an event is created. Each path claims
//! the event in the announcement ledger before posting, so neither announces an event twice.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, GuildId, ScheduledEventId},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    config::Config,
    data::{discord_guild::DiscordGuildRepository, event_announcement::EventAnnouncementRepository},
    error::AppError,
    model::event::{EventAnnouncement, UpcomingEvent},
    util::discord::{find_text_channel, to_discord_timestamp},
};

/// Discord accepts at most this many embeds per message.
const EMBEDS_PER_MESSAGE: usize = 10;

const COLOR_UPCOMING: u32 = 0xf39c12;
const COLOR_CREATED: u32 = 0x9b59b6;

#[derive(Debug, Clone)]
pub struct EventSettings {
    pub channel_name: String,
    /// How far ahead of now an event must start to be part of a periodic post.
    pub lookahead: Duration,
    /// Wait between an event's creation and its announcement, giving organizers time to
    /// fix typos or delete it again.
    pub creation_delay: Duration,
}

impl EventSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            channel_name: config.events_channel_name.clone(),
            lookahead: config.event_lookahead,
            creation_delay: config.event_creation_delay,
        }
    }
}

pub struct EventNotificationService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
    settings: &'a EventSettings,
}

impl<'a> EventNotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>, settings: &'a EventSettings) -> Self {
        Self { db, http, settings }
    }

    /// Runs one poll over every guild the bot knows.
    ///
    /// A failing guild is logged and does not stop the others; it is retried on the next tick.
    pub async fn poll_all(&self) -> Result<(), AppError> {
        let guilds = DiscordGuildRepository::new(self.db).get_all().await?;

        for guild in guilds {
            match self.poll_guild(guild.guild_id).await {
                Ok(0) => {}
                Ok(posted) => tracing::info!(
                    "Announced {} upcoming events in guild {} ({})",
                    posted,
                    guild.name,
                    guild.guild_id
                ),
                Err(e) => tracing::error!(
                    "Failed to poll events of guild {} ({}): {}",
                    guild.name,
                    guild.guild_id,
                    e
                ),
            }
        }

        Ok(())
    }

    /// Announces the guild's not yet announced events starting within the look-ahead.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of events announced
    /// - `Err(AppError)`: Discord or database failure
    pub async fn poll_guild(&self, guild_id: u64) -> Result<usize, AppError> {
        let Some(channel_id) = self.events_channel(guild_id).await? else {
            tracing::warn!(
                "Guild {} has no #{} channel, skipping event poll",
                guild_id,
                self.settings.channel_name
            );
            return Ok(0);
        };

        let events = self.fetch_events(guild_id).await?;
        let claimed = self.claim_upcoming(guild_id, events, Utc::now()).await?;

        let repo = EventAnnouncementRepository::new(self.db);
        let mut posted = 0;

        for batch in claimed.chunks(EMBEDS_PER_MESSAGE) {
            let embeds = batch
                .iter()
                .map(|event| event_embed(event, COLOR_UPCOMING))
                .collect::<Result<Vec<_>, _>>()?;

            let message = CreateMessage::new()
                .content(format!(
                    "**Upcoming events in the next {} hours**",
                    self.settings.lookahead.num_hours()
                ))
                .embeds(embeds);

            match channel_id.send_message(&self.http, message).await {
                Ok(_) => posted += batch.len(),
                Err(e) => {
                    tracing::error!(
                        "Failed to announce {} events in guild {}: {}",
                        batch.len(),
                        guild_id,
                        e
                    );
                    for event in batch {
                        repo.release_posted(event.id).await?;
                    }
                }
            }
        }

        Ok(posted)
    }

    /// Selects the events starting within the look-ahead and claims the unannounced ones.
    ///
    /// # Arguments
    /// - `guild_id`: Guild the events belong to
    /// - `events`: The guild's scheduled events
    /// - `now`: Start of the look-ahead window
    ///
    /// # Returns
    /// - `Ok(Vec<UpcomingEvent>)`: Events claimed by this call, soonest first
    pub async fn claim_upcoming(
        &self,
        guild_id: u64,
        events: Vec<UpcomingEvent>,
        now: DateTime<Utc>,
    ) -> Result<Vec<UpcomingEvent>, AppError> {
        let repo = EventAnnouncementRepository::new(self.db);

        let mut upcoming: Vec<UpcomingEvent> = events
            .into_iter()
            .filter(|event| event.starts_within(now, self.settings.lookahead))
            .collect();
        upcoming.sort_by_key(|event| event.start_time);

        let mut claimed = Vec::new();
        for event in upcoming {
            if repo.claim_posted(guild_id, event.id).await? {
                claimed.push(event);
            } else {
                tracing::debug!("Event {} was already announced, skipping", event.id);
            }
        }

        Ok(claimed)
    }

    /// Announces a newly created event once the creation delay has passed.
    ///
    /// The event is fetched again first; if it was deleted or cancelled in the meantime
    /// nothing is posted.
    ///
    /// # Returns
    /// - `Ok(true)`: Announcement posted
    /// - `Ok(false)`: Event gone, no events channel, or already announced
    pub async fn announce_created(&self, guild_id: u64, event_id: u64) -> Result<bool, AppError> {
        let event = match GuildId::new(guild_id)
            .scheduled_event(&self.http, ScheduledEventId::new(event_id), false)
            .await
        {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!("Event {} is gone, not announcing: {}", event_id, e);
                return Ok(false);
            }
        };
        let Some(event) = UpcomingEvent::from_scheduled_event(&event) else {
            return Ok(false);
        };

        let Some(channel_id) = self.events_channel(guild_id).await? else {
            tracing::warn!(
                "Guild {} has no #{} channel, not announcing event {}",
                guild_id,
                self.settings.channel_name,
                event_id
            );
            return Ok(false);
        };

        let embed = event_embed(&event, COLOR_CREATED)?;

        let repo = EventAnnouncementRepository::new(self.db);
        if !repo.claim_notified(guild_id, event_id).await? {
            return Ok(false);
        }

        if let Err(e) = channel_id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .content("**New event scheduled**")
                    .embed(embed),
            )
            .await
        {
            repo.release_notified(event_id).await?;
            return Err(e.into());
        }

        tracing::info!("Announced new event {} in guild {}", event.name, guild_id);

        Ok(true)
    }

    /// Lists the guild's scheduled events with their ledger state.
    pub async fn list_events(
        &self,
        guild_id: u64,
    ) -> Result<Vec<(UpcomingEvent, Option<EventAnnouncement>)>, AppError> {
        let repo = EventAnnouncementRepository::new(self.db);
        let mut events = self.fetch_events(guild_id).await?;
        events.sort_by_key(|event| event.start_time);

        let mut listed = Vec::with_capacity(events.len());
        for event in events {
            let announcement = repo.find_by_event_id(event.id).await?;
            listed.push((event, announcement));
        }

        Ok(listed)
    }

    /// Deletes a scheduled event from the guild and forgets its announcements.
    pub async fn delete_event(&self, guild_id: u64, event_id: u64) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .delete_scheduled_event(&self.http, ScheduledEventId::new(event_id))
            .await
            .map_err(|e| {
                tracing::debug!("Failed to delete event {}: {}", event_id, e);
                AppError::NotFound(format!("Event {} was not found in this server", event_id))
            })?;

        EventAnnouncementRepository::new(self.db)
            .delete(event_id)
            .await?;

        tracing::info!("Deleted event {} from guild {}", event_id, guild_id);

        Ok(())
    }

    async fn fetch_events(&self, guild_id: u64) -> Result<Vec<UpcomingEvent>, AppError> {
        let events = GuildId::new(guild_id)
            .scheduled_events(&self.http, false)
            .await?;

        Ok(events
            .iter()
            .filter_map(UpcomingEvent::from_scheduled_event)
            .collect())
    }

    async fn events_channel(&self, guild_id: u64) -> Result<Option<ChannelId>, AppError> {
        let channels = GuildId::new(guild_id).channels(&self.http).await?;

        Ok(find_text_channel(&channels, &self.settings.channel_name))
    }
}

/// Builds the embed announcing a single event.
fn event_embed(event: &UpcomingEvent, color: u32) -> Result<CreateEmbed, AppError> {
    let start = event.start_time.timestamp();
    let mut embed = CreateEmbed::new()
        .title(&event.name)
        .url(event.url())
        .color(color)
        .field("Starts", format!("<t:{0}:F> (<t:{0}:R>)", start), false)
        .timestamp(to_discord_timestamp(event.start_time)?);

    if let Some(description) = &event.description {
        embed = embed.description(description);
    }

    match (&event.location, event.channel_id) {
        (Some(location), _) => embed = embed.field("Where", location, false),
        (None, Some(channel_id)) => embed = embed.field("Where", format!("<#{}>", channel_id), false),
        (None, None) => {}
    }

    Ok(embed)
}
