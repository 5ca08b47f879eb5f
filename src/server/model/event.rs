//! Scheduled event models for the event notifier.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use serenity::all::{ScheduledEvent, ScheduledEventStatus};

/// A guild scheduled event reduced to what announcements need.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEvent {
    pub id: u64,
    pub guild_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    /// Voice or stage channel the event takes place in.
    pub channel_id: Option<u64>,
    /// Free-form location for external events.
    pub location: Option<String>,
}

impl UpcomingEvent {
    /// Converts a Discord scheduled event.
    ///
    /// # Returns
    /// - `Some(UpcomingEvent)` - Event is scheduled or active with a valid start time
    /// - `None` - Event is completed or cancelled
    pub fn from_scheduled_event(event: &ScheduledEvent) -> Option<Self> {
        if !matches!(
            event.status,
            ScheduledEventStatus::Scheduled | ScheduledEventStatus::Active
        ) {
            return None;
        }

        let start_time = DateTime::<Utc>::from_timestamp(event.start_time.unix_timestamp(), 0)?;

        Some(Self {
            id: event.id.get(),
            guild_id: event.guild_id.get(),
            name: event.name.clone(),
            description: event.description.clone().filter(|d| !d.trim().is_empty()),
            start_time,
            channel_id: event.channel_id.map(|c| c.get()),
            location: event
                .metadata
                .as_ref()
                .and_then(|m| m.location.clone())
                .filter(|l| !l.trim().is_empty()),
        })
    }

    /// Whether the event starts between `now` and `now + window`, inclusive.
    pub fn starts_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.start_time >= now && self.start_time <= now + window
    }

    /// Link that opens the event in the Discord client.
    pub fn url(&self) -> String {
        format!("https://discord.com/events/{}/{}", self.guild_id, self.id)
    }
}

/// Ledger row recording which announcements were made for an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventAnnouncement {
    pub event_id: u64,
    pub guild_id: u64,
    /// Set once the event was part of a periodic upcoming-events post.
    pub posted_at: Option<DateTime<Utc>>,
    /// Set once the event was announced shortly after creation.
    pub notified_at: Option<DateTime<Utc>>,
}

impl EventAnnouncement {
    pub fn from_entity(entity: entity::event_announcement::Model) -> Result<Self, DbErr> {
        let event_id = entity
            .event_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse event_id: {}", e)))?;
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        Ok(Self {
            event_id,
            guild_id,
            posted_at: entity.posted_at,
            notified_at: entity.notified_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_at(start_time: DateTime<Utc>) -> UpcomingEvent {
        UpcomingEvent {
            id: 1,
            guild_id: 2,
            name: "Community call".to_string(),
            description: None,
            start_time,
            channel_id: None,
            location: None,
        }
    }

    #[test]
    fn starts_within_window_bounds() {
        let now = Utc::now();
        let window = Duration::hours(24);

        assert!(event_at(now + Duration::hours(1)).starts_within(now, window));
        assert!(event_at(now + window).starts_within(now, window));
        assert!(!event_at(now + Duration::hours(25)).starts_within(now, window));
        assert!(!event_at(now - Duration::minutes(1)).starts_within(now, window));
    }

    #[test]
    fn builds_event_link() {
        assert_eq!(
            event_at(Utc::now()).url(),
            "https://discord.com/events/2/1"
        );
    }
}
