use serenity::all::{Context, ScheduledEvent};

use crate::server::{
    service::event_notification::EventNotificationService,
    state::AppState,
    util::retry::{retry_with_backoff, Backoff},
};

/// Announces a newly created event once the creation delay has passed.
///
/// The event is fetched again after the delay, so events deleted in the meantime are never
/// announced.
pub async fn handle_scheduled_event_create(state: &AppState, _ctx: Context, event: ScheduledEvent) {
    let guild_id = event.guild_id.get();
    let event_id = event.id.get();
    let delay = state
        .event_settings
        .creation_delay
        .to_std()
        .unwrap_or_default();

    tracing::debug!(
        "Event {} created in guild {}, announcing in {:?}",
        event.name,
        guild_id,
        delay
    );

    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let service = EventNotificationService::new(
            &state.db,
            state.discord_http.clone(),
            &state.event_settings,
        );
        let label = format!("announce event {}", event_id);

        // Failures are logged inside the retry loop.
        let _ = retry_with_backoff(&label, Backoff::default(), || {
            service.announce_created(guild_id, event_id)
        })
        .await;
    });
}
