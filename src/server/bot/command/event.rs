use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    EditInteractionResponse,
};

use crate::server::{
    bot::command::{option_str, require_core, require_guild},
    error::AppError,
    model::event::{EventAnnouncement, UpcomingEvent},
    service::event_notification::EventNotificationService,
    state::AppState,
    util::discord::{split_message, MESSAGE_LIMIT},
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("list_events")
            .description("List this server's scheduled events and whether they were announced"),
        CreateCommand::new("delete_event")
            .description("Delete a scheduled event (core only)")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "event_id",
                    "Id of the scheduled event",
                )
                .required(true),
            ),
    ]
}

pub async fn list_events(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    cmd.defer_ephemeral(&ctx.http).await?;

    let text = event_list_text(state, guild_id).await?;

    cmd.edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await?;

    Ok(())
}

pub async fn delete_event(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    require_core(state, ctx, guild_id, cmd.member.as_deref()).await?;

    let raw = option_str(cmd, "event_id").unwrap_or_default().trim();
    let event_id: u64 = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("{} is not a valid event id", raw)))?;

    cmd.defer_ephemeral(&ctx.http).await?;

    EventNotificationService::new(&state.db, state.discord_http.clone(), &state.event_settings)
        .delete_event(guild_id, event_id)
        .await?;

    cmd.edit_response(
        &ctx.http,
        EditInteractionResponse::new().content(format!("Deleted event {}.", event_id)),
    )
    .await?;

    Ok(())
}

/// Event list shared by `/list_events` and `!list_events`, cut to one message.
pub async fn event_list_text(state: &AppState, guild_id: u64) -> Result<String, AppError> {
    let events =
        EventNotificationService::new(&state.db, state.discord_http.clone(), &state.event_settings)
            .list_events(guild_id)
            .await?;

    Ok(split_message(&format_event_list(&events), MESSAGE_LIMIT)
        .into_iter()
        .next()
        .unwrap_or_default())
}

pub fn format_event_list(events: &[(UpcomingEvent, Option<EventAnnouncement>)]) -> String {
    if events.is_empty() {
        return "No scheduled events.".to_string();
    }

    events
        .iter()
        .map(|(event, announcement)| {
            let posted = announcement.as_ref().is_some_and(|a| a.posted_at.is_some());
            let notified = announcement.as_ref().is_some_and(|a| a.notified_at.is_some());
            let status = match (posted, notified) {
                (true, true) => "announced, notified",
                (true, false) => "announced",
                (false, true) => "notified",
                (false, false) => "not announced",
            };
            format!(
                "**{}** <t:{}:f> ({}) `{}`",
                event.name,
                event.start_time.timestamp(),
                status,
                event.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: u64, name: &str) -> UpcomingEvent {
        UpcomingEvent {
            id,
            guild_id: 1,
            name: name.to_string(),
            description: None,
            start_time: Utc.with_ymd_and_hms(2030, 1, 1, 18, 0, 0).unwrap(),
            channel_id: None,
            location: None,
        }
    }

    #[test]
    fn lists_announcement_state() {
        let announced = EventAnnouncement {
            event_id: 10,
            guild_id: 1,
            posted_at: Some(Utc::now()),
            notified_at: None,
        };

        let text = format_event_list(&[
            (event(10, "Garden day"), Some(announced)),
            (event(11, "Town hall"), None),
        ]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Garden day") && lines[0].contains("(announced)"));
        assert!(lines[1].contains("Town hall") && lines[1].contains("(not announced)"));
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(format_event_list(&[]), "No scheduled events.");
    }
}
