use serenity::all::{Context, Message};

use crate::server::{
    bot::command::prefix,
    service::relay::{MentionRelayService, MentionSource},
    state::AppState,
};

/// Runs prefix commands and relays contributor markers in guild messages.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }
    let Some(guild_id) = message.guild_id else {
        return;
    };

    if let Some(command) = prefix::parse(&message.content) {
        if let Err(e) = prefix::handle(state, &ctx, &message, command).await {
            if let Err(e) = message.reply(&ctx.http, e.user_message()).await {
                tracing::warn!("Failed to reply to prefix command: {}", e);
            }
        }
        return;
    }

    let source = MentionSource {
        guild_id: guild_id.get(),
        channel_id: message.channel_id.get(),
        message_id: message.id.get(),
        author_id: message.author.id.get(),
    };

    match MentionRelayService::new(&state.db, state.discord_http.clone())
        .relay_message(source, &message.content)
        .await
    {
        Ok(0) => {}
        Ok(count) => tracing::debug!("Relayed message {} to {} contributors", message.id, count),
        Err(e) => tracing::error!("Failed to relay message {}: {}", message.id, e),
    }
}
