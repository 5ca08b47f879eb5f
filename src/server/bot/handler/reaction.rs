use serenity::all::{Context, Reaction};

use crate::server::{
    service::relay::{MentionRelayService, MentionSource},
    state::AppState,
};

/// Relays a reaction whose emoji is a contributor marker.
pub async fn handle_reaction_add(state: &AppState, ctx: Context, reaction: Reaction) {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };
    if reaction.member.as_ref().is_some_and(|member| member.user.bot)
        || user_id == ctx.cache.current_user().id
    {
        return;
    }

    let source = MentionSource {
        guild_id: guild_id.get(),
        channel_id: reaction.channel_id.get(),
        message_id: reaction.message_id.get(),
        author_id: user_id.get(),
    };
    let emoji = reaction.emoji.to_string();

    match MentionRelayService::new(&state.db, state.discord_http.clone())
        .relay_reaction(source, &emoji)
        .await
    {
        Ok(true) => tracing::debug!(
            "Relayed reaction {} on message {}",
            emoji,
            reaction.message_id
        ),
        Ok(false) => {}
        Err(e) => tracing::error!(
            "Failed to relay reaction on message {}: {}",
            reaction.message_id,
            e
        ),
    }
}
