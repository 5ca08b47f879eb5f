use serenity::all::{
    Context, EventHandler, Guild, Interaction, Message, Reaction, Ready, ScheduledEvent,
    UnavailableGuild,
};
use serenity::async_trait;

use crate::server::state::AppState;

pub mod guild;
pub mod interaction;
pub mod message;
pub mod reaction;
pub mod ready;
pub mod scheduled_event;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.state.db, ctx, guild, is_new).await;
    }

    /// Called when the bot leaves a guild or a guild becomes unavailable
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(&self.state.db, ctx, incomplete, full).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.state, ctx, message).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.state, ctx, reaction).await;
    }

    /// Called when a scheduled event is created in a guild
    async fn guild_scheduled_event_create(&self, ctx: Context, event: ScheduledEvent) {
        scheduled_event::handle_scheduled_event_create(&self.state, ctx, event).await;
    }

    /// Called for slash commands, components and modal submits
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }
}
