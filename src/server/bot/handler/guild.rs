use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild, UnavailableGuild};

use crate::server::data::discord_guild::DiscordGuildRepository;

/// Records a guild the bot can see, making it part of the event poll.
///
/// Fires on startup for every guild the bot is in, when the bot joins a guild, and when a
/// guild becomes available again after an outage.
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    _ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    match DiscordGuildRepository::new(db).upsert(&guild).await {
        Ok(_) => tracing::debug!("Guild {} ({}) is available", guild.name, guild_id),
        Err(e) => tracing::error!(
            "Failed to upsert guild {} ({}): {:?}",
            guild_id,
            guild.name,
            e
        ),
    }
}

/// Forgets a guild the bot was removed from, taking it out of the event poll.
///
/// Guilds that only became unavailable because of an outage are kept.
pub async fn handle_guild_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    incomplete: UnavailableGuild,
    _full: Option<Guild>,
) {
    if incomplete.unavailable {
        tracing::debug!("Guild {} is temporarily unavailable", incomplete.id);
        return;
    }

    let guild_id = incomplete.id.get();
    let repo = DiscordGuildRepository::new(db);

    let name = match repo.find_by_guild_id(guild_id).await {
        Ok(Some(guild)) => guild.name,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to query guild {}: {:?}", guild_id, e);
            return;
        }
    };

    match repo.delete(guild_id).await {
        Ok(()) => tracing::info!("Removed from guild {} ({})", name, guild_id),
        Err(e) => tracing::error!("Failed to delete guild {} ({}): {:?}", guild_id, name, e),
    }
}
