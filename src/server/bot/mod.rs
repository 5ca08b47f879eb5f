//! Discord bot: gateway event handlers and the command surface.
//!
//! The bot runs in its own tokio task next to the HTTP server. Handlers share [`AppState`]
//! with the API and background jobs.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability for the event poll
//! - `GUILD_MESSAGES` and `MESSAGE_CONTENT` - Prefix commands and marker relay
//! - `GUILD_MESSAGE_REACTIONS` - Marker relay on reactions
//! - `GUILD_SCHEDULED_EVENTS` - New event announcements
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be enabled in the Discord
//! Developer Portal for the bot application.
//!
//! [`AppState`]: crate::server::state::AppState

pub mod command;
pub mod handler;
pub mod start;
