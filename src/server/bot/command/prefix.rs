//! Legacy `!` commands, read-only mirrors of their slash counterparts.

use serenity::all::{Context, CreateMessage, Message};

use crate::server::{
    bot::command::{contributor, event, help::HELP_TEXT},
    error::AppError,
    model::proposal::Proposal,
    service::proposal::ProposalService,
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCommand {
    Help,
    Contributors,
    ListEvents,
    Drafts,
}

/// Parses a message starting with `!` into a known command.
pub fn parse(content: &str) -> Option<PrefixCommand> {
    let name = content.trim().strip_prefix('!')?.split_whitespace().next()?;

    match name.to_ascii_lowercase().as_str() {
        "help" => Some(PrefixCommand::Help),
        "contributors" => Some(PrefixCommand::Contributors),
        "list_events" => Some(PrefixCommand::ListEvents),
        "drafts" => Some(PrefixCommand::Drafts),
        _ => None,
    }
}

/// Runs a prefix command. Drafts are sent by DM, everything else is a reply in the channel.
pub async fn handle(
    state: &AppState,
    ctx: &Context,
    message: &Message,
    command: PrefixCommand,
) -> Result<(), AppError> {
    let Some(guild_id) = message.guild_id.map(|id| id.get()) else {
        return Ok(());
    };

    let text = match command {
        PrefixCommand::Help => HELP_TEXT.to_string(),
        PrefixCommand::Contributors => contributor::contributor_list_text(state, guild_id).await?,
        PrefixCommand::ListEvents => event::event_list_text(state, guild_id).await?,
        PrefixCommand::Drafts => {
            let drafts = ProposalService::new(&state.db)
                .list_drafts(guild_id, message.author.id.get())
                .await?;
            message
                .author
                .id
                .direct_message(&ctx.http, CreateMessage::new().content(format_drafts(&drafts)))
                .await?;
            return Ok(());
        }
    };

    message.reply(&ctx.http, text).await?;

    Ok(())
}

fn format_drafts(drafts: &[Proposal]) -> String {
    if drafts.is_empty() {
        return "You have no drafts. Create one with /vote_draft.".to_string();
    }

    let lines = drafts
        .iter()
        .map(|draft| format!("#{} **{}** ({})", draft.id, draft.title, draft.category))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Your drafts:\n{}", lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse("!help"), Some(PrefixCommand::Help));
        assert_eq!(parse("  !Contributors please"), Some(PrefixCommand::Contributors));
        assert_eq!(parse("!list_events"), Some(PrefixCommand::ListEvents));
        assert_eq!(parse("!drafts"), Some(PrefixCommand::Drafts));
    }

    #[test]
    fn ignores_other_messages() {
        assert_eq!(parse("help"), None);
        assert_eq!(parse("!unknown"), None);
        assert_eq!(parse("!"), None);
    }
}
