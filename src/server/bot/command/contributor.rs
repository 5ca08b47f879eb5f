use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
};

use crate::server::{
    bot::command::{ephemeral, option_str, option_user, require_core, require_guild},
    error::AppError,
    model::{
        contributor::{Contributor, CreateContributorParam},
        mention::Mention,
    },
    service::contributor::ContributorService,
    state::AppState,
    util::discord::{message_link, split_message, MESSAGE_LIMIT},
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("add_contributor")
            .description("Register a contributor and their emoji marker (core only)")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Contributor")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "emoji",
                    "Emoji that relays mentions to the contributor",
                )
                .required(true),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "note",
                "What the contributor works on",
            )),
        CreateCommand::new("remove_contributor")
            .description("Stop relaying a contributor's marker (core only)")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Contributor")
                    .required(true),
            ),
        CreateCommand::new("contributors").description("List the registered contributors"),
        CreateCommand::new("mentions").description("Show your most recent relayed mentions"),
    ]
}

pub async fn add_contributor(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    require_core(state, ctx, guild_id, cmd.member.as_deref()).await?;

    let user_id = option_user(cmd, "user")
        .ok_or_else(|| AppError::Validation("A user is required".to_string()))?;

    let contributor = ContributorService::new(&state.db)
        .add(CreateContributorParam {
            guild_id,
            user_id: user_id.get(),
            note: option_str(cmd, "note").unwrap_or_default().to_string(),
            emoji: option_str(cmd, "emoji").unwrap_or_default().to_string(),
        })
        .await?;

    cmd.create_response(
        &ctx.http,
        ephemeral(format!(
            "<@{}> now receives mentions for {}.",
            contributor.user_id, contributor.emoji
        )),
    )
    .await?;

    Ok(())
}

pub async fn remove_contributor(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    require_core(state, ctx, guild_id, cmd.member.as_deref()).await?;

    let user_id = option_user(cmd, "user")
        .ok_or_else(|| AppError::Validation("A user is required".to_string()))?;

    ContributorService::new(&state.db)
        .remove(guild_id, user_id.get())
        .await?;

    cmd.create_response(
        &ctx.http,
        ephemeral(format!("<@{}> is no longer a contributor.", user_id)),
    )
    .await?;

    Ok(())
}

pub async fn contributors(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    let text = contributor_list_text(state, guild_id).await?;

    cmd.create_response(&ctx.http, ephemeral(text)).await?;

    Ok(())
}

pub async fn mentions(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;

    let (contributor, mentions) = ContributorService::new(&state.db)
        .recent_mentions(guild_id, cmd.user.id.get())
        .await?;

    cmd.create_response(&ctx.http, ephemeral(format_mentions(&contributor, &mentions)))
        .await?;

    Ok(())
}

/// Contributor list shared by `/contributors` and `!contributors`, cut to one message.
pub async fn contributor_list_text(state: &AppState, guild_id: u64) -> Result<String, AppError> {
    let contributors = ContributorService::new(&state.db).list(guild_id).await?;

    Ok(split_message(&format_contributor_list(&contributors), MESSAGE_LIMIT)
        .into_iter()
        .next()
        .unwrap_or_default())
}

pub fn format_contributor_list(contributors: &[Contributor]) -> String {
    if contributors.is_empty() {
        return "No contributors are registered.".to_string();
    }

    contributors
        .iter()
        .map(|contributor| {
            if contributor.note.is_empty() {
                format!("{} <@{}>", contributor.emoji, contributor.user_id)
            } else {
                format!(
                    "{} <@{}> - {}",
                    contributor.emoji, contributor.user_id, contributor.note
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_mentions(contributor: &Contributor, mentions: &[Mention]) -> String {
    if mentions.is_empty() {
        return format!("Nobody has used {} yet.", contributor.emoji);
    }

    let lines = mentions
        .iter()
        .map(|mention| {
            let how = if mention.by_reaction {
                "reacted"
            } else {
                "wrote"
            };
            format!(
                "<t:{}:R> <@{}> {}: {}",
                mention.created_at.timestamp(),
                mention.author_id,
                how,
                message_link(mention.guild_id, mention.channel_id, mention.message_id)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Recent mentions of {}:\n{}", contributor.emoji, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contributor(note: &str) -> Contributor {
        Contributor {
            id: 1,
            guild_id: 1,
            user_id: 10,
            note: note.to_string(),
            emoji: "🌿".to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lists_contributors_with_notes() {
        let text = format_contributor_list(&[contributor("Docs"), contributor("")]);

        assert_eq!(text, "🌿 <@10> - Docs\n🌿 <@10>");
    }

    #[test]
    fn formats_mention_links() {
        let mention = Mention {
            id: 1,
            contributor_id: 1,
            guild_id: 1,
            channel_id: 2,
            message_id: 3,
            author_id: 4,
            by_reaction: true,
            created_at: Utc::now(),
        };

        let text = format_mentions(&contributor("Docs"), &[mention]);

        assert!(text.contains("<@4> reacted: https://discord.com/channels/1/2/3"));
    }
}
