//! Slash commands, prefix commands and interactive components.
//!
//! Every command handler returns `Result<(), AppError>`; the dispatchers here turn errors into
//! an ephemeral reply built from [`AppError::user_message`].

pub mod contributor;
pub mod event;
pub mod help;
pub mod prefix;
pub mod proposal;

use std::collections::HashMap;

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, GuildId, Member,
    ModalInteraction, Role, RoleId, UserId,
};

use crate::server::{error::AppError, state::AppState};

/// Every slash command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    let mut commands = proposal::register();
    commands.extend(event::register());
    commands.extend(contributor::register());
    commands.push(help::register());
    commands
}

pub async fn dispatch_command(state: &AppState, ctx: &Context, cmd: CommandInteraction) {
    tracing::debug!(
        "/{} used by {} in guild {:?}",
        cmd.data.name,
        cmd.user.id,
        cmd.guild_id
    );

    let result = match cmd.data.name.as_str() {
        "vote_draft" => proposal::vote_draft(state, ctx, &cmd).await,
        "publish_draft" => proposal::publish_draft(state, ctx, &cmd).await,
        "cancel_vote" => proposal::cancel_vote(state, ctx, &cmd).await,
        "list_events" => event::list_events(state, ctx, &cmd).await,
        "delete_event" => event::delete_event(state, ctx, &cmd).await,
        "add_contributor" => contributor::add_contributor(state, ctx, &cmd).await,
        "remove_contributor" => contributor::remove_contributor(state, ctx, &cmd).await,
        "contributors" => contributor::contributors(state, ctx, &cmd).await,
        "mentions" => contributor::mentions(state, ctx, &cmd).await,
        "help" => help::help(ctx, &cmd).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(())
        }
    };

    if let Err(e) = result {
        let message = e.user_message();
        if cmd.create_response(&ctx.http, ephemeral(&message)).await.is_err() {
            if let Err(e) = cmd
                .edit_response(&ctx.http, EditInteractionResponse::new().content(message))
                .await
            {
                tracing::warn!("Failed to report error for /{}: {}", cmd.data.name, e);
            }
        }
    }
}

pub async fn dispatch_component(state: &AppState, ctx: &Context, comp: ComponentInteraction) {
    if let Err(e) = proposal::handle_component(state, ctx, &comp).await {
        let message = e.user_message();
        if comp.create_response(&ctx.http, ephemeral(&message)).await.is_err() {
            if let Err(e) = comp
                .edit_response(&ctx.http, EditInteractionResponse::new().content(message))
                .await
            {
                tracing::warn!("Failed to report error for {}: {}", comp.data.custom_id, e);
            }
        }
    }
}

pub async fn dispatch_modal(state: &AppState, ctx: &Context, modal: ModalInteraction) {
    if let Err(e) = proposal::handle_modal(state, ctx, &modal).await {
        if let Err(e) = modal
            .create_response(&ctx.http, ephemeral(e.user_message()))
            .await
        {
            tracing::warn!("Failed to report error for {}: {}", modal.data.custom_id, e);
        }
    }
}

/// Reply only the invoking user sees.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

pub fn require_guild(guild_id: Option<GuildId>) -> Result<u64, AppError> {
    guild_id
        .map(|id| id.get())
        .ok_or_else(|| AppError::Validation("This command can only be used in a server".to_string()))
}

pub fn option_i64(cmd: &CommandInteraction, name: &str) -> Option<i64> {
    cmd.data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

pub fn option_str<'c>(cmd: &'c CommandInteraction, name: &str) -> Option<&'c str> {
    cmd.data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

pub fn option_user(cmd: &CommandInteraction, name: &str) -> Option<UserId> {
    cmd.data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_user_id())
}

/// Reads a proposal id option, rejecting values outside the id range.
pub fn option_proposal_id(cmd: &CommandInteraction) -> Result<Option<i32>, AppError> {
    option_i64(cmd, "proposal_id")
        .map(|id| {
            i32::try_from(id)
                .map_err(|_| AppError::Validation(format!("{} is not a valid proposal id", id)))
        })
        .transpose()
}

/// Checks the caller holds the core role or is an administrator.
///
/// # Returns
/// - `Ok(())`: Caller may use privileged commands
/// - `Err(AppError::Permission)`: Caller lacks the role, no state is changed
pub async fn require_core(
    state: &AppState,
    ctx: &Context,
    guild_id: u64,
    member: Option<&Member>,
) -> Result<(), AppError> {
    let role_name = &state.config.core_role_name;
    let denied = || AppError::Permission(format!("Only members with the {} role can do this", role_name));

    let member = member.ok_or_else(denied)?;
    if member
        .permissions
        .is_some_and(|permissions| permissions.administrator())
    {
        return Ok(());
    }

    let roles = GuildId::new(guild_id).roles(&ctx.http).await?;
    if has_named_role(&member.roles, &roles, role_name) {
        Ok(())
    } else {
        Err(denied())
    }
}

/// Whether any of the member's roles carries the given name, ignoring case.
pub fn has_named_role(member_roles: &[RoleId], roles: &HashMap<RoleId, Role>, name: &str) -> bool {
    member_roles
        .iter()
        .filter_map(|id| roles.get(id))
        .any(|role| role.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_role;

    fn guild_roles() -> HashMap<RoleId, Role> {
        [create_test_role(1, "Core", 0), create_test_role(2, "member", 0)]
            .into_iter()
            .map(|role| (role.id, role))
            .collect()
    }

    #[test]
    fn matches_core_role_ignoring_case() {
        assert!(has_named_role(&[RoleId::new(2), RoleId::new(1)], &guild_roles(), "core"));
    }

    #[test]
    fn rejects_member_without_core_role() {
        assert!(!has_named_role(&[RoleId::new(2)], &guild_roles(), "core"));
        assert!(!has_named_role(&[RoleId::new(3)], &guild_roles(), "core"));
    }

    #[test]
    fn requires_guild() {
        assert_eq!(require_guild(Some(GuildId::new(5))).unwrap(), 5);
        assert!(matches!(require_guild(None), Err(AppError::Validation(_))));
    }
}
