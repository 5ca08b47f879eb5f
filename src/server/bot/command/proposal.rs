//! Drafting, publishing and cancelling proposals.
//!
//! Custom ids of the components created here:
//! - `proposal:modal:new` / `proposal:modal:{id}`: draft modal creating or editing a draft
//! - `proposal:edit:{id}`, `proposal:delete:{id}`, `proposal:publish:{id}`: preview buttons
//! - `proposal:select`: draft picker of `/publish_draft`

use std::collections::HashMap;

use serenity::all::{
    ActionRow, ActionRowComponent, ButtonStyle, CommandInteraction, CommandOptionType,
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateActionRow, CreateButton,
    CreateCommand, CreateCommandOption, CreateEmbed, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateModal, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, EditInteractionResponse, InputTextStyle, ModalInteraction,
};

use crate::server::{
    bot::command::{ephemeral, option_proposal_id, require_core, require_guild},
    data::vote::OngoingVoteRepository,
    error::AppError,
    model::proposal::{Proposal, ProposalCategory, SaveDraftParam},
    service::{
        proposal::{ProposalService, MAX_TITLE_LENGTH},
        vote::VoteService,
    },
    state::AppState,
    util::discord::thread_link,
};

const FIELD_TITLE: &str = "title";
const FIELD_CATEGORY: &str = "category";
const FIELD_ABSTRACT: &str = "abstract";
const FIELD_BACKGROUND: &str = "background";
const FIELD_ADDITIONAL: &str = "additional";

/// Discord caps select menus at 25 options.
const MAX_SELECT_OPTIONS: usize = 25;
/// Discord caps embed field values at 1024 characters.
const MAX_FIELD_LENGTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalComponent {
    Edit(i32),
    Delete(i32),
    Publish(i32),
    Select,
}

/// Parses the custom id of a proposal button or select menu.
pub fn parse_component(custom_id: &str) -> Option<ProposalComponent> {
    let rest = custom_id.strip_prefix("proposal:")?;
    if rest == "select" {
        return Some(ProposalComponent::Select);
    }

    let (action, id) = rest.split_once(':')?;
    let id = id.parse().ok()?;
    match action {
        "edit" => Some(ProposalComponent::Edit(id)),
        "delete" => Some(ProposalComponent::Delete(id)),
        "publish" => Some(ProposalComponent::Publish(id)),
        _ => None,
    }
}

/// Parses the custom id of the draft modal.
///
/// # Returns
/// - `Some(None)`: Modal creating a new draft
/// - `Some(Some(id))`: Modal editing draft `id`
/// - `None`: Not a draft modal
pub fn parse_modal(custom_id: &str) -> Option<Option<i32>> {
    match custom_id.strip_prefix("proposal:modal:")? {
        "new" => Some(None),
        id => id.parse().ok().map(Some),
    }
}

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("vote_draft")
            .description("Create a proposal draft, or edit one of yours")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "proposal_id",
                    "Draft to edit; leave empty to start a new one",
                )
                .min_int_value(1),
            ),
        CreateCommand::new("publish_draft")
            .description("Publish one of your drafts for voting")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "proposal_id",
                    "Draft to publish; leave empty to pick from a list",
                )
                .min_int_value(1),
            ),
        CreateCommand::new("cancel_vote")
            .description("Cancel an ongoing vote (core only)")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "proposal_id",
                    "Proposal whose vote to cancel; defaults to the vote thread you are in",
                )
                .min_int_value(1),
            ),
    ]
}

/// `/vote_draft [proposal_id]`: opens the draft modal, prefilled when editing.
pub async fn vote_draft(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    require_guild(cmd.guild_id)?;

    let draft = match option_proposal_id(cmd)? {
        Some(id) => Some(
            ProposalService::new(&state.db)
                .get_own_draft(cmd.user.id.get(), id)
                .await?,
        ),
        None => None,
    };

    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Modal(draft_modal(draft.as_ref())),
    )
    .await?;

    Ok(())
}

/// `/publish_draft [proposal_id]`: publishes a draft, or lets the author pick one.
pub async fn publish_draft(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    let author_id = cmd.user.id.get();

    if let Some(id) = option_proposal_id(cmd)? {
        cmd.defer_ephemeral(&ctx.http).await?;
        let message = publish_and_arm(state, guild_id, author_id, id).await?;
        cmd.edit_response(&ctx.http, EditInteractionResponse::new().content(message))
            .await?;
        return Ok(());
    }

    let drafts = ProposalService::new(&state.db)
        .list_drafts(guild_id, author_id)
        .await?;
    if drafts.is_empty() {
        cmd.create_response(
            &ctx.http,
            ephemeral("You have no drafts. Create one with /vote_draft."),
        )
        .await?;
        return Ok(());
    }

    let options = drafts
        .iter()
        .take(MAX_SELECT_OPTIONS)
        .map(|draft| {
            CreateSelectMenuOption::new(
                truncate(&format!("#{} {}", draft.id, draft.title), 100),
                draft.id.to_string(),
            )
        })
        .collect();
    let menu = CreateSelectMenu::new("proposal:select", CreateSelectMenuKind::String { options })
        .placeholder("Draft to publish");

    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content("Which draft do you want to publish?")
                .components(vec![CreateActionRow::SelectMenu(menu)])
                .ephemeral(true),
        ),
    )
    .await?;

    Ok(())
}

/// `/cancel_vote [proposal_id]`: core members stop an ongoing vote.
///
/// Without an id, the vote whose thread the command is used in is cancelled.
pub async fn cancel_vote(
    state: &AppState,
    ctx: &Context,
    cmd: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(cmd.guild_id)?;
    require_core(state, ctx, guild_id, cmd.member.as_deref()).await?;

    let votes = OngoingVoteRepository::new(&state.db);
    let vote = match option_proposal_id(cmd)? {
        Some(id) => votes.find_by_proposal_id(id).await?,
        None => votes.find_by_thread_id(cmd.channel_id.get()).await?,
    };
    let proposal_id = vote
        .filter(|vote| vote.guild_id == guild_id)
        .map(|vote| vote.proposal_id)
        .ok_or_else(|| AppError::NotFound("No ongoing vote was found".to_string()))?;

    cmd.defer_ephemeral(&ctx.http).await?;

    let vote = vote_service(state).cancel(proposal_id).await?;
    state.vote_scheduler.cancel(proposal_id).await;

    cmd.edit_response(
        &ctx.http,
        EditInteractionResponse::new().content(format!(
            "Cancelled the vote on proposal #{} \"{}\".",
            vote.proposal_id, vote.title
        )),
    )
    .await?;

    Ok(())
}

/// Handles the preview buttons and the draft picker.
pub async fn handle_component(
    state: &AppState,
    ctx: &Context,
    comp: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(action) = parse_component(&comp.data.custom_id) else {
        tracing::debug!("Ignoring component {}", comp.data.custom_id);
        return Ok(());
    };
    let guild_id = require_guild(comp.guild_id)?;
    let author_id = comp.user.id.get();

    match action {
        ProposalComponent::Edit(id) => {
            let draft = ProposalService::new(&state.db)
                .get_own_draft(author_id, id)
                .await?;
            comp.create_response(
                &ctx.http,
                CreateInteractionResponse::Modal(draft_modal(Some(&draft))),
            )
            .await?;
        }
        ProposalComponent::Delete(id) => {
            ProposalService::new(&state.db)
                .delete_draft(author_id, id)
                .await?;
            comp.create_response(
                &ctx.http,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .content(format!("Draft #{} deleted.", id))
                        .embeds(Vec::new())
                        .components(Vec::new()),
                ),
            )
            .await?;
        }
        ProposalComponent::Publish(id) => {
            comp.defer_ephemeral(&ctx.http).await?;
            let message = publish_and_arm(state, guild_id, author_id, id).await?;
            comp.edit_response(&ctx.http, EditInteractionResponse::new().content(message))
                .await?;
        }
        ProposalComponent::Select => {
            let id = match &comp.data.kind {
                ComponentInteractionDataKind::StringSelect { values } => {
                    values.first().and_then(|value| value.parse::<i32>().ok())
                }
                _ => None,
            }
            .ok_or_else(|| AppError::Validation("No draft was selected".to_string()))?;

            comp.defer_ephemeral(&ctx.http).await?;
            let message = publish_and_arm(state, guild_id, author_id, id).await?;
            comp.edit_response(&ctx.http, EditInteractionResponse::new().content(message))
                .await?;
        }
    }

    Ok(())
}

/// Saves the submitted draft modal and answers with a preview.
pub async fn handle_modal(
    state: &AppState,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let Some(proposal_id) = parse_modal(&modal.data.custom_id) else {
        tracing::debug!("Ignoring modal {}", modal.data.custom_id);
        return Ok(());
    };
    let guild_id = require_guild(modal.guild_id)?;

    let mut fields = modal_values(&modal.data.components);
    let mut take = |name: &str| fields.remove(name).unwrap_or_default();

    let draft = ProposalService::new(&state.db)
        .save_draft(SaveDraftParam {
            proposal_id,
            guild_id,
            author_id: modal.user.id.get(),
            title: take(FIELD_TITLE),
            category: take(FIELD_CATEGORY),
            abstract_text: take(FIELD_ABSTRACT),
            background: take(FIELD_BACKGROUND),
            additional: Some(take(FIELD_ADDITIONAL)),
        })
        .await?;

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(format!("Draft #{} saved.", draft.id))
                    .embed(draft_preview(&draft))
                    .components(vec![draft_buttons(draft.id)])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Publishes a draft and arms its conclusion timer.
async fn publish_and_arm(
    state: &AppState,
    guild_id: u64,
    author_id: u64,
    proposal_id: i32,
) -> Result<String, AppError> {
    let vote = vote_service(state)
        .publish(guild_id, author_id, proposal_id)
        .await?;
    state
        .vote_scheduler
        .arm(vote.proposal_id, vote.end_time)
        .await;

    Ok(format!(
        "Proposal #{} is up for vote: {}\nVoting closes <t:{}:R>.",
        vote.proposal_id,
        thread_link(guild_id, vote.thread_id),
        vote.end_time.timestamp()
    ))
}

fn vote_service(state: &AppState) -> VoteService<'_> {
    VoteService::new(
        &state.db,
        state.discord_http.clone(),
        state.publisher.clone(),
        &state.vote_settings,
    )
}

fn draft_modal(draft: Option<&Proposal>) -> CreateModal {
    let custom_id = match draft {
        Some(draft) => format!("proposal:modal:{}", draft.id),
        None => "proposal:modal:new".to_string(),
    };
    let categories = ProposalCategory::ALL
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>()
        .join(" or ");

    let mut title = CreateInputText::new(InputTextStyle::Short, "Title", FIELD_TITLE)
        .max_length(MAX_TITLE_LENGTH as u16)
        .required(true);
    let mut category = CreateInputText::new(InputTextStyle::Short, "Category", FIELD_CATEGORY)
        .placeholder(categories)
        .required(true);
    let mut abstract_text =
        CreateInputText::new(InputTextStyle::Paragraph, "Abstract", FIELD_ABSTRACT)
            .required(true);
    let mut background =
        CreateInputText::new(InputTextStyle::Paragraph, "Background", FIELD_BACKGROUND)
            .required(true);
    let mut additional = CreateInputText::new(
        InputTextStyle::Paragraph,
        "Additional information",
        FIELD_ADDITIONAL,
    )
    .required(false);

    if let Some(draft) = draft {
        title = title.value(&draft.title);
        category = category.value(&draft.category);
        abstract_text = abstract_text.value(&draft.abstract_text);
        background = background.value(&draft.background);
        if let Some(text) = &draft.additional {
            additional = additional.value(text);
        }
    }

    let heading = match draft {
        Some(draft) => format!("Edit draft #{}", draft.id),
        None => "New proposal draft".to_string(),
    };

    CreateModal::new(custom_id, heading).components(vec![
        CreateActionRow::InputText(title),
        CreateActionRow::InputText(category),
        CreateActionRow::InputText(abstract_text),
        CreateActionRow::InputText(background),
        CreateActionRow::InputText(additional),
    ])
}

fn draft_preview(draft: &Proposal) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&draft.title)
        .field("Category", &draft.category, true)
        .field("Status", draft.status.as_str(), true)
        .field("Abstract", truncate(&draft.abstract_text, MAX_FIELD_LENGTH), false)
        .field("Background", truncate(&draft.background, MAX_FIELD_LENGTH), false);

    if let Some(additional) = &draft.additional {
        embed = embed.field(
            "Additional information",
            truncate(additional, MAX_FIELD_LENGTH),
            false,
        );
    }

    embed
}

fn draft_buttons(proposal_id: i32) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(format!("proposal:edit:{}", proposal_id))
            .label("Edit")
            .style(ButtonStyle::Secondary),
        CreateButton::new(format!("proposal:delete:{}", proposal_id))
            .label("Delete")
            .style(ButtonStyle::Danger),
        CreateButton::new(format!("proposal:publish:{}", proposal_id))
            .label("Publish")
            .style(ButtonStyle::Success),
    ])
}

fn modal_values(rows: &[ActionRow]) -> HashMap<String, String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}

/// Shortens text to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_ids() {
        assert_eq!(
            parse_component("proposal:edit:12"),
            Some(ProposalComponent::Edit(12))
        );
        assert_eq!(
            parse_component("proposal:delete:3"),
            Some(ProposalComponent::Delete(3))
        );
        assert_eq!(
            parse_component("proposal:publish:7"),
            Some(ProposalComponent::Publish(7))
        );
        assert_eq!(
            parse_component("proposal:select"),
            Some(ProposalComponent::Select)
        );
    }

    #[test]
    fn rejects_foreign_or_malformed_ids() {
        assert_eq!(parse_component("contributor:edit:1"), None);
        assert_eq!(parse_component("proposal:edit:abc"), None);
        assert_eq!(parse_component("proposal:archive:1"), None);
    }

    #[test]
    fn parses_modal_ids() {
        assert_eq!(parse_modal("proposal:modal:new"), Some(None));
        assert_eq!(parse_modal("proposal:modal:42"), Some(Some(42)));
        assert_eq!(parse_modal("proposal:edit:42"), None);
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");

        let cut = truncate("ééééé", 3);
        assert_eq!(cut.chars().count(), 3);
        assert!(cut.ends_with('…'));
    }
}
