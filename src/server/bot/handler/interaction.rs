use serenity::all::{Context, Interaction};

use crate::server::{bot::command, state::AppState};

/// Routes an interaction to the command, component or modal dispatcher.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(cmd) => command::dispatch_command(state, &ctx, cmd).await,
        Interaction::Component(comp) => command::dispatch_component(state, &ctx, comp).await,
        Interaction::Modal(modal) => command::dispatch_modal(state, &ctx, modal).await,
        _ => {}
    }
}
