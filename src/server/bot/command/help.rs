use serenity::all::{CommandInteraction, Context, CreateCommand};

use crate::server::{bot::command::ephemeral, error::AppError};

pub const HELP_TEXT: &str = "\
**Proposals**
`/vote_draft [proposal_id]` create a draft, or edit one of yours
`/publish_draft [proposal_id]` publish a draft for voting
`/cancel_vote [proposal_id]` cancel an ongoing vote, by default the one of this thread (core)

**Events**
`/list_events` scheduled events and their announcement state
`/delete_event event_id` delete a scheduled event (core)

**Contributors**
`/add_contributor user emoji [note]` register a contributor marker (core)
`/remove_contributor user` stop relaying a marker (core)
`/contributors` registered contributors
`/mentions` your recent relayed mentions

Prefix commands: `!help`, `!contributors`, `!list_events`, `!drafts`";

pub fn register() -> CreateCommand {
    CreateCommand::new("help").description("Show what the bot can do")
}

pub async fn help(ctx: &Context, cmd: &CommandInteraction) -> Result<(), AppError> {
    cmd.create_response(&ctx.http, ephemeral(HELP_TEXT)).await?;

    Ok(())
}
