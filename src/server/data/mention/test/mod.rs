use super::*;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_recent_by_contributor;

fn param(contributor_id: i32, message_id: u64) -> CreateMentionParam {
    CreateMentionParam {
        contributor_id,
        guild_id: 1,
        channel_id: 2,
        message_id,
        author_id: 3,
        by_reaction: false,
    }
}
