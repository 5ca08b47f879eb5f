use super::*;
use sea_orm::PaginatorTrait;
use test_utils::{builder::TestBuilder, factory};

mod deactivate;
mod find_by_emoji;
mod get_active_by_guild;
mod upsert;

fn param(guild_id: u64, user_id: u64, emoji: &str) -> CreateContributorParam {
    CreateContributorParam {
        guild_id,
        user_id,
        note: "Design".to_string(),
        emoji: emoji.to_string(),
    }
}
