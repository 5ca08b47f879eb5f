use super::*;
use sea_orm::PaginatorTrait;
use test_utils::{builder::TestBuilder, factory, serenity::create_test_guild};

mod delete;
mod find_by_guild_id;
mod get_all;
mod upsert;
