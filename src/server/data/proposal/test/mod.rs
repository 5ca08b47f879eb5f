use super::*;
use crate::server::model::proposal::ProposalCategory;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_draft;
mod get_drafts_by_author;
mod transition_status;
mod update;

fn create_param(guild_id: u64, author_id: u64, title: &str) -> CreateProposalParam {
    CreateProposalParam {
        guild_id,
        author_id,
        title: title.to_string(),
        category: ProposalCategory::Budget,
        abstract_text: "Fund the community garden".to_string(),
        background: "Seeds are expensive".to_string(),
        additional: Some("Quotes attached".to_string()),
    }
}
