//! Text and embeds posted for proposals and their votes.

use chrono::{DateTime, Utc};
use serenity::all::CreateEmbed;

use crate::server::{
    model::{
        proposal::{Proposal, ProposalCategory},
        vote::{ConcludedVote, VoteChoice},
    },
    service::proposal::MAX_TITLE_LENGTH,
};

const COLOR_OPEN: u32 = 0x3498db;
const COLOR_PASSED: u32 = 0x2ecc71;
const COLOR_FAILED: u32 = 0xe74c3c;

/// Full proposal text as posted into the vote thread.
pub fn proposal_text(proposal: &Proposal, category: ProposalCategory) -> String {
    let mut text = format!(
        "# {}\n**Category:** {}\n**Author:** <@{}>\n\n## Abstract\n{}\n\n## Background\n{}\n",
        proposal.title,
        category.label(),
        proposal.author_id,
        proposal.abstract_text.trim(),
        proposal.background.trim()
    );

    if let Some(additional) = &proposal.additional {
        text.push_str(&format!("\n## Additional\n{}\n", additional.trim()));
    }

    text
}

/// Thread names share the title limit; longer titles are cut on a character boundary.
pub fn thread_name(title: &str) -> String {
    title.chars().take(MAX_TITLE_LENGTH).collect()
}

/// Announcement posted in the category channel; the vote thread hangs off this message.
pub fn starter_embed(
    proposal: &Proposal,
    category: ProposalCategory,
    end_time: DateTime<Utc>,
) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("New {} proposal: {}", category.label(), proposal.title))
        .description(proposal.abstract_text.trim())
        .color(COLOR_OPEN)
        .field("Author", format!("<@{}>", proposal.author_id), true)
        .field(
            "Voting closes",
            format!("<t:{0}:F> (<t:{0}:R>)", end_time.timestamp()),
            true,
        )
}

/// Message carrying the vote markers.
pub fn vote_prompt(end_time: DateTime<Utc>, quorum: u64) -> String {
    let options = VoteChoice::ALL
        .iter()
        .map(|choice| format!("{} {}", choice.emoji(), choice.label()))
        .collect::<Vec<_>>()
        .join(" · ");

    format!(
        "**Cast your vote:** {}\nVoting closes <t:{}:F>. The proposal passes with at least {} yes votes.",
        options,
        end_time.timestamp(),
        quorum
    )
}

/// Summary posted to the thread once the vote concluded.
pub fn result_embed(concluded: &ConcludedVote, quorum: u64) -> CreateEmbed {
    let (outcome, color) = if concluded.passed {
        ("Passed", COLOR_PASSED)
    } else {
        ("Did not pass", COLOR_FAILED)
    };

    let mut embed = CreateEmbed::new()
        .title(format!("Vote concluded: {}", concluded.title))
        .color(color)
        .description(format!(
            "**{}** ({} yes votes needed)",
            outcome, quorum
        ))
        .field(
            format!("{} Yes", VoteChoice::Yes.emoji()),
            concluded.tally.yes.to_string(),
            true,
        )
        .field(
            format!("{} No", VoteChoice::No.emoji()),
            concluded.tally.no.to_string(),
            true,
        )
        .field(
            format!("{} Abstain", VoteChoice::Abstain.emoji()),
            concluded.tally.abstain.to_string(),
            true,
        );

    if let Some(url) = &concluded.snapshot_url {
        embed = embed.field("Ledger", url, false);
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::proposal::ProposalStatus;

    fn proposal(additional: Option<&str>) -> Proposal {
        Proposal {
            id: 1,
            guild_id: 2,
            author_id: 3,
            title: "Trees".to_string(),
            category: "budget".to_string(),
            abstract_text: "Plant trees".to_string(),
            background: "Bare park".to_string(),
            additional: additional.map(str::to_string),
            status: ProposalStatus::Draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_all_sections() {
        let text = proposal_text(&proposal(Some("Quotes")), ProposalCategory::Budget);

        assert!(text.starts_with("# Trees\n"));
        assert!(text.contains("**Category:** Budget"));
        assert!(text.contains("## Abstract\nPlant trees"));
        assert!(text.contains("## Background\nBare park"));
        assert!(text.contains("## Additional\nQuotes"));
    }

    #[test]
    fn omits_missing_additional_section() {
        let text = proposal_text(&proposal(None), ProposalCategory::General);

        assert!(!text.contains("## Additional"));
    }

    #[test]
    fn prompt_lists_markers_and_quorum() {
        let prompt = vote_prompt(Utc::now(), 5);

        assert!(prompt.contains("✅ Yes"));
        assert!(prompt.contains("❌ No"));
        assert!(prompt.contains("⚪ Abstain"));
        assert!(prompt.contains("at least 5 yes votes"));
    }

    #[test]
    fn thread_name_is_truncated() {
        let name = thread_name(&"x".repeat(150));

        assert_eq!(name.chars().count(), MAX_TITLE_LENGTH);
    }
}
