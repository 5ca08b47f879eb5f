//! Vote domain models.
//!
//! An ongoing vote exists from publication until its window closes; the conclusion record
//! keeps the final tally for display and for the read-only API.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serenity::all::ReactionType;

/// One of the three vote markers added to every vote message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl VoteChoice {
    pub const ALL: [VoteChoice; 3] = [VoteChoice::Yes, VoteChoice::No, VoteChoice::Abstain];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Yes => "✅",
            Self::No => "❌",
            Self::Abstain => "⚪",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Abstain => "Abstain",
        }
    }

    pub fn reaction(&self) -> ReactionType {
        ReactionType::Unicode(self.emoji().to_string())
    }

    /// Maps a reaction back to a vote choice; any other emoji is ignored.
    pub fn from_reaction(reaction: &ReactionType) -> Option<Self> {
        match reaction {
            ReactionType::Unicode(emoji) => Self::ALL
                .into_iter()
                .find(|choice| choice.emoji() == emoji.as_str()),
            _ => None,
        }
    }
}

/// Reaction counts on a vote message with the bot's own markers removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
}

impl VoteTally {
    /// Builds a tally from `(emoji, count, reacted_by_bot)` triples.
    ///
    /// The bot seeds each marker itself, so one is subtracted from a marker's count when
    /// the bot's own reaction is part of it.
    pub fn from_reactions<'r, I>(reactions: I) -> Self
    where
        I: IntoIterator<Item = (&'r ReactionType, u64, bool)>,
    {
        let mut tally = Self::default();

        for (reaction, count, me) in reactions {
            let Some(choice) = VoteChoice::from_reaction(reaction) else {
                continue;
            };
            let votes = if me { count.saturating_sub(1) } else { count };

            match choice {
                VoteChoice::Yes => tally.yes += votes,
                VoteChoice::No => tally.no += votes,
                VoteChoice::Abstain => tally.abstain += votes,
            }
        }

        tally
    }

    /// A proposal passes when yes votes reach the quorum.
    pub fn passes(&self, quorum: u64) -> bool {
        self.yes >= quorum
    }
}

/// A published proposal whose vote window is open.
#[derive(Debug, Clone, PartialEq)]
pub struct OngoingVote {
    pub proposal_id: i32,
    pub guild_id: u64,
    pub title: String,
    /// Category channel holding the thread starter message.
    pub channel_id: u64,
    pub thread_id: u64,
    /// Message in the thread carrying the vote markers.
    pub message_id: u64,
    pub published_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl OngoingVote {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(OngoingVote)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - A stored Discord id is not a valid u64
    pub fn from_entity(entity: entity::ongoing_vote::Model) -> Result<Self, DbErr> {
        Ok(Self {
            proposal_id: entity.proposal_id,
            guild_id: parse_id("guild_id", &entity.guild_id)?,
            title: entity.title,
            channel_id: parse_id("channel_id", &entity.channel_id)?,
            thread_id: parse_id("thread_id", &entity.thread_id)?,
            message_id: parse_id("message_id", &entity.message_id)?,
            published_at: entity.published_at,
            end_time: entity.end_time,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateOngoingVoteParam {
    pub proposal_id: i32,
    pub guild_id: u64,
    pub title: String,
    pub channel_id: u64,
    pub thread_id: u64,
    pub message_id: u64,
    pub published_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Final record of a closed vote.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcludedVote {
    pub proposal_id: i32,
    pub guild_id: u64,
    pub title: String,
    pub channel_id: u64,
    pub thread_id: u64,
    pub tally: VoteTally,
    pub passed: bool,
    pub concluded_at: DateTime<Utc>,
    /// Link to the proposal on the external ledger, when it was submitted there.
    pub snapshot_url: Option<String>,
}

impl ConcludedVote {
    pub fn from_entity(entity: entity::concluded_vote::Model) -> Result<Self, DbErr> {
        Ok(Self {
            proposal_id: entity.proposal_id,
            guild_id: parse_id("guild_id", &entity.guild_id)?,
            title: entity.title,
            channel_id: parse_id("channel_id", &entity.channel_id)?,
            thread_id: parse_id("thread_id", &entity.thread_id)?,
            tally: VoteTally {
                yes: entity.yes_count.max(0) as u64,
                no: entity.no_count.max(0) as u64,
                abstain: entity.abstain_count.max(0) as u64,
            },
            passed: entity.passed,
            concluded_at: entity.concluded_at,
            snapshot_url: entity.snapshot_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateConcludedVoteParam {
    pub vote: OngoingVote,
    pub tally: VoteTally,
    pub passed: bool,
    pub concluded_at: DateTime<Utc>,
}

fn parse_id(field: &str, value: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}
