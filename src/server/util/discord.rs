//! Small helpers shared by the Discord-facing services.

use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, ChannelType, GuildChannel, Timestamp};
use std::collections::HashMap;

use crate::server::error::{internal::InternalError, AppError};

/// Discord's per-message content limit in characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Finds a text channel by its name.
///
/// Names are compared exactly, as they appear in the client without the leading `#`.
pub fn find_text_channel(
    channels: &HashMap<ChannelId, GuildChannel>,
    name: &str,
) -> Option<ChannelId> {
    channels
        .values()
        .filter(|channel| channel.kind == ChannelType::Text)
        .find(|channel| channel.name == name)
        .map(|channel| channel.id)
}

/// Builds a jump link to a message.
pub fn message_link(guild_id: u64, channel_id: u64, message_id: u64) -> String {
    format!(
        "https://discord.com/channels/{}/{}/{}",
        guild_id, channel_id, message_id
    )
}

/// Builds a link to a channel or thread.
pub fn thread_link(guild_id: u64, thread_id: u64) -> String {
    format!("https://discord.com/channels/{}/{}", guild_id, thread_id)
}

/// Converts a chrono timestamp into Discord's embed timestamp type.
pub fn to_discord_timestamp(time: DateTime<Utc>) -> Result<Timestamp, AppError> {
    Timestamp::from_unix_timestamp(time.timestamp()).map_err(|e| {
        AppError::InternalError(InternalError::InvalidDiscordTimestamp {
            timestamp: time.timestamp(),
            reason: e.to_string(),
        })
    })
}

/// Splits text into pieces that each fit into a single message.
///
/// Splits on line boundaries where possible and hard-splits lines longer than `limit`
/// on character boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if current.chars().count() + line.chars().count() > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if line.chars().count() > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                let piece: String = piece.iter().collect();
                if piece.chars().count() == limit {
                    chunks.push(piece);
                } else {
                    current = piece;
                }
            }
        } else {
            current.push_str(line);
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_channel;

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split_message("hello\nworld", MESSAGE_LIMIT);
        assert_eq!(chunks, vec!["hello\nworld".to_string()]);
    }

    /// Expected: every chunk fits and joining them restores the text
    #[test]
    fn long_text_splits_on_lines_within_limit() {
        let line = format!("{}\n", "a".repeat(30));
        let text = line.repeat(10);

        let chunks = split_message(&text, 100);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 100));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn overlong_line_is_hard_split() {
        let text = "b".repeat(250);

        let chunks = split_message(&text, 100);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 50);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn finds_text_channel_by_exact_name() {
        let mut channels = HashMap::new();
        let general = create_test_channel(11, 1, "general-proposals");
        let budget = create_test_channel(12, 1, "budget-proposals");
        channels.insert(general.id, general);
        channels.insert(budget.id, budget);

        assert_eq!(
            find_text_channel(&channels, "budget-proposals"),
            Some(ChannelId::new(12))
        );
        assert_eq!(find_text_channel(&channels, "Budget-Proposals"), None);
        assert_eq!(find_text_channel(&channels, "events"), None);
    }

    #[test]
    fn builds_message_link() {
        assert_eq!(
            message_link(1, 2, 3),
            "https://discord.com/channels/1/2/3"
        );
    }
}
