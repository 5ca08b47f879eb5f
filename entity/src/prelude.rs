pub use super::concluded_vote::Entity as ConcludedVote;
pub use super::contributor::Entity as Contributor;
pub use super::discord_guild::Entity as DiscordGuild;
pub use super::event_announcement::Entity as EventAnnouncement;
pub use super::mention::Entity as Mention;
pub use super::ongoing_vote::Entity as OngoingVote;
pub use super::proposal::Entity as Proposal;
