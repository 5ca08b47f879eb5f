//! SeaORM entity models for the Bloom Bot database.

pub mod prelude;

pub mod concluded_vote;
pub mod contributor;
pub mod discord_guild;
pub mod event_announcement;
pub mod mention;
pub mod ongoing_vote;
pub mod proposal;
