pub mod contributor;
pub mod discord_guild;
pub mod event;
pub mod mention;
pub mod proposal;
pub mod vote;
