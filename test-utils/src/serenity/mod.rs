//! Test factories for creating Serenity API objects.
//!
//! Objects are built by deserializing JSON shaped like Discord's API payloads, so they pass
//! through the same serde paths as gateway data.
//!
//! - `guild::create_test_guild` - Serenity `Guild`
//! - `channel::create_test_channel` - Serenity `GuildChannel`
//! - `role::create_test_role` - Serenity `Role`

pub mod channel;
pub mod guild;
pub mod role;

pub use channel::create_test_channel;
pub use guild::create_test_guild;
pub use role::create_test_role;
