//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and a
//! `create_*` convenience function for quick default creation. Factories insert into the
//! database; dependencies must already exist.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let proposal = factory::proposal::ProposalFactory::new(&db)
//!     .title("Fund the garden")
//!     .category("budget")
//!     .build()
//!     .await?;
//! let vote = factory::create_ongoing_vote(&db, &proposal).await?;
//! ```

pub mod contributor;
pub mod discord_guild;
pub mod event_announcement;
pub mod helpers;
pub mod ongoing_vote;
pub mod proposal;

pub use contributor::create_contributor;
pub use discord_guild::create_guild;
pub use event_announcement::create_posted_event;
pub use ongoing_vote::create_ongoing_vote;
pub use proposal::create_proposal;
