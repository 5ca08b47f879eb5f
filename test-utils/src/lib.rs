//! Bloom Bot Test Utils
//!
//! Shared testing utilities for the bot's repository and service tests. This crate offers a
//! builder for creating test contexts backed by in-memory SQLite databases, factories for
//! inserting entities with sensible defaults, and JSON-backed Serenity fixtures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Proposal;
//!
//! #[tokio::test]
//! async fn test_proposal_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Proposal)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
