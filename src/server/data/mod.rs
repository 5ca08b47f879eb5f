//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models from
//! `server::model`, keeping string-encoded Discord ids out of the service layer. Repositories
//! that take part in multi-step state changes are generic over `ConnectionTrait` so services
//! can run them inside a transaction.

pub mod contributor;
pub mod discord_guild;
pub mod event_announcement;
pub mod mention;
pub mod proposal;
pub mod vote;
