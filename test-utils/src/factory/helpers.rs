//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Values are offset into the Discord snowflake range so they parse as `u64` ids.
pub fn next_id() -> u64 {
    100_000_000_000_000_000 + COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a published proposal together with its ongoing vote.
///
/// # Returns
/// - `Ok((proposal, vote))` - The proposal (status `published`) and its ongoing vote
/// - `Err(DbErr)` - Database error during creation
pub async fn create_published_proposal(
    db: &DatabaseConnection,
) -> Result<(entity::proposal::Model, entity::ongoing_vote::Model), DbErr> {
    let proposal = crate::factory::proposal::ProposalFactory::new(db)
        .status("published")
        .build()
        .await?;
    let vote = crate::factory::ongoing_vote::create_ongoing_vote(db, &proposal).await?;

    Ok((proposal, vote))
}
