use super::*;

/// Tests the creation announcement is independent of the periodic post.
///
/// Expected: a posted event can still be claimed for its creation notice, once
#[tokio::test]
async fn claims_independently_of_posting() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EventAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_posted_event(db, "1", "500").await?;

    let repo = EventAnnouncementRepository::new(db);
    assert!(repo.claim_notified(1, 500).await?);
    assert!(!repo.claim_notified(1, 500).await?);

    let row = repo.find_by_event_id(500).await?.unwrap();
    assert!(row.posted_at.is_some());
    assert!(row.notified_at.is_some());

    Ok(())
}

/// Tests that a creation notice whose delivery failed can be claimed again.
///
/// Expected: true again after release, and the periodic post is untouched
#[tokio::test]
async fn release_allows_reclaim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EventAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_posted_event(db, "1", "500").await?;

    let repo = EventAnnouncementRepository::new(db);
    assert!(repo.claim_notified(1, 500).await?);

    repo.release_notified(500).await?;

    let row = repo.find_by_event_id(500).await?.unwrap();
    assert!(row.notified_at.is_none());
    assert!(row.posted_at.is_some());

    assert!(repo.claim_notified(1, 500).await?);

    Ok(())
}
