use super::*;

#[tokio::test]
async fn deletes_ledger_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EventAnnouncement)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_posted_event(db, "1", "500").await?;

    let repo = EventAnnouncementRepository::new(db);
    repo.delete(500).await?;

    assert!(repo.find_by_event_id(500).await?.is_none());

    Ok(())
}
