use super::*;

/// Tests the newest mentions come first and the limit applies.
///
/// Expected: Ok with the two newest of three mentions
#[tokio::test]
async fn returns_newest_first_within_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let contributor = factory::create_contributor(db, "1").await?;
    let other = factory::create_contributor(db, "1").await?;

    let repo = MentionRepository::new(db);
    repo.create(param(contributor.id, 1)).await?;
    repo.create(param(contributor.id, 2)).await?;
    repo.create(param(contributor.id, 3)).await?;
    repo.create(param(other.id, 4)).await?;

    let mentions = repo.get_recent_by_contributor(contributor.id, 2).await?;

    let message_ids: Vec<u64> = mentions.iter().map(|m| m.message_id).collect();
    assert_eq!(message_ids, vec![3, 2]);

    Ok(())
}
