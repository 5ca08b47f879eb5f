use super::*;

#[tokio::test]
async fn records_mention() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let contributor = factory::create_contributor(db, "1").await?;

    let mention = MentionRepository::new(db)
        .create(CreateMentionParam {
            by_reaction: true,
            ..param(contributor.id, 99)
        })
        .await?;

    assert_eq!(mention.contributor_id, contributor.id);
    assert_eq!(mention.message_id, 99);
    assert!(mention.by_reaction);

    Ok(())
}
