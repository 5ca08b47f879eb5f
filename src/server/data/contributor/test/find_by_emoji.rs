use super::*;

#[tokio::test]
async fn finds_marker_owner_in_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::contributor::ContributorFactory::new(db, "1")
        .emoji("<:rose:42>")
        .build()
        .await?;

    let repo = ContributorRepository::new(db);

    let found = repo.find_by_emoji(1, "<:rose:42>").await?;
    assert_eq!(found.map(|c| c.id), Some(owner.id));

    assert!(repo.find_by_emoji(2, "<:rose:42>").await?.is_none());

    Ok(())
}
