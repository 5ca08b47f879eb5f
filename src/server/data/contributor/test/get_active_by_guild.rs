use super::*;

/// Expected: inactive contributors and other guilds are excluded
#[tokio::test]
async fn returns_only_active_in_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::create_contributor(db, "1").await?;
    factory::contributor::ContributorFactory::new(db, "1")
        .active(false)
        .build()
        .await?;
    factory::create_contributor(db, "2").await?;

    let contributors = ContributorRepository::new(db).get_active_by_guild(1).await?;

    assert_eq!(contributors.len(), 1);
    assert_eq!(contributors[0].id, active.id);

    Ok(())
}
