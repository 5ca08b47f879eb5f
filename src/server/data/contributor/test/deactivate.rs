use super::*;

#[tokio::test]
async fn deactivates_contributor() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::contributor::ContributorFactory::new(db, "1")
        .user_id("2")
        .build()
        .await?;

    let repo = ContributorRepository::new(db);
    assert!(repo.deactivate(1, 2).await?);

    let stored = repo.find_by_user(1, 2).await?.unwrap();
    assert!(!stored.active);

    Ok(())
}

/// Expected: Ok(false) when the user is not an active contributor
#[tokio::test]
async fn returns_false_without_active_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::contributor::ContributorFactory::new(db, "1")
        .user_id("2")
        .active(false)
        .build()
        .await?;

    let repo = ContributorRepository::new(db);
    assert!(!repo.deactivate(1, 2).await?);
    assert!(!repo.deactivate(1, 3).await?);

    Ok(())
}
