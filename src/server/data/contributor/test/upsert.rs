use super::*;

/// Tests registering a new contributor.
///
/// Expected: Ok with an active contributor
#[tokio::test]
async fn registers_new_contributor() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let contributor = ContributorRepository::new(db)
        .upsert(param(1, 2, "🌸"))
        .await?;

    assert_eq!(contributor.guild_id, 1);
    assert_eq!(contributor.user_id, 2);
    assert_eq!(contributor.emoji, "🌸");
    assert!(contributor.active);

    Ok(())
}

/// Tests re-registering a removed contributor reuses their row.
///
/// Expected: Ok with same id, reactivated, new marker, one row
#[tokio::test]
async fn reactivates_previous_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_contributor_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let previous = factory::contributor::ContributorFactory::new(db, "1")
        .user_id("2")
        .active(false)
        .build()
        .await?;

    let contributor = ContributorRepository::new(db)
        .upsert(param(1, 2, "🌿"))
        .await?;

    assert_eq!(contributor.id, previous.id);
    assert!(contributor.active);
    assert_eq!(contributor.emoji, "🌿");
    assert_eq!(entity::prelude::Contributor::find().count(db).await?, 1);

    Ok(())
}
