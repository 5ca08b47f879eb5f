use super::*;

/// Expected: Ok with every stored guild
#[tokio::test]
async fn returns_all_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild(db).await?;
    factory::create_guild(db).await?;

    let guilds = DiscordGuildRepository::new(db).get_all().await?;

    assert_eq!(guilds.len(), 2);

    Ok(())
}

/// Expected: Ok with empty list when the bot has not joined any guild
#[tokio::test]
async fn returns_empty_without_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guilds = DiscordGuildRepository::new(db).get_all().await?;

    assert!(guilds.is_empty());

    Ok(())
}
