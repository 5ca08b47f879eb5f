use super::*;

#[tokio::test]
async fn finds_existing_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let found = DiscordGuildRepository::new(db)
        .find_by_guild_id(guild_id)
        .await?;

    assert_eq!(found.map(|g| g.name), Some(guild.name));

    Ok(())
}

#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let found = DiscordGuildRepository::new(db).find_by_guild_id(42).await?;

    assert!(found.is_none());

    Ok(())
}
