use super::*;

/// Tests upserting a new Discord guild.
///
/// Expected: Ok with guild created from the Serenity Guild's id and name
#[tokio::test]
async fn upserts_new_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = create_test_guild(123456789, "Bloom");

    let repo = DiscordGuildRepository::new(db);
    let upserted = repo.upsert(&guild).await?;

    assert_eq!(upserted.guild_id, 123456789);
    assert_eq!(upserted.name, "Bloom");

    let db_guild = entity::prelude::DiscordGuild::find()
        .filter(entity::discord_guild::Column::GuildId.eq("123456789"))
        .one(db)
        .await?;
    assert!(db_guild.is_some());

    Ok(())
}

/// Tests upserting updates an existing guild instead of duplicating it.
///
/// Expected: Ok with name and last_seen_at refreshed, one row
#[tokio::test]
async fn updates_existing_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stale = Utc::now() - chrono::Duration::days(3);
    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .name("Old Name")
        .last_seen_at(stale)
        .build()
        .await?;

    let guild = create_test_guild(123456789, "New Name");

    let repo = DiscordGuildRepository::new(db);
    let upserted = repo.upsert(&guild).await?;

    assert_eq!(upserted.name, "New Name");
    assert!(upserted.last_seen_at > stale);

    let count = entity::prelude::DiscordGuild::find()
        .filter(entity::discord_guild::Column::GuildId.eq("123456789"))
        .count(db)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}
