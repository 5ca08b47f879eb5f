use super::*;

/// Expected: Ok with the guild removed and others untouched
#[tokio::test]
async fn deletes_only_the_given_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let removed = factory::create_guild(db).await?;
    factory::create_guild(db).await?;

    DiscordGuildRepository::new(db)
        .delete(removed.guild_id.parse::<u64>().unwrap())
        .await?;

    let remaining = entity::prelude::DiscordGuild::find().count(db).await?;
    assert_eq!(remaining, 1);

    Ok(())
}
