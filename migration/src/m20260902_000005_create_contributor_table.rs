use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contributor::Table)
                    .if_not_exists()
                    .col(pk_auto(Contributor::Id))
                    .col(string(Contributor::GuildId))
                    .col(string(Contributor::UserId))
                    .col(string(Contributor::Note))
                    .col(string(Contributor::Emoji))
                    .col(boolean(Contributor::Active).default(true))
                    .col(timestamp(Contributor::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // One registration per user per guild
        manager
            .create_index(
                Index::create()
                    .name("idx_contributor_guild_user")
                    .table(Contributor::Table)
                    .col(Contributor::GuildId)
                    .col(Contributor::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A marker resolves to exactly one contributor
        manager
            .create_index(
                Index::create()
                    .name("idx_contributor_guild_emoji")
                    .table(Contributor::Table)
                    .col(Contributor::GuildId)
                    .col(Contributor::Emoji)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_contributor_guild_emoji")
                    .table(Contributor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_contributor_guild_user")
                    .table(Contributor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Contributor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Contributor {
    Table,
    Id,
    GuildId,
    UserId,
    Note,
    Emoji,
    Active,
    CreatedAt,
}
