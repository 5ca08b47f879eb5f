use sea_orm_migration::{prelude::*, schema::*};

use super::m20260902_000005_create_contributor_table::Contributor;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mention::Table)
                    .if_not_exists()
                    .col(pk_auto(Mention::Id))
                    .col(integer(Mention::ContributorId))
                    .col(string(Mention::GuildId))
                    .col(string(Mention::ChannelId))
                    .col(string(Mention::MessageId))
                    .col(string(Mention::AuthorId))
                    .col(boolean(Mention::ByReaction).default(false))
                    .col(timestamp(Mention::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mention_contributor_id")
                            .from(Mention::Table, Mention::ContributorId)
                            .to(Contributor::Table, Contributor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mention_contributor_id")
                    .table(Mention::Table)
                    .col(Mention::ContributorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_mention_contributor_id")
                    .table(Mention::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Mention::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Mention {
    Table,
    Id,
    ContributorId,
    GuildId,
    ChannelId,
    MessageId,
    AuthorId,
    ByReaction,
    CreatedAt,
}
