use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Proposal::Table)
                    .if_not_exists()
                    .col(pk_auto(Proposal::Id))
                    .col(string(Proposal::GuildId))
                    .col(string(Proposal::AuthorId))
                    .col(string(Proposal::Title))
                    .col(string(Proposal::Category))
                    .col(text(Proposal::AbstractText))
                    .col(text(Proposal::Background))
                    .col(text_null(Proposal::Additional))
                    .col(string(Proposal::Status).default("draft"))
                    .col(timestamp(Proposal::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Proposal::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Titles are unique per guild, compared case-sensitively
        manager
            .create_index(
                Index::create()
                    .name("idx_proposal_guild_title")
                    .table(Proposal::Table)
                    .col(Proposal::GuildId)
                    .col(Proposal::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_proposal_author_status")
                    .table(Proposal::Table)
                    .col(Proposal::AuthorId)
                    .col(Proposal::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_proposal_author_status")
                    .table(Proposal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_proposal_guild_title")
                    .table(Proposal::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Proposal::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Proposal {
    Table,
    Id,
    GuildId,
    AuthorId,
    Title,
    Category,
    AbstractText,
    Background,
    Additional,
    Status,
    CreatedAt,
    UpdatedAt,
}
