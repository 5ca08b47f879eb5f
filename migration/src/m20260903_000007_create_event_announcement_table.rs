use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventAnnouncement::Table)
                    .if_not_exists()
                    .col(string(EventAnnouncement::EventId).primary_key())
                    .col(string(EventAnnouncement::GuildId))
                    .col(timestamp_null(EventAnnouncement::PostedAt))
                    .col(timestamp_null(EventAnnouncement::NotifiedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_announcement_guild_id")
                    .table(EventAnnouncement::Table)
                    .col(EventAnnouncement::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_event_announcement_guild_id")
                    .table(EventAnnouncement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EventAnnouncement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EventAnnouncement {
    Table,
    EventId,
    GuildId,
    PostedAt,
    NotifiedAt,
}
