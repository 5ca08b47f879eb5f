use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000002_create_proposal_table::Proposal;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OngoingVote::Table)
                    .if_not_exists()
                    .col(integer(OngoingVote::ProposalId).primary_key())
                    .col(string(OngoingVote::GuildId))
                    .col(string(OngoingVote::Title))
                    .col(string(OngoingVote::ChannelId))
                    .col(string(OngoingVote::ThreadId))
                    .col(string(OngoingVote::MessageId))
                    .col(timestamp(OngoingVote::PublishedAt))
                    .col(timestamp(OngoingVote::EndTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ongoing_vote_proposal_id")
                            .from(OngoingVote::Table, OngoingVote::ProposalId)
                            .to(Proposal::Table, Proposal::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Start-up re-arming scans by end time
        manager
            .create_index(
                Index::create()
                    .name("idx_ongoing_vote_end_time")
                    .table(OngoingVote::Table)
                    .col(OngoingVote::EndTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ongoing_vote_end_time")
                    .table(OngoingVote::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OngoingVote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OngoingVote {
    Table,
    ProposalId,
    GuildId,
    Title,
    ChannelId,
    ThreadId,
    MessageId,
    PublishedAt,
    EndTime,
}
