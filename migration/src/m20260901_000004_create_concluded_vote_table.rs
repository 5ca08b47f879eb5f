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
                    .table(ConcludedVote::Table)
                    .if_not_exists()
                    .col(integer(ConcludedVote::ProposalId).primary_key())
                    .col(string(ConcludedVote::GuildId))
                    .col(string(ConcludedVote::Title))
                    .col(string(ConcludedVote::ChannelId))
                    .col(string(ConcludedVote::ThreadId))
                    .col(integer(ConcludedVote::YesCount))
                    .col(integer(ConcludedVote::NoCount))
                    .col(integer(ConcludedVote::AbstainCount))
                    .col(boolean(ConcludedVote::Passed))
                    .col(
                        timestamp(ConcludedVote::ConcludedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string_null(ConcludedVote::SnapshotUrl))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_concluded_vote_proposal_id")
                            .from(ConcludedVote::Table, ConcludedVote::ProposalId)
                            .to(Proposal::Table, Proposal::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_concluded_vote_guild_id")
                    .table(ConcludedVote::Table)
                    .col(ConcludedVote::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_concluded_vote_guild_id")
                    .table(ConcludedVote::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ConcludedVote::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConcludedVote {
    Table,
    ProposalId,
    GuildId,
    Title,
    ChannelId,
    ThreadId,
    YesCount,
    NoCount,
    AbstainCount,
    Passed,
    ConcludedAt,
    SnapshotUrl,
}
