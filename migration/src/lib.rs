pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_discord_guild_table;
mod m20260901_000002_create_proposal_table;
mod m20260901_000003_create_ongoing_vote_table;
mod m20260901_000004_create_concluded_vote_table;
mod m20260902_000005_create_contributor_table;
mod m20260902_000006_create_mention_table;
mod m20260903_000007_create_event_announcement_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_discord_guild_table::Migration),
            Box::new(m20260901_000002_create_proposal_table::Migration),
            Box::new(m20260901_000003_create_ongoing_vote_table::Migration),
            Box::new(m20260901_000004_create_concluded_vote_table::Migration),
            Box::new(m20260902_000005_create_contributor_table::Migration),
            Box::new(m20260902_000006_create_mention_table::Migration),
            Box::new(m20260903_000007_create_event_announcement_table::Migration),
        ]
    }
}
