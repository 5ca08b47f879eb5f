use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    service::publisher::{ProposalPublisher, ScriptPublisher},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the ledger publisher, or `None` when no publisher command is configured.
pub fn setup_publisher(config: &Config) -> Option<Arc<dyn ProposalPublisher>> {
    match &config.publisher {
        Some(publisher) => {
            tracing::info!("Ledger publisher enabled ({})", publisher.command);
            Some(Arc::new(ScriptPublisher::new(publisher.clone())))
        }
        None => {
            tracing::info!("PUBLISHER_COMMAND not set, passed proposals will not be submitted");
            None
        }
    }
}
