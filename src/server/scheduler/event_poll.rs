use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::event_notification::{EventNotificationService, EventSettings},
};

/// Starts the periodic upcoming-event announcements.
///
/// Each run announces, per guild, the scheduled events starting within the configured
/// lookahead that were not announced before.
///
/// # Arguments
/// - `cron`: Six-field cron expression (with seconds) for the poll
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for fetching and announcing events
/// - `settings`: Events channel and lookahead
pub async fn start_scheduler(
    cron: &str,
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    settings: Arc<EventSettings>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();
        let settings = settings.clone();

        Box::pin(async move {
            if let Err(e) = EventNotificationService::new(&db, http, &settings)
                .poll_all()
                .await
            {
                tracing::error!("Error polling upcoming events: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Event poll scheduler started ({})", cron);

    Ok(scheduler)
}
