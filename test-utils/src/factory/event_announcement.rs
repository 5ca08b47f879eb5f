//! Event announcement ledger factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Records an event as already announced by the poller.
pub async fn create_posted_event(
    db: &DatabaseConnection,
    guild_id: &str,
    event_id: &str,
) -> Result<entity::event_announcement::Model, DbErr> {
    entity::event_announcement::ActiveModel {
        event_id: ActiveValue::Set(event_id.to_string()),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        posted_at: ActiveValue::Set(Some(Utc::now())),
        notified_at: ActiveValue::Set(None),
    }
    .insert(db)
    .await
}
