use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::event::EventAnnouncement;

/// Ledger of announcements made for guild scheduled events.
///
/// Each announcement kind is claimed with a conditional update on a null timestamp, so an
/// event is announced at most once per kind even when the poller and the creation listener
/// race each other.
pub struct EventAnnouncementRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventAnnouncementRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Claims the upcoming-events post for an event.
    ///
    /// # Returns
    /// - `Ok(true)`: This caller claimed the post and should announce the event
    /// - `Ok(false)`: The event was already posted
    pub async fn claim_posted(&self, guild_id: u64, event_id: u64) -> Result<bool, DbErr> {
        self.ensure_row(guild_id, event_id).await?;

        let result = entity::prelude::EventAnnouncement::update_many()
            .col_expr(
                entity::event_announcement::Column::PostedAt,
                Expr::value(Some(Utc::now())),
            )
            .filter(entity::event_announcement::Column::EventId.eq(event_id.to_string()))
            .filter(entity::event_announcement::Column::PostedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Releases a posted claim after the announcement could not be delivered.
    pub async fn release_posted(&self, event_id: u64) -> Result<(), DbErr> {
        entity::prelude::EventAnnouncement::update_many()
            .col_expr(
                entity::event_announcement::Column::PostedAt,
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .filter(entity::event_announcement::Column::EventId.eq(event_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Claims the creation announcement for an event.
    ///
    /// # Returns
    /// - `Ok(true)`: This caller claimed the announcement
    /// - `Ok(false)`: The creation of this event was already announced
    pub async fn claim_notified(&self, guild_id: u64, event_id: u64) -> Result<bool, DbErr> {
        self.ensure_row(guild_id, event_id).await?;

        let result = entity::prelude::EventAnnouncement::update_many()
            .col_expr(
                entity::event_announcement::Column::NotifiedAt,
                Expr::value(Some(Utc::now())),
            )
            .filter(entity::event_announcement::Column::EventId.eq(event_id.to_string()))
            .filter(entity::event_announcement::Column::NotifiedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Releases a creation-announcement claim after the notice could not be delivered.
    pub async fn release_notified(&self, event_id: u64) -> Result<(), DbErr> {
        entity::prelude::EventAnnouncement::update_many()
            .col_expr(
                entity::event_announcement::Column::NotifiedAt,
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .filter(entity::event_announcement::Column::EventId.eq(event_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn find_by_event_id(&self, event_id: u64) -> Result<Option<EventAnnouncement>, DbErr> {
        entity::prelude::EventAnnouncement::find_by_id(event_id.to_string())
            .one(self.db)
            .await?
            .map(EventAnnouncement::from_entity)
            .transpose()
    }

    /// Removes the ledger row of a deleted event.
    pub async fn delete(&self, event_id: u64) -> Result<(), DbErr> {
        entity::prelude::EventAnnouncement::delete_by_id(event_id.to_string())
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Inserts an empty ledger row unless one already exists.
    async fn ensure_row(&self, guild_id: u64, event_id: u64) -> Result<(), DbErr> {
        let result = entity::prelude::EventAnnouncement::insert(
            entity::event_announcement::ActiveModel {
                event_id: ActiveValue::Set(event_id.to_string()),
                guild_id: ActiveValue::Set(guild_id.to_string()),
                posted_at: ActiveValue::Set(None),
                notified_at: ActiveValue::Set(None),
            },
        )
        .on_conflict(
            OnConflict::column(entity::event_announcement::Column::EventId)
                .do_nothing()
                .to_owned(),
        )
        .exec(self.db)
        .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod test;
