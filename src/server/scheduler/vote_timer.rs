//! One-shot timers concluding votes when their window closes.
//!
//! Timers live in memory only. On startup [`VoteScheduler::rearm_all`] rebuilds them from the
//! ongoing votes in the database, concluding overdue ones right away.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::{sync::Mutex, task::JoinHandle};

use crate::server::{
    data::vote::OngoingVoteRepository,
    error::AppError,
    service::{
        publisher::ProposalPublisher,
        vote::{VoteService, VoteSettings},
    },
    util::retry::{retry_with_backoff, Backoff},
};

struct ArmedTimer {
    /// Distinguishes a timer from the one that replaced it.
    generation: u64,
    handle: JoinHandle<()>,
}

struct Inner {
    db: DatabaseConnection,
    http: Arc<Http>,
    publisher: Option<Arc<dyn ProposalPublisher>>,
    settings: Arc<VoteSettings>,
    backoff: Backoff,
    timers: Mutex<HashMap<i32, ArmedTimer>>,
    next_generation: AtomicU64,
}

/// Owns the conclusion timer of every ongoing vote, at most one per proposal.
#[derive(Clone)]
pub struct VoteScheduler {
    inner: Arc<Inner>,
}

impl VoteScheduler {
    pub fn new(
        db: DatabaseConnection,
        http: Arc<Http>,
        publisher: Option<Arc<dyn ProposalPublisher>>,
        settings: Arc<VoteSettings>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                db,
                http,
                publisher,
                settings,
                backoff: Backoff::default(),
                timers: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Arms the conclusion timer of a vote, replacing any timer already armed for it.
    ///
    /// An `end_time` in the past fires immediately.
    pub async fn arm(&self, proposal_id: i32, end_time: DateTime<Utc>) {
        let delay = (end_time - Utc::now()).to_std().unwrap_or_default();
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);

        // Held across the spawn so a zero-delay timer cannot unregister before it is registered.
        let mut timers = self.inner.timers.lock().await;

        let scheduler = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.fire(proposal_id, generation).await;
        });

        if let Some(previous) = timers.insert(proposal_id, ArmedTimer { generation, handle }) {
            previous.handle.abort();
        }

        tracing::debug!(
            "Armed vote timer for proposal #{} in {:?}",
            proposal_id,
            delay
        );
    }

    /// Aborts a vote's timer.
    ///
    /// # Returns
    /// - `true`: A timer was armed and is now aborted
    /// - `false`: No timer was armed for the proposal
    pub async fn cancel(&self, proposal_id: i32) -> bool {
        match self.inner.timers.lock().await.remove(&proposal_id) {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Arms a timer for every ongoing vote in the database.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of timers armed
    pub async fn rearm_all(&self) -> Result<usize, AppError> {
        let votes = OngoingVoteRepository::new(&self.inner.db).get_all().await?;
        let count = votes.len();

        for vote in votes {
            self.arm(vote.proposal_id, vote.end_time).await;
        }

        tracing::info!("Re-armed {} vote timers", count);

        Ok(count)
    }

    pub async fn armed_count(&self) -> usize {
        self.inner.timers.lock().await.len()
    }

    async fn fire(&self, proposal_id: i32, generation: u64) {
        let inner = &self.inner;
        let service = VoteService::new(
            &inner.db,
            inner.http.clone(),
            inner.publisher.clone(),
            &inner.settings,
        );
        let label = format!("Concluding proposal #{}", proposal_id);

        if let Ok(Some(concluded)) =
            retry_with_backoff(&label, inner.backoff, || service.conclude(proposal_id)).await
        {
            tracing::debug!(
                "Timer concluded proposal #{} (passed: {})",
                concluded.proposal_id,
                concluded.passed
            );
        }

        let mut timers = inner.timers.lock().await;
        if timers
            .get(&proposal_id)
            .is_some_and(|timer| timer.generation == generation)
        {
            timers.remove(&proposal_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    fn scheduler(db: &DatabaseConnection) -> VoteScheduler {
        VoteScheduler::new(
            db.clone(),
            Arc::new(Http::new("")),
            None,
            Arc::new(VoteSettings {
                window: Duration::hours(48),
                quorum: 1,
                general_channel_name: "general-proposals".to_string(),
                budget_channel_name: "budget-proposals".to_string(),
            }),
        )
    }

    fn far_future() -> DateTime<Utc> {
        Utc::now() + Duration::days(365)
    }

    /// Expected: arming a proposal twice keeps a single timer
    #[tokio::test]
    async fn rearming_replaces_timer() {
        let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
        let scheduler = scheduler(test.db.as_ref().unwrap());

        scheduler.arm(1, far_future()).await;
        scheduler.arm(1, far_future()).await;
        scheduler.arm(2, far_future()).await;

        assert_eq!(scheduler.armed_count().await, 2);
    }

    #[tokio::test]
    async fn cancel_removes_timer() {
        let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
        let scheduler = scheduler(test.db.as_ref().unwrap());

        scheduler.arm(1, far_future()).await;

        assert!(scheduler.cancel(1).await);
        assert!(!scheduler.cancel(1).await);
        assert_eq!(scheduler.armed_count().await, 0);
    }

    /// Expected: one timer per ongoing vote after a restart
    #[tokio::test]
    async fn rearms_every_ongoing_vote() -> Result<(), AppError> {
        let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        for _ in 0..2 {
            let proposal = factory::proposal::ProposalFactory::new(db)
                .status("published")
                .build()
                .await?;
            factory::ongoing_vote::OngoingVoteFactory::new(db, &proposal)
                .end_time(far_future())
                .build()
                .await?;
        }

        let scheduler = scheduler(db);

        assert_eq!(scheduler.rearm_all().await?, 2);
        assert_eq!(scheduler.armed_count().await, 2);

        Ok(())
    }
}
