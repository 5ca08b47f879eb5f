//! Application state shared by the bot's event handlers, the background jobs and the HTTP API.
//!
//! The state is built once in `main` and cloned into every consumer. All fields are cheap to
//! clone: the database connection is a pool handle and everything else sits behind an `Arc`.

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    config::Config,
    scheduler::vote_timer::VoteScheduler,
    service::{
        event_notification::EventSettings, publisher::ProposalPublisher, vote::VoteSettings,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Discord REST client used by services and background jobs.
    pub discord_http: Arc<Http>,

    pub config: Arc<Config>,
    pub vote_settings: Arc<VoteSettings>,
    pub event_settings: Arc<EventSettings>,

    /// `None` when ledger submission is disabled.
    pub publisher: Option<Arc<dyn ProposalPublisher>>,

    /// Conclusion timers of ongoing votes.
    pub vote_scheduler: VoteScheduler,
}

impl AppState {
    /// Builds the state and the vote scheduler around it.
    ///
    /// Timers are not armed here; call [`VoteScheduler::rearm_all`] once the bot is set up.
    pub fn new(
        db: DatabaseConnection,
        discord_http: Arc<Http>,
        config: Config,
        publisher: Option<Arc<dyn ProposalPublisher>>,
    ) -> Self {
        let vote_settings = Arc::new(VoteSettings::from_config(&config));
        let event_settings = Arc::new(EventSettings::from_config(&config));
        let vote_scheduler = VoteScheduler::new(
            db.clone(),
            discord_http.clone(),
            publisher.clone(),
            vote_settings.clone(),
        );

        Self {
            db,
            discord_http,
            config: Arc::new(config),
            vote_settings,
            event_settings,
            publisher,
            vote_scheduler,
        }
    }
}
