//! Background jobs: the cron-driven event poll and one-shot vote conclusion timers.

pub mod event_poll;
pub mod vote_timer;
