mod model;
mod server;

use std::sync::Arc;

use serenity::http::Http;
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot, config::Config, error::AppError, router, scheduler::event_poll, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bloom_bot=info,serenity=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let publisher = startup::setup_publisher(&config);

    tracing::info!("Starting Bloom Bot");

    let state = AppState::new(db, discord_http, config.clone(), publisher);

    // Votes that ended while the bot was down conclude right away
    state.vote_scheduler.rearm_all().await?;

    let _event_poll = event_poll::start_scheduler(
        &config.event_poll_cron,
        state.db.clone(),
        state.discord_http.clone(),
        state.event_settings.clone(),
    )
    .await?;

    let bot_client = bot::start::init_bot(&config, state.clone()).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let listener = tokio::net::TcpListener::bind(&config.http_bind).await?;
    tracing::info!("HTTP API listening on {}", config.http_bind);

    axum::serve(listener, router::router(state)).await?;

    Ok(())
}
