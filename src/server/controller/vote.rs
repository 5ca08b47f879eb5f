use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        vote::{ConcludedVoteDto, OngoingVoteDto},
    },
    server::{error::AppError, service::vote::history::VoteHistoryService, state::AppState},
};

/// Tag for grouping vote endpoints in OpenAPI documentation
pub const VOTE_TAG: &str = "vote";

/// List the ongoing votes of a guild.
///
/// Votes are ordered by the time their window closes, soonest first.
///
/// # Returns
/// - `200 OK` - Ongoing votes, possibly empty
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/votes/ongoing",
    tag = VOTE_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Ongoing votes", body = Vec<OngoingVoteDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ongoing_votes(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let votes = VoteHistoryService::new(&state.db)
        .get_ongoing(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(votes)))
}

/// List the concluded votes of a guild with their tallies and ledger links.
///
/// # Returns
/// - `200 OK` - Concluded votes, most recent first
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/votes/concluded",
    tag = VOTE_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Concluded votes", body = Vec<ConcludedVoteDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_concluded_votes(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let votes = VoteHistoryService::new(&state.db)
        .get_concluded(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(votes)))
}
