use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, contributor::ContributorMentionsDto},
    server::{error::AppError, service::contributor::ContributorService, state::AppState},
};

/// Tag for grouping contributor endpoints in OpenAPI documentation
pub const CONTRIBUTOR_TAG: &str = "contributor";

/// Get a contributor's registration and most recent relayed mentions.
///
/// Removed contributors keep their history.
///
/// # Returns
/// - `200 OK` - Contributor and mentions, newest first
/// - `404 Not Found` - User was never registered in the guild
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/contributors/{user_id}/mentions",
    tag = CONTRIBUTOR_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("user_id" = String, Path, description = "Discord user ID of the contributor")
    ),
    responses(
        (status = 200, description = "Contributor and recent mentions", body = ContributorMentionsDto),
        (status = 404, description = "Not a registered contributor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_contributor_mentions(
    State(state): State<AppState>,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let mentions = ContributorService::new(&state.db)
        .get_mentions_dto(guild_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(mentions)))
}
