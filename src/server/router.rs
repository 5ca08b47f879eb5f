use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        contributor::{self, CONTRIBUTOR_TAG},
        vote::{self, VOTE_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Bloom Bot", description = "Vote history and contributor mentions"),
    tags(
        (name = VOTE_TAG, description = "Ongoing and concluded proposal votes"),
        (name = CONTRIBUTOR_TAG, description = "Contributor mention relay history")
    )
)]
struct ApiDoc;

/// Builds the API routes with their OpenAPI document served at `/api/docs`.
pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(vote::get_ongoing_votes))
        .routes(routes!(vote::get_concluded_votes))
        .routes(routes!(contributor::get_contributor_mentions))
        .with_state(state)
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
