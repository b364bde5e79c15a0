//! HTTP routes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_shared::{PlayerPayload, PlayerResponse};

use crate::app::App;
use crate::use_cases::management::ManagementError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/rest/players", get(list_players).post(create_player))
        .route("/rest/players/count", get(count_players))
        .route(
            "/rest/players/{id}",
            get(get_player).post(update_player).delete(delete_player),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Players
// =============================================================================

async fn list_players(
    State(app): State<Arc<App>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let players = app.use_cases.management.player.list(&params).await?;
    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}

async fn count_players(
    State(app): State<Arc<App>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(app.use_cases.management.player.count(&params).await?))
}

async fn create_player(
    State(app): State<Arc<App>>,
    payload: Result<Json<PlayerPayload>, JsonRejection>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let Json(payload) = payload?;
    let patch = payload.into_patch().map_err(ManagementError::from)?;
    let player = app.use_cases.management.player.create(patch).await?;
    Ok(Json(player.into()))
}

async fn get_player(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let player = app
        .use_cases
        .management
        .player
        .get(parse_id(&id)?)
        .await?;
    Ok(Json(player.into()))
}

async fn update_player(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerPayload>, JsonRejection>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let patch = payload.into_patch().map_err(ManagementError::from)?;
    let player = app.use_cases.management.player.update(id, patch).await?;
    Ok(Json(player.into()))
}

async fn delete_player(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .player
        .delete(parse_id(&id)?)
        .await?;
    Ok(StatusCode::OK)
}

/// Path ids must at least be integers; range checks happen in the use case.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid player id", raw)))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<ManagementError> for ApiError {
    fn from(e: ManagementError) -> Self {
        match e {
            ManagementError::MalformedRequest(_) | ManagementError::Validation(_) => {
                ApiError::BadRequest(e.to_string())
            }
            ManagementError::NotFound { .. } => ApiError::NotFound,
            ManagementError::Repo(err) => {
                tracing::warn!(error = %err, "Player store failure");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
