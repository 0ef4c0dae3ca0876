//! Game API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use panned_core::{GameError, GuessOutcome, MovieSummary, RoundStart};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessRequest {
    pub token: String,
    pub guess_movie_id: u32,
    /// Set on the player's last allowed guess.
    #[serde(default)]
    pub reveal_if_wrong: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<MovieSummary>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A [`GameError`] rendered as an HTTP response.
pub struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            GameError::NoCandidateFound => (StatusCode::SERVICE_UNAVAILABLE, self.0.to_string()),
            GameError::InvalidSession => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            GameError::UnknownGuess(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            // Upstream details stay in the logs.
            GameError::UpstreamUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                "Movie database unavailable, please try again".to_string(),
            ),
            GameError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/game/start
///
/// Pick a puzzle and return its reviews with a signed round token.
pub async fn start_game(State(state): State<Arc<AppState>>) -> Result<Json<RoundStart>, ApiError> {
    Ok(Json(state.game().start_round().await?))
}

/// POST /api/v1/game/guess
///
/// Judge a guess against the round encoded in the token.
pub async fn submit_guess(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GuessOutcome>, ApiError> {
    let outcome = state
        .game()
        .submit_guess(
            &request.token,
            request.guess_movie_id,
            request.reveal_if_wrong,
        )
        .await?;

    Ok(Json(outcome))
}

/// GET /api/v1/game/search?q=
///
/// Title search for the guess box. Never fails; upstream errors yield no results.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    Json(SearchResponse {
        results: state.game().search(&params.q).await,
    })
}
