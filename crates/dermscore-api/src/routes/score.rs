use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use dermscore_service::submit::{self, ScoreRequest, ScoreResponse};

use crate::error::ApiError;
use crate::middleware::auth::CallerIdentity;
use crate::state::AppState;

/// `calculateScore`
pub async fn calculate_score(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let caller = identity.require()?;
    let Json(request) = payload?;
    let response = submit::submit_score(state.store.as_ref(), request, Some(caller)).await?;
    Ok(Json(response))
}
