use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use dermscore_service::submit::{self, ToolResultRequest, ToolSubmitResponse};

use crate::error::ApiError;
use crate::middleware::auth::CallerIdentity;
use crate::state::AppState;

/// `submitToolResult`
pub async fn submit_tool_result(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    payload: Result<Json<ToolResultRequest>, JsonRejection>,
) -> Result<Json<ToolSubmitResponse>, ApiError> {
    let caller = identity.require()?;
    let Json(request) = payload?;
    let response =
        submit::submit_tool_result(state.store.as_ref(), request, Some(caller)).await?;
    Ok(Json(response))
}
