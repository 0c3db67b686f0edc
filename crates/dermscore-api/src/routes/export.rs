use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use dermscore_service::export::{self, ExportRequest, ExportResponse};

use crate::error::ApiError;
use crate::middleware::auth::CallerIdentity;
use crate::state::AppState;

/// `generateResultExport`
pub async fn generate_result_export(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let caller = identity.require()?;
    let Json(request) = payload?;
    let response =
        export::generate_result_export(state.store.as_ref(), request, Some(caller)).await?;
    Ok(Json(response))
}
