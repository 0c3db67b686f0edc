use std::collections::HashSet;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use dermscore_core::collections::{RESULTS, field};
use dermscore_core::models::result::ScoreResult;
use dermscore_export::{render_csv, render_text};
use dermscore_storage::document::MAX_IN_VALUES;
use dermscore_storage::{DocumentStore, Query};

use crate::caller::{self, Caller};
use crate::error::ServiceError;

pub const MAX_EXPORT_SESSIONS: usize = 25;

/// Session ids per underlying `in` query.
pub const FETCH_CHUNK_SIZE: usize = MAX_IN_VALUES;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub session_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub text: String,
    pub csv: String,
}

/// Export every result of the given sessions as text and CSV.
///
/// Non-admin callers only see their own results. Results are ordered by
/// creation time; a result without a timestamp sorts as if created now.
pub async fn generate_result_export(
    store: &dyn DocumentStore,
    request: ExportRequest,
    caller: Option<&Caller>,
) -> Result<ExportResponse, ServiceError> {
    let caller = caller::require(caller)?;

    let count = request.session_ids.len();
    if count == 0 || count > MAX_EXPORT_SESSIONS {
        return Err(ServiceError::InvalidArgument(format!(
            "sessionIds must contain between 1 and {MAX_EXPORT_SESSIONS} ids (got {count})"
        )));
    }

    let mut seen = HashSet::new();
    let session_ids: Vec<String> = request
        .session_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let mut results = fetch_results(store, &session_ids).await?;
    results.retain(|r| caller.admin || r.user_id == caller.uid);

    let now = jiff::Timestamp::now();
    results.sort_by_key(|r| r.created_at.unwrap_or(now));

    info!(
        sessions = session_ids.len(),
        results = results.len(),
        admin = caller.admin,
        "generated result export"
    );

    Ok(ExportResponse {
        text: render_text(&results)?,
        csv: render_csv(&results)?,
    })
}

/// Fetch results for `session_ids`, one concurrent query per chunk.
/// Documents that no longer decode are left out of the export.
async fn fetch_results(
    store: &dyn DocumentStore,
    session_ids: &[String],
) -> Result<Vec<ScoreResult>, ServiceError> {
    let fetches = session_ids.chunks(FETCH_CHUNK_SIZE).map(|chunk| {
        let query = Query::new().where_in(
            field::SESSION_ID,
            chunk.iter().map(|id| Value::String(id.clone())).collect(),
        );
        async move { store.query(RESULTS, &query).await }
    });

    let batches = try_join_all(fetches).await?;

    let mut results = Vec::new();
    for snapshot in batches.into_iter().flatten() {
        match snapshot.decode::<ScoreResult>() {
            Ok(result) => results.push(result),
            Err(e) => warn!(result_id = %snapshot.id, error = %e, "skipping unreadable result"),
        }
    }
    Ok(results)
}
