use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use dermscore_core::models::template::Template;
use dermscore_service::templates;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    id: String,
    slug: String,
    name: String,
    category: String,
    version: String,
    description: String,
}

/// Latest version of every stored template.
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateSummary>>, ApiError> {
    let stored = templates::list_latest(state.store.as_ref()).await?;

    let summaries = stored
        .into_iter()
        .map(|s| TemplateSummary {
            id: s.id,
            slug: s.template.slug,
            name: s.template.name,
            category: s.template.category,
            version: s.template.version,
            description: s.template.description,
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let stored = templates::latest_by_slug(state.store.as_ref(), &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Template \"{slug}\" not found")))?;
    Ok(Json(stored.template))
}
