use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use dermscore_core::collections::{RESULTS, SESSIONS};
use dermscore_core::models::result::{ScoreResult, ScoreValue};
use dermscore_core::models::session::SessionStatus;
use dermscore_engine::evaluate;
use dermscore_storage::{DocumentStore, Transaction};

use crate::caller::{self, Caller};
use crate::error::ServiceError;
use crate::templates;

/// A request to score raw inputs against a stored template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub template_slug: String,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    #[serde(default)]
    pub patient_ref: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub session_id: String,
    pub result_id: String,
    pub score: f64,
    pub interpretation_label: String,
    pub interpretation_summary: String,
    pub copy_blocks: Vec<String>,
}

/// A result already computed by a client-side calculator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultRequest {
    pub tool_id: String,
    pub tool_slug: String,
    pub tool_name: String,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    pub result: ToolResult,
    #[serde(default)]
    pub patient_ref: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolResult {
    #[serde(default)]
    pub score: Option<ScoreValue>,
    pub interpretation: String,
    #[serde(default)]
    pub details: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSubmitResponse {
    pub session_id: String,
    pub result_id: String,
}

/// Score `request.inputs` against the latest template for the slug and
/// record the outcome.
///
/// Validation runs before anything is written; a rejected submission
/// leaves no trace in the store.
pub async fn submit_score(
    store: &dyn DocumentStore,
    request: ScoreRequest,
    caller: Option<&Caller>,
) -> Result<ScoreResponse, ServiceError> {
    let caller = caller::require(caller)?;
    require_field("templateSlug", &request.template_slug)?;

    let stored = templates::latest_by_slug(store, &request.template_slug)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Template \"{}\" not found", request.template_slug))
        })?;
    let template = &stored.template;

    let evaluation = evaluate(template, &request.inputs)?;

    let submission = Submission {
        template_id: stored.id.clone(),
        template_slug: template.slug.clone(),
        template_name: template.name.clone(),
        patient_ref: request.patient_ref,
        inputs: serde_json::to_value(&evaluation.inputs)?,
        score: Some(evaluation.score),
        score_text: None,
        interpretation_label: evaluation.interpretation_label.clone(),
        interpretation_summary: evaluation.interpretation_summary.clone(),
        copy_blocks: evaluation.copy_blocks.clone(),
        details: None,
    };

    let (session_id, result_id) =
        commit_submission(store, caller, request.session_id.as_deref(), submission).await?;

    Ok(ScoreResponse {
        session_id,
        result_id,
        score: evaluation.score,
        interpretation_label: evaluation.interpretation_label,
        interpretation_summary: evaluation.interpretation_summary,
        copy_blocks: evaluation.copy_blocks,
    })
}

/// Record a client-computed result without re-scoring it.
pub async fn submit_tool_result(
    store: &dyn DocumentStore,
    request: ToolResultRequest,
    caller: Option<&Caller>,
) -> Result<ToolSubmitResponse, ServiceError> {
    let caller = caller::require(caller)?;
    require_field("toolId", &request.tool_id)?;
    require_field("toolSlug", &request.tool_slug)?;
    require_field("toolName", &request.tool_name)?;

    let (score, score_text) = ScoreValue::into_parts(request.result.score);
    let submission = Submission {
        template_id: request.tool_id,
        template_slug: request.tool_slug,
        template_name: request.tool_name,
        patient_ref: request.patient_ref,
        inputs: Value::Object(request.inputs),
        score,
        score_text,
        interpretation_label: request.result.interpretation.clone(),
        interpretation_summary: request.result.interpretation,
        copy_blocks: Vec::new(),
        details: request.result.details,
    };

    let (session_id, result_id) =
        commit_submission(store, caller, request.session_id.as_deref(), submission).await?;

    Ok(ToolSubmitResponse {
        session_id,
        result_id,
    })
}

fn require_field(name: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidArgument(format!("{name} is required")));
    }
    Ok(())
}

/// The fields one submission writes, whatever its entry point.
struct Submission {
    template_id: String,
    template_slug: String,
    template_name: String,
    patient_ref: Option<String>,
    inputs: Value,
    score: Option<f64>,
    score_text: Option<String>,
    interpretation_label: String,
    interpretation_summary: String,
    copy_blocks: Vec<String>,
    details: Option<BTreeMap<String, Value>>,
}

/// Session fields written on every submission. Absent `patient_ref` and
/// `created_at` are left out so a merge preserves the stored values.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionWrite<'a> {
    user_id: &'a str,
    template_id: &'a str,
    template_slug: &'a str,
    template_name: &'a str,
    status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient_ref: Option<&'a str>,
    inputs: &'a Value,
    score: Option<f64>,
    score_text: Option<&'a str>,
    interpretation_label: &'a str,
    interpretation_summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<jiff::Timestamp>,
    updated_at: jiff::Timestamp,
}

/// Upsert the session and append a result in one transaction.
///
/// The ownership check reads the session inside the transaction, so a
/// concurrent change to it between check and write fails the commit.
/// Resubmitting to a session always appends a new result.
async fn commit_submission(
    store: &dyn DocumentStore,
    caller: &Caller,
    session_id: Option<&str>,
    submission: Submission,
) -> Result<(String, String), ServiceError> {
    let now = jiff::Timestamp::now();
    let mut tx = Transaction::new(store);

    let (session_id, is_new) = match session_id {
        Some(id) => {
            let existing = tx.get(SESSIONS, id).await?.ok_or_else(|| {
                ServiceError::NotFound(format!("Session \"{id}\" not found"))
            })?;
            let owner = existing.data.get("userId").and_then(Value::as_str);
            if owner != Some(caller.uid.as_str()) {
                return Err(ServiceError::PermissionDenied(format!(
                    "Session \"{id}\" belongs to another user"
                )));
            }
            (id.to_string(), false)
        }
        None => (Uuid::new_v4().to_string(), true),
    };

    let session = SessionWrite {
        user_id: &caller.uid,
        template_id: &submission.template_id,
        template_slug: &submission.template_slug,
        template_name: &submission.template_name,
        status: SessionStatus::Submitted,
        patient_ref: submission.patient_ref.as_deref(),
        inputs: &submission.inputs,
        score: submission.score,
        score_text: submission.score_text.as_deref(),
        interpretation_label: &submission.interpretation_label,
        interpretation_summary: &submission.interpretation_summary,
        created_at: is_new.then_some(now),
        updated_at: now,
    };
    if is_new {
        tx.create(SESSIONS, &session_id, &session)?;
    } else {
        tx.set(SESSIONS, &session_id, serde_json::to_value(&session)?, true);
    }

    let result_id = Uuid::new_v4().to_string();
    let result = ScoreResult {
        session_id: session_id.clone(),
        user_id: caller.uid.clone(),
        template_id: submission.template_id,
        template_slug: submission.template_slug,
        template_name: submission.template_name,
        score: submission.score,
        score_text: submission.score_text,
        interpretation_label: submission.interpretation_label,
        interpretation_summary: submission.interpretation_summary,
        copy_blocks: submission.copy_blocks,
        details: submission.details,
        created_at: Some(now),
    };
    tx.create(RESULTS, &result_id, &result)?;

    tx.commit().await?;

    info!(
        session_id = %session_id,
        result_id = %result_id,
        template = %result.template_slug,
        new_session = is_new,
        "submission recorded"
    );

    Ok((session_id, result_id))
}
