use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ErrorCode;
use crate::middleware::auth::CallerIdentity;

/// Audit logging middleware.
///
/// Emits one `api_request` event per call with the resolved caller and,
/// for failures, the error code. Must run inside `identify_caller`.
/// Request bodies are never logged.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let caller = req
        .extensions()
        .get::<CallerIdentity>()
        .and_then(CallerIdentity::uid)
        .map(str::to_string);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let code = response.extensions().get::<ErrorCode>().map(|c| c.0);
    tracing::info!(
        method = %method,
        path = %path,
        status,
        caller = caller.as_deref().unwrap_or("anonymous"),
        error_code = code.unwrap_or("none"),
        "api_request"
    );

    response
}
