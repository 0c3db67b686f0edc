use serde_json::Value;

use dermscore_core::models::result::ScoreResult;

use crate::error::ExportError;

pub const CSV_HEADER: &str =
    "sessionId,templateName,score,interpretationLabel,interpretationSummary,details";

/// Render results as CSV with a fixed header. Every field is written as a
/// JSON string literal; newlines inside `details` become spaces.
pub fn render_csv(results: &[ScoreResult]) -> Result<String, ExportError> {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for result in results {
        let details = match &result.details {
            Some(details) => serde_json::to_string(details)?.replace('\n', " "),
            None => String::new(),
        };

        let fields = [
            result.session_id.clone(),
            result.template_name.clone(),
            result.display_score(),
            result.interpretation_label.clone(),
            result.interpretation_summary.clone(),
            details,
        ];

        lines.push(
            fields
                .into_iter()
                .map(|f| Value::String(f).to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(lines.join("\n"))
}
