use serde::Serialize;
use tera::{Context, Tera};

use dermscore_core::models::result::ScoreResult;

use crate::error::ExportError;

const TEXT_TEMPLATE_NAME: &str = "result_export";

/// One block per result, separated by blank lines. No trailing newline.
const TEXT_TEMPLATE: &str = "{% for entry in entries %}{% if not loop.first %}

{% endif %}{{ entry.name }} — {{ entry.score }} ({{ entry.label }})
{{ entry.summary }}{% for block in entry.copy_blocks %}
{{ block }}{% endfor %}{% if entry.details %}
Details: {{ entry.details }}{% endif %}{% endfor %}";

#[derive(Serialize)]
struct TextEntry<'a> {
    name: &'a str,
    score: String,
    label: &'a str,
    summary: &'a str,
    copy_blocks: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Render results as plain text for pasting into a clinical record.
pub fn render_text(results: &[ScoreResult]) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEXT_TEMPLATE_NAME, TEXT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let entries = results
        .iter()
        .map(|r| {
            let details = match &r.details {
                Some(details) => Some(serde_json::to_string_pretty(details)?),
                None => None,
            };
            Ok(TextEntry {
                name: &r.template_name,
                score: r.display_score(),
                label: &r.interpretation_label,
                summary: &r.interpretation_summary,
                copy_blocks: &r.copy_blocks,
                details,
            })
        })
        .collect::<Result<Vec<_>, ExportError>>()?;

    let mut context = Context::new();
    context.insert("entries", &entries);

    Ok(tera.render(TEXT_TEMPLATE_NAME, &context)?)
}
