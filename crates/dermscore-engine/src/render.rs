use std::collections::BTreeMap;
use std::fmt;

/// A value that can be substituted into a `{{placeholder}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Text(s) => f.write_str(s),
            TemplateValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::Text(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::Text(s)
    }
}

impl From<f64> for TemplateValue {
    fn from(n: f64) -> Self {
        TemplateValue::Number(n)
    }
}

pub type TemplateValues = BTreeMap<String, TemplateValue>;

/// Replace every `{{key}}` token in `body` with the matching value.
///
/// Keys are trimmed. Unknown keys render as an empty string. Single pass:
/// substituted text is never re-scanned.
pub fn render(body: &str, values: &TemplateValues) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find("}}") {
            Some(end) if is_key(&after[..end]) => {
                if let Some(value) = values.get(after[..end].trim()) {
                    out.push_str(&value.to_string());
                }
                rest = &after[end + 2..];
            }
            _ => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_key(inner: &str) -> bool {
    !inner.trim().is_empty() && !inner.contains('}')
}
