use thiserror::Error;

/// The first input that failed validation. `message` is shown to the
/// submitting clinician as-is.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub input_id: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(input_id: &str, message: impl Into<String>) -> Self {
        Self {
            input_id: input_id.to_string(),
            message: message.into(),
        }
    }
}
