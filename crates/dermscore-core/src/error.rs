use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("duplicate input id '{input_id}' in template '{slug}'")]
    DuplicateInputId { slug: String, input_id: String },

    #[error("duplicate option value '{value}' for input '{input_id}' in template '{slug}'")]
    DuplicateOptionValue {
        slug: String,
        input_id: String,
        value: String,
    },
}
