pub mod export;
pub mod health;
pub mod score;
pub mod templates;
pub mod tool_result;
