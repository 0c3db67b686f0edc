pub mod aggregate;
pub mod input;
pub mod result;
pub mod session;
pub mod template;
