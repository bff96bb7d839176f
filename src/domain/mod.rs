//! Framework-independent entities and value types.

pub mod category;
pub mod llm_response;
pub mod types;
