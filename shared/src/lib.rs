//! Assist AI Shared Library
//!
//! This crate contains the entity models, request/response types, language
//! tables and validation rules shared by the backend and its clients.

pub mod errors;
pub mod languages;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use languages::{Language, LANGUAGES};
pub use models::*;
pub use types::*;
