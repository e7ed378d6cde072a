//! Template types and error definitions

use std::collections::BTreeMap;

use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template not found: {name}.{language}")]
    NotFound { name: String, language: String },

    #[error("Template {name} is missing value for placeholder: {placeholder}")]
    MissingValue { name: String, placeholder: String },

    #[error("Template {name} has an unterminated placeholder")]
    Unterminated { name: String },
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Interpolation values keyed by placeholder name
pub type TemplateParams = BTreeMap<String, String>;
