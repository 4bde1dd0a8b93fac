use super::tree::PropertyType;
use crate::visibility::VisibilityError;
use thiserror::Error;

/// Errors raised while reading or updating the filters edit model
#[derive(Debug, Error)]
pub enum EditModelError {
    #[error("Edit model {0} filters not found")]
    NotFound(String),

    #[error("FilterModel attribute: {0} not found. Generate default settings again.")]
    MissingAttribute(String),

    #[error("FilterModel variable: {attribute}/{name} not found. Generate default settings again.")]
    MissingVariable { attribute: String, name: String },

    #[error("FilterModel variable {path} holds {found}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: PropertyType,
        found: PropertyType,
    },

    #[error(transparent)]
    Visibility(#[from] VisibilityError),
}
