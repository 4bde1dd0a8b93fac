use crate::config::ConfigError;
use crate::edit_model::EditModelError;
use crate::filter::FilterError;
use crate::query::QueryError;
use crate::visibility::VisibilityError;
use crate::workspace::WorkspaceError;
use thiserror::Error;

/// Any error surfaced by the alarm filter library
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Visibility(#[from] VisibilityError),

    #[error(transparent)]
    EditModel(#[from] EditModelError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

pub type Result<T> = std::result::Result<T, Error>;
