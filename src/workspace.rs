use crate::edit_model::EditModelStore;
use crate::visibility::VisibilityConfiguration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to read workspace '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse workspace '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write workspace '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize workspace: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Persisted state of one alarm widget: its filters configuration and edit models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub configuration: VisibilityConfiguration,
    #[serde(default)]
    pub edit_models: EditModelStore,
}

impl Workspace {
    pub fn new(configuration: VisibilityConfiguration) -> Self {
        Self {
            configuration,
            edit_models: EditModelStore::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, WorkspaceError> {
        let path_display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| WorkspaceError::Read {
            path: path_display.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| WorkspaceError::Parse {
            path: path_display,
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), WorkspaceError> {
        let json = serde_json::to_string_pretty(self).map_err(WorkspaceError::Serialize)?;
        fs::write(path, json).map_err(|source| WorkspaceError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}
