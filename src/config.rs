use crate::edit_model::EditModelNames;
use crate::translate::TranslationTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Browse name of the edit model instance holding the filter values.
    pub edit_model_name: String,
    /// Browse name of the owning alarm widget; suffixes the schema type name.
    pub widget_name: String,
    pub locale: String,
    /// Localized texts per locale, keyed by text id.
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            edit_model_name: "DefaultFiltersToggle".to_string(),
            widget_name: "AlarmWidget".to_string(),
            locale: "en-US".to_string(),
            translations: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn edit_model_names(&self) -> EditModelNames {
        EditModelNames::new(&self.edit_model_name, &self.widget_name)
    }

    /// Translations of the configured locale; empty when the locale has none
    pub fn translator(&self) -> TranslationTable {
        TranslationTable::new(
            self.translations
                .get(&self.locale)
                .cloned()
                .unwrap_or_default(),
        )
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<AppConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static AppConfig {
    static DEFAULT_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::default);
    &DEFAULT_CONFIG
}
