use log::debug;
use std::collections::BTreeMap;

/// Localized text lookup used for filter labels and generated conditions
pub trait Translate {
    fn lookup(&self, text_id: &str) -> Option<String>;

    /// Translate `text_id`, falling back to the raw id when no translation exists
    fn translate(&self, text_id: &str) -> String {
        match self.lookup(text_id) {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!("No translation for '{}', using the raw id", text_id);
                text_id.to_string()
            }
        }
    }
}

/// Translator that always falls back to the raw text id
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translate for NoTranslation {
    fn lookup(&self, _text_id: &str) -> Option<String> {
        None
    }
}

/// Translations of a single locale keyed by text id
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: BTreeMap<String, String>,
}

impl TranslationTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, text_id: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(text_id.into(), text.into());
    }
}

impl Translate for TranslationTable {
    fn lookup(&self, text_id: &str) -> Option<String> {
        self.entries.get(text_id).cloned()
    }
}
