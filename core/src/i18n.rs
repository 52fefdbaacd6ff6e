use std::collections::HashMap;
use std::path::Path;

use crate::error::LoadError;

/// Flat key→text table for one language, loaded from
/// `<locales_dir>/<lang>.json`.
///
/// Lookup never fails: an unknown key resolves to itself, and a failed load
/// degrades to an empty table so every key renders verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    language: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            entries: HashMap::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Display text for `key`, or `key` verbatim when absent.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub async fn load(locales_dir: &Path, language: &str) -> Result<Self, LoadError> {
        let path = locales_dir.join(format!("{language}.json"));
        let bytes = tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let entries: HashMap<String, String> =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Json {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            language: language.to_string(),
            entries,
        })
    }
}

/// Language codes with a catalog file under `locales_dir`, sorted. An
/// unreadable directory yields an empty list.
pub fn available_languages(locales_dir: &Path) -> Vec<String> {
    let Ok(dir) = std::fs::read_dir(locales_dir) else {
        return Vec::new();
    };
    let mut languages: Vec<String> = dir
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            } else {
                None
            }
        })
        .collect();
    languages.sort();
    languages
}
