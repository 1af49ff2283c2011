//! Release notes as authored in the documentation YAML files.
//!
//! A file looks like:
//!
//! ```yaml
//! releasenotes:
//!   - date_publish: 08.05.2024
//!     title:
//!       ru: Заголовок
//!       en: Title
//!     text:
//!       ru:
//!         - Пункт 1
//!       en:
//!         - Item 1
//! ```

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::locale::Locale;
use crate::text_block::TextBlock;

/// Top-level key holding the list of notes.
pub const RELEASE_NOTES_KEY: &str = "releasenotes";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("release note #{index} is malformed: {source}")]
    Note {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

/// One entry of a file's `releasenotes` list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: BTreeMap<String, Option<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: BTreeMap<String, TextBlock>,
    /// `DD.MM.YYYY`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_publish: String,
}

impl NoteRecord {
    /// Title for `locale`, empty when the file does not provide one.
    pub fn title_for(&self, locale: Locale) -> &str {
        self.title
            .get(locale.as_str())
            .and_then(Option::as_deref)
            .unwrap_or("")
    }

    pub fn text_for(&self, locale: Locale) -> Option<&TextBlock> {
        self.text.get(locale.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the notes of one YAML document.
///
/// An empty document, a missing `releasenotes` key or a `releasenotes` value
/// that is not a list all yield an empty vector.
pub fn parse_release_notes(content: &str) -> Result<Vec<NoteRecord>, ParseError> {
    let document: Value = serde_yaml::from_str(content)?;
    let notes = match document.get(RELEASE_NOTES_KEY) {
        Some(Value::Sequence(items)) => items,
        _ => return Ok(Vec::new()),
    };

    notes
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_yaml::from_value(item.clone()).map_err(|source| ParseError::Note { index, source })
        })
        .collect()
}
