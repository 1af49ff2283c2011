//! Maps parsed notes onto the release-notes admin API payload.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::locale::{Locale, Localized};
use crate::markup::{rewrite, LinkPolicy, MarkupPipeline};
use crate::note::NoteRecord;
use crate::scope::scope_for_filename;
use crate::text_block::{FlattenStyle, LineSeparator};

/// Expected layout of `date_publish`.
pub const DATE_PUBLISH_FORMAT: &str = "%d.%m.%Y";

/// chrono's `%Y` takes one to four digits; the year must be written out in full.
static DATE_PUBLISH_LAYOUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4}$").unwrap());

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid date_publish {value:?}, expected DD.MM.YYYY")]
    DateParse {
        value: String,
        /// Unset when the value does not have the `DD.MM.YYYY` layout at all.
        #[source]
        source: Option<chrono::ParseError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseNoteStatus {
    #[serde(rename = "RELEASE_NOTE_STATUS_PUBLISHED")]
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseNoteType {
    #[serde(rename = "RELEASE_NOTE_TYPE_NEW")]
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainTag {
    #[serde(rename = "RELEASE_NOTE_MAIN_TAG_MAJOR", alias = "major")]
    Major,
    #[serde(rename = "RELEASE_NOTE_MAIN_TAG_MINOR", alias = "minor")]
    Minor,
}

/// Request body for one note, as the admin API expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNotePayload {
    pub header: String,
    /// Same as `localized_texts.ru`.
    pub text: String,
    pub status: ReleaseNoteStatus,
    /// Midnight UTC, e.g. `2024-01-01T00:00:00Z`.
    pub date: String,
    pub main_tag: MainTag,
    pub scope: Vec<String>,
    #[serde(rename = "type")]
    pub note_type: ReleaseNoteType,
    pub localized_headers: Localized<String>,
    pub localized_texts: Localized<String>,
}

/// Named bundles of formatting choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatProfile {
    /// Newline-joined bullets, major tag, href and `<br />` fixes only.
    #[default]
    Classic,
    /// Newline+tab joined bullets with padded keys, minor tag, code-tag shims.
    Extended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub flatten: FlattenStyle,
    pub main_tag: MainTag,
    pub markup: MarkupPipeline,
}

impl FormatOptions {
    pub fn for_profile(profile: FormatProfile) -> Self {
        match profile {
            FormatProfile::Classic => FormatOptions {
                flatten: FlattenStyle {
                    separator: LineSeparator::Newline,
                    pad_keys: false,
                },
                main_tag: MainTag::Major,
                markup: MarkupPipeline::classic(),
            },
            FormatProfile::Extended => FormatOptions {
                flatten: FlattenStyle {
                    separator: LineSeparator::NewlineTab,
                    pad_keys: true,
                },
                main_tag: MainTag::Minor,
                markup: MarkupPipeline::extended(),
            },
        }
    }

    pub fn with_main_tag(mut self, main_tag: MainTag) -> Self {
        self.main_tag = main_tag;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::for_profile(FormatProfile::default())
    }
}

/// Strict `DD.MM.YYYY` parse.
pub fn parse_publish_date(value: &str) -> Result<NaiveDate, FormatError> {
    if !DATE_PUBLISH_LAYOUT_RE.is_match(value) {
        return Err(FormatError::DateParse {
            value: value.to_string(),
            source: None,
        });
    }
    NaiveDate::parse_from_str(value, DATE_PUBLISH_FORMAT).map_err(|source| FormatError::DateParse {
        value: value.to_string(),
        source: Some(source),
    })
}

/// Build the payload for one note read from `filename`.
pub fn format_note(
    filename: &str,
    note: &NoteRecord,
    options: &FormatOptions,
) -> Result<ReleaseNotePayload, FormatError> {
    let published = parse_publish_date(&note.date_publish)?;

    let localized_texts = Localized::from_fn(|locale: Locale| {
        let flattened = note
            .text_for(locale)
            .map(|block| block.flatten(options.flatten))
            .unwrap_or_default();
        rewrite(
            &flattened,
            &options.markup,
            LinkPolicy::for_publish_date(published, locale),
        )
    });
    let localized_headers = Localized::from_fn(|locale| note.title_for(locale).to_string());
    let scope = scope_for_filename(filename);

    debug!(
        file = filename,
        scope,
        date = %published,
        header = %localized_headers.ru,
        "Formatted release note"
    );

    Ok(ReleaseNotePayload {
        header: localized_headers.ru.clone(),
        text: localized_texts.ru.clone(),
        status: ReleaseNoteStatus::Published,
        date: published.format("%Y-%m-%dT00:00:00Z").to_string(),
        main_tag: options.main_tag,
        scope: vec![scope.to_string()],
        note_type: ReleaseNoteType::New,
        localized_headers,
        localized_texts,
    })
}

/// Format every note of one file, in order. The first bad date fails the whole call.
pub fn format_notes(
    filename: &str,
    notes: &[NoteRecord],
    options: &FormatOptions,
) -> Result<Vec<ReleaseNotePayload>, FormatError> {
    notes
        .iter()
        .map(|note| format_note(filename, note, options))
        .collect()
}
