use serde::{Deserialize, Serialize};
use std::fmt;

/// Content languages carried by every release note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ru,
    En,
    Cn,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
            Locale::Cn => "cn",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per locale. Serializes as `{"ru": .., "en": .., "cn": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub ru: T,
    pub en: T,
    pub cn: T,
}

impl<T> Localized<T> {
    /// Build a record by evaluating `f` once per locale.
    pub fn from_fn(mut f: impl FnMut(Locale) -> T) -> Self {
        Localized {
            ru: f(Locale::Ru),
            en: f(Locale::En),
            cn: f(Locale::Cn),
        }
    }
}
