//! Closed language set and bilingual text.
//!
//! Every piece of user-facing narrative the engine produces is a `Localized`
//! value: both languages are always present, and the serialization layer picks
//! one at the boundary with `Localized::get`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the platform ships copy in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Parses a stored preference. Anything unrecognised falls back to the default (`es`).
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            _ => Language::Es,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Static bilingual text, used by the compile-time catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text {
    pub en: &'static str,
    pub es: &'static str,
}

impl Text {
    pub const fn new(en: &'static str, es: &'static str) -> Self {
        Self { en, es }
    }

    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Es => self.es,
        }
    }

    pub fn to_localized(self) -> Localized {
        Localized {
            en: self.en.to_string(),
            es: self.es.to_string(),
        }
    }
}

/// Owned bilingual text. Serializes as `{"en": "...", "es": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub es: String,
}

impl Localized {
    /// Builds a value by rendering the same template once per language.
    pub fn render(mut f: impl FnMut(Language) -> String) -> Self {
        Self {
            en: f(Language::En),
            es: f(Language::Es),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }
}

impl From<Text> for Localized {
    fn from(text: Text) -> Self {
        text.to_localized()
    }
}
