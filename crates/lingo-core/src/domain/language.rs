//! Language tags and text direction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language tags rendered right-to-left.
///
/// Matching is an exact, case-sensitive string comparison against the tag
/// as supplied. `iw` is the legacy Hebrew code some engines still emit.
pub const RTL_LANGUAGE_CODES: &[&str] = &["ar", "he", "iw", "fa", "ur"];

/// Layout direction for a sentence row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left-to-right.
    Ltr,
    /// Right-to-left (mirrored layout).
    Rtl,
}

impl TextDirection {
    /// The value of an HTML `dir` attribute for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// A BCP-47-like language tag such as `"en"` or `"he"`.
///
/// The tag is stored trimmed and otherwise verbatim; it is handed to the
/// speech engine as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a language code, returning `None` for a blank tag.
    pub fn new(tag: impl AsRef<str>) -> Option<Self> {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            None
        } else {
            Some(Self(tag.to_string()))
        }
    }

    /// The tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this tag is in the right-to-left set.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGE_CODES.contains(&self.0.as_str())
    }

    /// Layout direction for text in this language.
    #[must_use]
    pub fn direction(&self) -> TextDirection {
        if self.is_rtl() {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A language offered by the dialogue tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    /// Language tag.
    pub code: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

/// Languages the dialogue tool offers for input and output.
pub const SUPPORTED_LANGUAGES: &[LanguageOption] = &[
    LanguageOption {
        code: "en",
        name: "English",
    },
    LanguageOption {
        code: "ar",
        name: "Arabic",
    },
    LanguageOption {
        code: "he",
        name: "Hebrew",
    },
];
