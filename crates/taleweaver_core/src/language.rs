//! Language tags a story can be generated in.

use serde::{Deserialize, Serialize};

/// Supported story languages.
///
/// The tag is chosen by the requester at creation and is immutable on the
/// story row. Unknown tags are rejected at validation time.
///
/// # Examples
///
/// ```
/// use taleweaver_core::Language;
/// use std::str::FromStr;
///
/// let lang = Language::from_str("en").unwrap();
/// assert_eq!(lang, Language::English);
/// assert_eq!(lang.tag(), "en");
/// assert!(Language::from_str("tlh").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Language {
    /// English
    #[strum(serialize = "en")]
    #[serde(rename = "en")]
    English,
    /// Spanish
    #[strum(serialize = "es")]
    #[serde(rename = "es")]
    Spanish,
    /// French
    #[strum(serialize = "fr")]
    #[serde(rename = "fr")]
    French,
    /// German
    #[strum(serialize = "de")]
    #[serde(rename = "de")]
    German,
    /// Italian
    #[strum(serialize = "it")]
    #[serde(rename = "it")]
    Italian,
    /// Portuguese
    #[strum(serialize = "pt")]
    #[serde(rename = "pt")]
    Portuguese,
}

impl Language {
    /// The BCP 47 primary tag for this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
        }
    }

    /// English name of the language, used in generation instructions.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
        }
    }
}
