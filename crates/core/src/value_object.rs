//! Value objects: equality by value, not identity.
//!
//! The only value object the admin panel needs is the bilingual text field.
//! Every user-facing text on products and team members is carried in English
//! and Arabic, and both halves are mandatory for a record to pass validation.

use serde::{Deserialize, Deserializer, Serialize};

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. Two `LocalizedText`
/// values with the same strings are the same text.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Bilingual text field with mandatory `en` and `ar` halves.
///
/// Missing halves decode as empty strings; edit payloads from the API are
/// sometimes partial and the form layer needs a full pair to work with.
/// Older records carry a bare string, which decodes as the English half.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Plain(String),
            Pair {
                #[serde(default)]
                en: String,
                #[serde(default)]
                ar: String,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Plain(en) => Self { en, ar: String::new() },
            Wire::Pair { en, ar } => Self { en, ar },
        })
    }
}

impl ValueObject for LocalizedText {}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Both halves present (non-empty).
    pub fn is_complete(&self) -> bool {
        !self.en.is_empty() && !self.ar.is_empty()
    }

    /// Both halves empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty() && self.ar.trim().is_empty()
    }

    /// Case-insensitive substring match against either language.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.en.to_lowercase().contains(&needle) || self.ar.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_both_languages() {
        assert!(LocalizedText::new("Vitamin C", "فيتامين سي").is_complete());
        assert!(!LocalizedText::new("Vitamin C", "").is_complete());
        assert!(!LocalizedText::new("", "فيتامين سي").is_complete());
    }

    #[test]
    fn blank_ignores_whitespace() {
        assert!(LocalizedText::new("  ", "\t").is_blank());
        assert!(!LocalizedText::new("", "x").is_blank());
    }

    #[test]
    fn partial_payload_decodes_with_empty_half() {
        let text: LocalizedText = serde_json::from_str(r#"{"en":"Omega 3"}"#).unwrap();
        assert_eq!(text, LocalizedText::new("Omega 3", ""));
    }

    #[test]
    fn bare_string_decodes_as_english() {
        let text: LocalizedText = serde_json::from_str(r#""Dr. Sara""#).unwrap();
        assert_eq!(text, LocalizedText::new("Dr. Sara", ""));
    }
}
