//! Decoding helpers for loosely typed API fields.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Decode a field that should be a string but may arrive as a number, `null`
/// or something else entirely.
///
/// Numbers and booleans keep their text form; anything else becomes an empty
/// string. Use with `#[serde(default, deserialize_with = "lenient_string")]`.
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
        Other(IgnoredAny),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Int(n) => n.to_string(),
        Loose::Float(n) => n.to_string(),
        Loose::Bool(b) => b.to_string(),
        Loose::Other(_) => String::new(),
    })
}
