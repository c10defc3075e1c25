//! Form body decoding module
//!
//! Decodes `key=value&key=value` bodies into an ordered mapping and renders
//! the mapping back as response text. No percent-decoding is applied.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;

/// Prefix of every echo response body
pub const ECHO_PREFIX: &str = "Received POST data: ";

/// Output format used when echoing a parsed form
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EchoFormat {
    /// `{key1=value1, key2=value2}`
    #[default]
    Braces,
    /// `{"key1":"value1","key2":"value2"}`
    Json,
}

/// Parameters decoded from a form body.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the slot of the first occurrence, so iteration follows first-insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedForm {
    entries: Vec<(String, String)>,
}

impl ParsedForm {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a pair, last write wins
    pub fn insert(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            value.clone_into(&mut slot.1);
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse a form body.
///
/// Tokens are separated by `&`. A token is kept only when it splits on `=`
/// into exactly two non-empty segments; everything else is dropped.
pub fn parse(body: &str) -> ParsedForm {
    let mut form = ParsedForm::new();
    for token in body.split('&') {
        if let Some((key, value)) = split_pair(token) {
            form.insert(key, value);
        }
    }
    form
}

fn split_pair(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('=');
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() || key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Render the full echo response text for a parsed form
pub fn render(form: &ParsedForm, format: EchoFormat) -> String {
    match format {
        EchoFormat::Braces => format!("{ECHO_PREFIX}{form}"),
        EchoFormat::Json => {
            // Serializing string pairs into a String cannot fail
            let json = serde_json::to_string(form).unwrap_or_else(|_| "{}".to_string());
            format!("{ECHO_PREFIX}{json}")
        }
    }
}

impl fmt::Display for ParsedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for ParsedForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
