use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub mod synth;
pub use synth::*;

// Technical keys targeted by the sanitize actions.
pub const KEY_CAMERA_MODEL: &str = "camera model";
pub const KEY_LOCATION: &str = "location";

/// Normalized file type. Anything that is not an exact match for one of the
/// accepted MIME types collapses to `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FileKind {
    Jpeg,
    Png,
    Pdf,
    #[default]
    Unknown,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "image/jpeg" => FileKind::Jpeg,
            "image/png" => FileKind::Png,
            "application/pdf" => FileKind::Pdf,
            _ => FileKind::Unknown,
        }
    }

    /// The wire representation used in the export document.
    pub fn mime(&self) -> &'static str {
        match self {
            FileKind::Jpeg => "image/jpeg",
            FileKind::Png => "image/png",
            FileKind::Pdf => "application/pdf",
            FileKind::Unknown => "unknown",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, FileKind::Jpeg | FileKind::Png)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FileKind::Jpeg | FileKind::Png => "🖼",
            FileKind::Pdf => "📕",
            FileKind::Unknown => "📄",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl Serialize for FileKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.mime())
    }
}

/// Value of a fabricated technical field. The export contract allows strings
/// and numbers, nothing else.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TechValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for TechValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechValue::Text(s) => f.write_str(s),
            TechValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TechValue {
    fn from(s: &str) -> Self {
        TechValue::Text(s.to_string())
    }
}

impl From<i64> for TechValue {
    fn from(n: i64) -> Self {
        TechValue::Number(n)
    }
}

/// Open mapping from field name to value. Keys keep their insertion order so
/// the export document and the Technical tab render fields the way the
/// synthesizer laid them out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TechnicalMetadata {
    fields: Vec<(String, TechValue)>,
}

impl TechnicalMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TechValue>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<TechValue> {
        let idx = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn get(&self, key: &str) -> Option<&TechValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TechValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for TechnicalMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Derived at creation, never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralMetadata {
    pub file_name: String,
    pub file_type: FileKind,
    pub file_size: String,
}

/// The user-controlled slice of the record. Tags are a single
/// comma-separated string, as entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditableMetadata {
    pub title: String,
    pub author: String,
    pub description: String,
    pub tags: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileMetadata {
    pub general: GeneralMetadata,
    pub technical: TechnicalMetadata,
    pub editable: EditableMetadata,
}
