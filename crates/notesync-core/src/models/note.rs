//! Note model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Server-assigned note identifier.
///
/// The API is not consistent about the JSON type of ids, so the value keeps
/// whatever representation it arrived with. Compare ids with [`same_id`],
/// never with `==`.
///
/// Numbers that do not fit an `i64` (large unsigned or fractional values)
/// are kept as text in the form a JavaScript client would print them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl NoteId {
    /// Canonical textual form used for every identity comparison.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

/// Identity comparison between two ids, after canonicalization.
pub fn same_id(left: &NoteId, right: &NoteId) -> bool {
    left.canonical() == right.canonical()
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Note ID cannot be empty".to_string()));
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NoteIdVisitor)
    }
}

struct NoteIdVisitor;

impl Visitor<'_> for NoteIdVisitor {
    type Value = NoteId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a note id (number or string)")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<NoteId, E> {
        Ok(NoteId::Number(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<NoteId, E> {
        Ok(i64::try_from(value).map_or_else(|_| NoteId::Text(value.to_string()), NoteId::Number))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<NoteId, E> {
        if !value.is_finite() {
            return Err(E::custom(format!("invalid note id: {value}")));
        }
        let whole = value.trunc();
        if whole == value && whole >= i64::MIN as f64 && whole < i64::MAX as f64 {
            Ok(NoteId::Number(whole as i64))
        } else {
            Ok(NoteId::Text(value.to_string()))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<NoteId, E> {
        Ok(NoteId::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<NoteId, E> {
        Ok(NoteId::Text(value))
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for NoteId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A note as stored by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier
    pub id: NoteId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Set by the server at creation, never changes afterwards.
    /// `None` when the server sent nothing readable.
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Advanced by the server on every mutation
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Title for display, with a placeholder for untitled notes.
    #[must_use]
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "Untitled Note"
        } else {
            title
        }
    }

    /// Whether this note carries the given id.
    pub fn has_id(&self, id: &NoteId) -> bool {
        same_id(&self.id, id)
    }
}

/// Payload for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Rejects drafts with neither a title nor any content.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() && self.content.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Please add a title or content to save the note.".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a server timestamp string.
///
/// Accepts RFC 3339, offset-less ISO-8601 datetimes with or without seconds,
/// and plain dates. Offset-less values are taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Read a timestamp from any JSON shape the API has been seen to send:
/// a string, epoch milliseconds, or a `[year, month, day, hour, minute,
/// second, nanos]` array.
pub fn timestamp_from_json(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(raw) => parse_timestamp(raw),
        serde_json::Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::from_timestamp_millis),
        serde_json::Value::Array(parts) => timestamp_from_parts(parts),
        _ => None,
    }
}

fn timestamp_from_parts(parts: &[serde_json::Value]) -> Option<DateTime<Utc>> {
    let field = |index: usize| -> Option<u32> {
        parts
            .get(index)
            .map_or(Some(0), |part| part.as_u64().and_then(|n| u32::try_from(n).ok()))
    };
    let year = i32::try_from(parts.first()?.as_i64()?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(1)?, field(2)?)?;
    date.and_hms_nano_opt(field(3)?, field(4)?, field(5)?, field(6)?)
        .map(|naive| naive.and_utc())
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Unreadable values decode to `None` so one odd note cannot fail a list.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let parsed = super::timestamp_from_json(&raw);
        if parsed.is_none() && !raw.is_null() {
            tracing::debug!(value = %raw, "Ignoring unreadable note timestamp");
        }
        Ok(parsed)
    }
}
