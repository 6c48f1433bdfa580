//! Wire types for the backend contract.
//!
//! Timestamps stay ISO-8601 strings end to end so a restore request can pass
//! them through byte-identical; chrono is only used to pretty-print them.

use serde::{Deserialize, Deserializer, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// A persisted chat session.
///
/// The backend may include extra fields (e.g. `message_count`); they are
/// ignored. Ids are coerced to strings even if the backend serializes them
/// as JSON numbers, so the restore payload always carries stable string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Session {
    /// Display title, falling back to a short-id form when untitled.
    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => format!("Session {}", short_id(&self.id)),
        }
    }
}

/// A message belonging to exactly one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One hit from a similarity query. Ephemeral, never persisted client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub prompt: String,
    pub response: String,
    #[serde(default)]
    pub score: f64,
}

/// First characters of an opaque id, for display fallbacks.
pub fn short_id(id: &str) -> String {
    id.chars().take(6).collect()
}

/// Formats an ISO-8601 timestamp for display, e.g. "2026-08-30 14:05".
///
/// Returns the raw string when it does not parse; the backend owns the
/// format and we never want to hide a timestamp over a parse quirk.
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    // Python's datetime.isoformat() omits the offset.
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    ts.to_string()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_prefers_title() {
        let session = Session {
            id: "abcdef123456".to_string(),
            title: Some("Groceries".to_string()),
            created_at: None,
        };
        assert_eq!(session.display_title(), "Groceries");
    }

    #[test]
    fn display_title_falls_back_to_short_id() {
        let session = Session {
            id: "abcdef123456".to_string(),
            title: None,
            created_at: None,
        };
        assert_eq!(session.display_title(), "Session abcdef");

        let blank = Session {
            id: "xyz".to_string(),
            title: Some("   ".to_string()),
            created_at: None,
        };
        assert_eq!(blank.display_title(), "Session xyz");
    }

    #[test]
    fn session_id_coerced_from_number() {
        let session: Session = serde_json::from_str(r#"{"id": 42, "title": null}"#).unwrap();
        assert_eq!(session.id, "42");
    }

    #[test]
    fn session_tolerates_extra_fields() {
        let json = r#"{"id":"a","title":"t","created_at":"2026-01-02T03:04:05","message_count":7}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, "a");
        assert_eq!(session.created_at.as_deref(), Some("2026-01-02T03:04:05"));
    }

    #[test]
    fn sender_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
        let sender: Sender = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(sender, Sender::Assistant);
    }

    #[test]
    fn search_result_defaults_missing_score() {
        let result: SearchResult =
            serde_json::from_str(r#"{"prompt":"p","response":"r"}"#).unwrap();
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn format_timestamp_handles_python_isoformat() {
        assert_eq!(
            format_timestamp("2026-08-30T14:05:09.123456"),
            "2026-08-30 14:05"
        );
        assert_eq!(
            format_timestamp("2026-08-30T14:05:09+00:00"),
            "2026-08-30 14:05"
        );
        assert_eq!(format_timestamp("not a date"), "not a date");
    }
}
