//! Triage data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::relay::RelayedTask;

/// A message as delivered by the mail-fetch provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedMessage {
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Raw `From` header, e.g. `Jane <jane@example.com>`.
    #[serde(default)]
    pub from: String,
    /// When the message was sent, if the provider knew.
    ///
    /// Accepts RFC 3339 or a raw RFC 2822 `Date` header; anything else reads
    /// as `None`.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,
    /// Provider size estimate in bytes.
    #[serde(default)]
    pub size: u64,
    /// Decoded plain-text body.
    #[serde(default)]
    pub body: String,
}

impl FetchedMessage {
    /// Creates a message with subject, sender, and body.
    #[must_use]
    pub fn new(subject: impl Into<String>, from: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            from: from.into(),
            body: body.into(),
            ..Self::default()
        }
    }
}

/// Parses a message date, trying RFC 2822 (the `Date` header) then RFC 3339.
#[must_use]
pub fn parse_message_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_message_date))
}

/// Decision taken for a message before any model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Screening {
    /// A relayed task; parsed directly, no scoring.
    Relay {
        /// The recovered task.
        task: RelayedTask,
    },
    /// Scored above zero; worth extracting.
    Important {
        /// Importance score.
        score: i32,
    },
    /// Scored zero or below; dropped.
    Skipped {
        /// Importance score.
        score: i32,
    },
}

impl Screening {
    /// Short name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relay { .. } => "relay",
            Self::Important { .. } => "important",
            Self::Skipped { .. } => "skipped",
        }
    }

    /// Whether the message goes on to extraction or relay parsing.
    #[must_use]
    pub const fn is_kept(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }
}

/// A task ready for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionableTask {
    /// Subject of the source message.
    pub subject: String,
    /// Sender of the source message.
    pub from: String,
    /// The task, phrased as a to-do item.
    pub summary: String,
    /// `YYYY-MM-DD`, the relayed due date, or `No deadline`.
    pub deadline: String,
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Messages looked at.
    pub processed: usize,
    /// Relay messages turned into tasks.
    pub relayed: usize,
    /// Important messages the model turned into tasks.
    pub extracted: usize,
    /// Messages dropped by the scorer.
    pub skipped: usize,
    /// Important messages without an actionable task.
    pub not_actionable: usize,
    /// Extractor calls that failed.
    pub extractor_errors: usize,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineOutcome {
    /// Tasks in message order.
    pub tasks: Vec<ActionableTask>,
    /// Counters.
    pub stats: PipelineStats,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_message_defaults() {
        let message: FetchedMessage = serde_json::from_str(r#"{"subject":"Hi"}"#).unwrap();
        assert_eq!(message.subject, "Hi");
        assert_eq!(message.from, "");
        assert_eq!(message.date, None);
        assert_eq!(message.size, 0);
    }

    #[test]
    fn test_header_style_date_is_accepted() {
        let messages: Vec<FetchedMessage> = serde_json::from_str(
            r#"[{"subject":"Hi","from":"a@b.com","date":"Tue, 01 Apr 2025 10:00:00 GMT","size":10,"body":"x"}]"#,
        )
        .unwrap();
        let expected = DateTime::parse_from_rfc3339("2025-04-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(messages[0].date, Some(expected));
    }

    #[test]
    fn test_date_formats() {
        let expected = DateTime::parse_from_rfc3339("2026-01-15T19:31:43Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            parse_message_date("Thu, 15 Jan 2026 14:31:43 -0500"),
            Some(expected)
        );
        assert_eq!(parse_message_date("2026-01-15T19:31:43Z"), Some(expected));
        assert_eq!(parse_message_date(" 2026-01-15T19:31:43+00:00 "), Some(expected));
    }

    #[test]
    fn test_unparseable_date_keeps_the_batch() {
        let messages: Vec<FetchedMessage> = serde_json::from_str(
            r#"[
                {"subject":"One","date":"sometime last week"},
                {"subject":"Two","date":null},
                {"subject":"Three","date":"2025-04-01T10:00:00Z"}
            ]"#,
        )
        .unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].date, None);
        assert_eq!(messages[1].date, None);
        assert!(messages[2].date.is_some());
    }

    #[test]
    fn test_serialized_date_reads_back() {
        let mut message = FetchedMessage::new("Hi", "a@b.com", "x");
        message.date = parse_message_date("Tue, 01 Apr 2025 10:00:00 +0000");
        let json = serde_json::to_string(&message).unwrap();
        let back: FetchedMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_screening_serializes_with_tag() {
        let json = serde_json::to_value(Screening::Skipped { score: -4 }).unwrap();
        assert_eq!(json, serde_json::json!({"decision": "skipped", "score": -4}));
    }

    #[test]
    fn test_screening_is_kept() {
        assert!(Screening::Important { score: 3 }.is_kept());
        assert!(
            Screening::Relay {
                task: RelayedTask::default()
            }
            .is_kept()
        );
        assert!(!Screening::Skipped { score: 0 }.is_kept());
    }

    #[test]
    fn test_actionable_task_json_shape() {
        let task = ActionableTask {
            subject: "Q4".to_string(),
            from: "jane@example.com".to_string(),
            summary: "Submit the Q4 report.".to_string(),
            deadline: "No deadline".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subject": "Q4",
                "from": "jane@example.com",
                "summary": "Submit the Q4 report.",
                "deadline": "No deadline"
            })
        );
    }
}
