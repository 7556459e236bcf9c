//! Relay request and relayed task models.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::validation::{RelayValidationError, validate_relay};

/// Subject line of every relayed task.
pub const RELAY_SUBJECT: &str = "New Task from Sortify";

const RELAY_HEADING: &str = "New Task Received via Sortify";
const RELAY_FOOTER: &str = "This task will appear in your Sortify dashboard automatically.";

/// A task one user hands to another by email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    /// Display name of the person relaying the task.
    pub sender_name: String,
    /// Address of the person relaying the task.
    pub sender_email: String,
    /// Address the task is sent to.
    #[serde(alias = "recepient_email")]
    pub recipient_email: String,
    /// Free-form due date, e.g. "Friday, April 15".
    pub deadline: String,
    /// The task itself.
    pub task: String,
}

impl RelayRequest {
    /// Creates a relay request without task or deadline.
    #[must_use]
    pub fn new(
        sender_name: impl Into<String>,
        sender_email: impl Into<String>,
        recipient_email: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_email: sender_email.into(),
            recipient_email: recipient_email.into(),
            deadline: String::new(),
            task: String::new(),
        }
    }

    /// Sets the task.
    #[must_use]
    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub fn deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    /// Checks that every field is present and both addresses look valid.
    ///
    /// # Errors
    ///
    /// Returns every validation problem found.
    pub fn validate(&self) -> Result<(), Vec<RelayValidationError>> {
        validate_relay(self)
    }

    /// Subject line for the relay message.
    #[must_use]
    pub const fn subject(&self) -> &'static str {
        RELAY_SUBJECT
    }

    /// `From` header value, `Name <address>`.
    #[must_use]
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender_email)
    }

    /// Plain-text body of the relay message.
    #[must_use]
    pub fn render_body(&self) -> String {
        let mut body = String::new();

        let _ = writeln!(body, "{RELAY_HEADING}");
        body.push('\n');
        let _ = writeln!(body, "From: {} ({})", self.sender_name, self.sender_email);
        let _ = writeln!(body, "Task: {}", self.task);
        let _ = writeln!(body, "Due: {}", self.deadline);
        body.push('\n');
        let _ = writeln!(body, "{RELAY_FOOTER}");

        body
    }

    /// The body flattened to one line, for use as a header value.
    #[must_use]
    pub fn header_body(&self) -> String {
        self.render_body().replace(['\n', '\r'], " ")
    }
}

/// A task recovered from a relay message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayedTask {
    /// Display name of whoever relayed the task.
    pub sender: String,
    /// The task.
    pub task: String,
    /// Due date as written by the sender; empty when missing.
    pub deadline: String,
}

impl RelayedTask {
    /// Task with attribution, e.g. "Review the Q2 report (sent by Raia)".
    ///
    /// Falls back to the bare task when either part is missing.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.task.is_empty() || self.sender.is_empty() {
            self.task.clone()
        } else {
            format!("{} (sent by {})", self.task, self.sender)
        }
    }
}

/// Whether a subject marks a relayed task.
#[must_use]
pub fn is_relay_subject(subject: &str) -> bool {
    subject.trim().eq_ignore_ascii_case(RELAY_SUBJECT)
}

/// Parses the body of a relay message.
///
/// Reads `From:`, `Task:` and `Due:` lines; everything else is ignored.
/// The sender is the text before `(` on the `From:` line. Missing lines
/// leave empty fields, and a repeated line overrides the earlier one.
#[must_use]
pub fn parse_relay_body(body: &str) -> RelayedTask {
    let mut relayed = RelayedTask::default();

    for line in body.lines().map(str::trim) {
        if let Some(content) = line.strip_prefix("From:") {
            let content = content.trim();
            relayed.sender = content
                .split_once('(')
                .map_or(content, |(name, _)| name.trim())
                .to_string();
        } else if let Some(task) = line.strip_prefix("Task:") {
            relayed.task = task.trim().to_string();
        } else if let Some(deadline) = line.strip_prefix("Due:") {
            relayed.deadline = deadline.trim().to_string();
        }
    }

    tracing::debug!(
        sender = %relayed.sender,
        task = %relayed.task,
        deadline = %relayed.deadline,
        "Parsed relay body"
    );

    relayed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> RelayRequest {
        RelayRequest::new("Raia", "raia@example.com", "sam@example.org")
            .task("Review the Q2 report")
            .deadline("Friday, April 15")
    }

    #[test]
    fn test_render_body() {
        assert_eq!(
            request().render_body(),
            "New Task Received via Sortify\n\
             \n\
             From: Raia (raia@example.com)\n\
             Task: Review the Q2 report\n\
             Due: Friday, April 15\n\
             \n\
             This task will appear in your Sortify dashboard automatically.\n"
        );
    }

    #[test]
    fn test_header_body_is_single_line() {
        let flat = request().header_body();
        assert!(!flat.contains('\n'));
        assert!(flat.starts_with("New Task Received via Sortify  From: Raia"));
    }

    #[test]
    fn test_from_header() {
        assert_eq!(request().from_header(), "Raia <raia@example.com>");
    }

    #[test]
    fn test_parse_rendered_body() {
        let relayed = parse_relay_body(&request().render_body());
        assert_eq!(relayed.sender, "Raia");
        assert_eq!(relayed.task, "Review the Q2 report");
        assert_eq!(relayed.deadline, "Friday, April 15");
        assert_eq!(relayed.summary(), "Review the Q2 report (sent by Raia)");
    }

    #[test]
    fn test_parse_sender_without_address() {
        let relayed = parse_relay_body("  From: Raia  \nTask: Call the bank\n");
        assert_eq!(relayed.sender, "Raia");
        assert_eq!(relayed.deadline, "");
    }

    #[test]
    fn test_parse_later_line_wins() {
        let relayed = parse_relay_body("Task: first\nTask: second");
        assert_eq!(relayed.task, "second");
    }

    #[test]
    fn test_summary_without_sender() {
        let relayed = parse_relay_body("Task: Call the bank");
        assert_eq!(relayed.summary(), "Call the bank");
        assert_eq!(parse_relay_body("").summary(), "");
    }

    #[test]
    fn test_is_relay_subject() {
        assert!(is_relay_subject("New Task from Sortify"));
        assert!(is_relay_subject("  NEW TASK FROM SORTIFY "));
        assert!(!is_relay_subject("Re: New Task from Sortify"));
    }

    #[test]
    fn test_deserialize_accepts_legacy_recipient_key() {
        let json = r#"{"sender_name":"Raia","sender_email":"raia@example.com",
            "recepient_email":"sam@example.org","deadline":"Friday","task":"Call"}"#;
        let request: RelayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.recipient_email, "sam@example.org");
    }
}
