//! Task extraction - the seam to the language model.
//!
//! The model itself is an external collaborator. This module defines the
//! interface a client must offer and the deterministic handling of its
//! answers: recognising "no actionable tasks" and turning a deadline answer
//! into a date.

mod deadline;

use std::future::Future;

use crate::Result;

pub use deadline::normalize_deadline;

/// Answer the model gives when a message asks nothing of the reader.
pub const NO_ACTIONABLE_TASKS: &str = "No actionable tasks.";

/// Display value for a task without a known deadline.
pub const NO_DEADLINE: &str = "No deadline";

/// Language-model client that turns messages into tasks.
///
/// Implementations own prompts, transport, and retries. Errors are reported
/// as [`crate::Error::Extraction`]; the triage pipeline degrades them to "no
/// task" or "no deadline" rather than failing the batch.
pub trait TaskExtractor {
    /// Extracts one actionable task from a message body.
    ///
    /// Returns [`NO_ACTIONABLE_TASKS`] when there is nothing to do.
    fn extract_task(&self, body: &str) -> impl Future<Output = Result<String>> + Send;

    /// Extracts a single deadline, ideally `YYYY-MM-DD`, from a task.
    fn extract_deadline(&self, task: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Whether a model answer describes a task.
#[must_use]
pub fn is_actionable(answer: &str) -> bool {
    let answer = answer.trim();
    !answer.is_empty() && !answer.contains("No actionable tasks")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    struct Canned;

    impl TaskExtractor for Canned {
        async fn extract_task(&self, body: &str) -> Result<String> {
            if body.is_empty() {
                Err(Error::Extraction("empty body".to_string()))
            } else {
                Ok(format!("Reply to {body}"))
            }
        }

        async fn extract_deadline(&self, _task: &str) -> Result<String> {
            Ok("2030-01-01".to_string())
        }
    }

    #[test]
    fn test_is_actionable() {
        assert!(is_actionable("Submit the Q4 report by January 20."));
        assert!(!is_actionable(NO_ACTIONABLE_TASKS));
        assert!(!is_actionable("No actionable tasks"));
        assert!(!is_actionable("   "));
    }

    #[test]
    fn test_extractor_impl_with_async_fn() {
        let task = tokio_test::block_on(Canned.extract_task("Jane")).unwrap();
        assert_eq!(task, "Reply to Jane");

        let err = tokio_test::block_on(Canned.extract_task("")).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));

        let deadline = tokio_test::block_on(Canned.extract_deadline(&task)).unwrap();
        assert_eq!(deadline, "2030-01-01");
    }
}
