//! Relay request validation.

use super::model::RelayRequest;

/// Validation error for a relay request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayValidationError {
    /// Sender name is empty.
    EmptySenderName,
    /// Sender email is empty.
    EmptySenderEmail,
    /// Sender email format is invalid.
    InvalidSenderEmail,
    /// Recipient email is empty.
    EmptyRecipientEmail,
    /// Recipient email format is invalid.
    InvalidRecipientEmail,
    /// Deadline is empty.
    EmptyDeadline,
    /// Task is empty.
    EmptyTask,
}

impl RelayValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptySenderName => "Sender name is required",
            Self::EmptySenderEmail => "Sender email is required",
            Self::InvalidSenderEmail => "Invalid sender email address",
            Self::EmptyRecipientEmail => "Recipient email is required",
            Self::InvalidRecipientEmail => "Invalid recipient email address",
            Self::EmptyDeadline => "Deadline is required",
            Self::EmptyTask => "Task is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptySenderName => "sender_name",
            Self::EmptySenderEmail | Self::InvalidSenderEmail => "sender_email",
            Self::EmptyRecipientEmail | Self::InvalidRecipientEmail => "recipient_email",
            Self::EmptyDeadline => "deadline",
            Self::EmptyTask => "task",
        }
    }
}

impl std::fmt::Display for RelayValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RelayValidationError {}

/// Validate a relay request.
///
/// Returns `Ok(())` if valid, or every problem found.
///
/// # Errors
///
/// Returns a vector of `RelayValidationError` if any fields are invalid.
pub fn validate_relay(request: &RelayRequest) -> Result<(), Vec<RelayValidationError>> {
    let mut errors = Vec::new();

    if request.sender_name.trim().is_empty() {
        errors.push(RelayValidationError::EmptySenderName);
    }

    if request.sender_email.trim().is_empty() {
        errors.push(RelayValidationError::EmptySenderEmail);
    } else if !is_valid_email(&request.sender_email) {
        errors.push(RelayValidationError::InvalidSenderEmail);
    }

    if request.recipient_email.trim().is_empty() {
        errors.push(RelayValidationError::EmptyRecipientEmail);
    } else if !is_valid_email(&request.recipient_email) {
        errors.push(RelayValidationError::InvalidRecipientEmail);
    }

    if request.deadline.trim().is_empty() {
        errors.push(RelayValidationError::EmptyDeadline);
    }

    if request.task.trim().is_empty() {
        errors.push(RelayValidationError::EmptyTask);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Basic email validation: one `@`, non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}
