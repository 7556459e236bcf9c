//! Task relay - handing an extracted task to another user by email.
//!
//! The sending side builds a [`RelayRequest`], validates it, and renders the
//! subject and plain-text body; delivery is left to the caller's mail
//! transport. The receiving side recognises relay messages by subject and
//! recovers the task with [`parse_relay_body`] without any model call.
//!
//! Relay body format:
//!
//! ```text
//! New Task Received via Sortify
//!
//! From: Raia (raia@example.com)
//! Task: Review the Q2 report
//! Due: Friday, April 15
//!
//! This task will appear in your Sortify dashboard automatically.
//! ```

mod model;
mod validation;

pub use model::{RELAY_SUBJECT, RelayRequest, RelayedTask, is_relay_subject, parse_relay_body};
pub use validation::{RelayValidationError, validate_relay};
