//! # sortify-core
//!
//! Inbox triage for Sortify.
//!
//! This crate provides:
//! - **Importance Scoring** - weighted keyword, discount-pattern, and sender
//!   heuristics deciding whether a message is worth a language-model call
//! - **Task Relay** - the fixed-format message used to hand a task to another
//!   user, and its parser on the receiving side
//! - **Extraction Seam** - the `TaskExtractor` trait plus post-processing of
//!   its answers
//! - **Triage Pipeline** - screening and batch processing of fetched messages
//! - **Settings** - owner address and configuration loading
//!
//! # Example
//!
//! ```
//! use sortify_core::{Scorer, ScoringInput};
//!
//! let scorer = Scorer::new(Some("me@example.com".to_string()));
//! let input = ScoringInput::new("Meeting reminder", "Please confirm the schedule")
//!     .with_sender("Jane <jane@example.com>");
//!
//! assert!(scorer.is_important(&input));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod extract;
pub mod relay;
pub mod scoring;
pub mod triage;

pub use config::Settings;
pub use error::{Error, Result};
pub use extract::{NO_ACTIONABLE_TASKS, NO_DEADLINE, TaskExtractor, is_actionable, normalize_deadline};
pub use relay::{
    RELAY_SUBJECT, RelayRequest, RelayValidationError, RelayedTask, is_relay_subject,
    parse_relay_body,
};
pub use scoring::{Assessment, Contribution, ContributionSource, Field, Scorer, ScoringInput};
pub use triage::{
    ActionableTask, FetchedMessage, PipelineOutcome, PipelineStats, Screening, TaskPipeline,
    parse_message_date, screen,
};
