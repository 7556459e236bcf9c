//! Inbox triage - from fetched messages to actionable tasks.
//!
//! Every message is screened first:
//! - **Relay**: the subject marks a task relayed by another user; the task is
//!   parsed straight from the body
//! - **Important**: the scorer kept it; the language model extracts a task
//!   and a deadline
//! - **Skipped**: the scorer dropped it; no model call is made
//!
//! # Example
//!
//! ```ignore
//! use sortify_core::{FetchedMessage, Scorer, TaskPipeline};
//!
//! let pipeline = TaskPipeline::new(Scorer::new(settings.owner_email), model_client);
//! let outcome = pipeline.process(&messages).await;
//!
//! for task in &outcome.tasks {
//!     println!("{} (due {})", task.summary, task.deadline);
//! }
//! ```

mod model;
mod pipeline;

pub use model::{
    ActionableTask, FetchedMessage, PipelineOutcome, PipelineStats, Screening, parse_message_date,
};
pub use pipeline::{TaskPipeline, screen};
