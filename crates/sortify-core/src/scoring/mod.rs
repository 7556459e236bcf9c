//! Importance scoring - decides which messages are worth a language-model call.
//!
//! A message starts at a score of 1 and collects signed contributions:
//! - **Keywords**: whole-word, case-insensitive phrases from an important
//!   table (`urgent`, `offer letter`, ...) and a spam table (`unsubscribe`,
//!   `limited time`, ...), each counted once per field
//! - **Discount patterns**: numeric phrasings such as `50% off` or `save $20`,
//!   -6 per matching pattern and field
//! - **Sender**: automated senders, the caller's own alias, and bulk-mail
//!   providers
//!
//! A message whose sender contains the owner's address scores 10 regardless
//! of content. Anything scoring above 0 is important.
//!
//! # Example
//!
//! ```
//! use sortify_core::scoring::{Scorer, ScoringInput};
//!
//! let scorer = Scorer::new(Some("me@example.com".to_string()));
//!
//! let promo = ScoringInput::new("50% OFF everything", "Unsubscribe here. Limited time offer.")
//!     .with_sender("deals@shop.com");
//! assert!(!scorer.is_important(&promo));
//!
//! let note = ScoringInput::new("Note to self", "Unsubscribe").with_sender("Me <me@example.com>");
//! assert_eq!(scorer.score(&note), 10);
//! ```

mod model;
mod scorer;
pub mod tables;

pub use model::{Assessment, Contribution, ContributionSource, Field, ScoringInput};
pub use scorer::Scorer;
