//! Scoring inputs and results.

use std::fmt;

/// The text a scorer looks at for one message.
///
/// Absent fields are empty strings; an empty field contributes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringInput<'a> {
    /// Subject line.
    pub subject: &'a str,
    /// Plain-text body.
    pub body: &'a str,
    /// Raw `From` header value, display name included.
    pub sender: Option<&'a str>,
    /// Owner address for the self-sent check; the scorer's configured
    /// address is used when this is `None` or blank.
    pub owner_email: Option<&'a str>,
    /// Independent address penalised when found in the sender.
    pub my_email: Option<&'a str>,
}

impl<'a> ScoringInput<'a> {
    /// Creates an input with a subject and body and no sender.
    #[must_use]
    pub const fn new(subject: &'a str, body: &'a str) -> Self {
        Self {
            subject,
            body,
            sender: None,
            owner_email: None,
            my_email: None,
        }
    }

    /// Creates an input from optional parts, treating `None` as empty text.
    #[must_use]
    pub fn from_parts(
        subject: Option<&'a str>,
        body: Option<&'a str>,
        sender: Option<&'a str>,
    ) -> Self {
        Self {
            subject: subject.unwrap_or_default(),
            body: body.unwrap_or_default(),
            sender,
            owner_email: None,
            my_email: None,
        }
    }

    /// Sets the sender.
    #[must_use]
    pub const fn with_sender(mut self, sender: &'a str) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Overrides the owner address for this call.
    ///
    /// A blank address does not clear the configured owner.
    #[must_use]
    pub const fn with_owner_email(mut self, owner_email: &'a str) -> Self {
        self.owner_email = Some(owner_email);
        self
    }

    /// Sets the independent `my_email` address.
    #[must_use]
    pub const fn with_my_email(mut self, my_email: &'a str) -> Self {
        self.my_email = Some(my_email);
        self
    }
}

/// Part of the message a contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Subject line.
    Subject,
    /// Message body.
    Body,
    /// `From` header.
    Sender,
}

impl Field {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Body => "body",
            Self::Sender => "sender",
        }
    }
}

/// Rule family that produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionSource {
    /// Entry of the important keyword table.
    ImportantKeyword,
    /// Entry of the spam keyword table.
    SpamKeyword,
    /// Numeric discount pattern.
    DiscountPattern,
    /// `no-reply`/`noreply`/`newsletter` sender.
    AutomatedSender,
    /// The caller's `my_email` appears in the sender.
    MyEmail,
    /// Sender belongs to a bulk-mail provider.
    BulkDomain,
}

impl ContributionSource {
    /// Short name for logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ImportantKeyword => "important keyword",
            Self::SpamKeyword => "spam keyword",
            Self::DiscountPattern => "discount pattern",
            Self::AutomatedSender => "automated sender",
            Self::MyEmail => "my email",
            Self::BulkDomain => "bulk domain",
        }
    }
}

/// One rule that fired, with its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// Rule family.
    pub source: ContributionSource,
    /// Matched phrase, pattern label, or sender marker.
    pub term: String,
    /// Field the rule matched in.
    pub field: Field,
    /// Signed weight added to the score.
    pub weight: i32,
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:+} {} \"{}\" in {}",
            self.weight,
            self.source.as_str(),
            self.term,
            self.field.as_str()
        )
    }
}

/// Full result of scoring one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Final score.
    pub score: i32,
    /// Whether the self-sent rule decided the score.
    pub self_sent: bool,
    /// Rules that fired, in evaluation order. Empty when `self_sent`.
    pub contributions: Vec<Contribution>,
}

impl Assessment {
    /// Whether the message is worth processing.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.score > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_normalizes_missing_text() {
        let input = ScoringInput::from_parts(None, None, None);
        assert_eq!(input.subject, "");
        assert_eq!(input.body, "");
        assert_eq!(input.sender, None);
    }

    #[test]
    fn test_builder_sets_addresses() {
        let input = ScoringInput::new("s", "b")
            .with_sender("a@b.com")
            .with_owner_email("me@b.com")
            .with_my_email("alias@b.com");
        assert_eq!(input.sender, Some("a@b.com"));
        assert_eq!(input.owner_email, Some("me@b.com"));
        assert_eq!(input.my_email, Some("alias@b.com"));
    }

    #[test]
    fn test_contribution_display() {
        let c = Contribution {
            source: ContributionSource::SpamKeyword,
            term: "unsubscribe".to_string(),
            field: Field::Body,
            weight: -10,
        };
        assert_eq!(c.to_string(), "-10 spam keyword \"unsubscribe\" in body");
    }

    #[test]
    fn test_zero_is_not_important() {
        let assessment = Assessment {
            score: 0,
            self_sent: false,
            contributions: Vec::new(),
        };
        assert!(!assessment.is_important());
    }
}
