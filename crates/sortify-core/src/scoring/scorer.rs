//! The importance scorer.

use super::model::{Assessment, Contribution, ContributionSource, Field, ScoringInput};
use super::tables::{
    AUTOMATED_SENDER_MARKERS, AUTOMATED_SENDER_WEIGHT, BASE_SCORE, BULK_DOMAIN_WEIGHT,
    BULK_SENDER_DOMAINS, CompiledTerm, DISCOUNTS, IMPORTANT, MY_EMAIL_WEIGHT, SELF_SENT_SCORE,
    SPAM,
};

/// Decides whether a fetched message deserves a language-model call.
///
/// The scorer only holds the owner address; keyword and pattern tables are
/// process-wide statics. It is cheap to clone and safe to share.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorer {
    owner_email: Option<String>,
}

impl Scorer {
    /// Creates a scorer for the given mailbox owner.
    ///
    /// A blank address counts as no owner, so the self-sent rule can never
    /// fire on every sender.
    #[must_use]
    pub fn new(owner_email: Option<String>) -> Self {
        Self {
            owner_email: owner_email.as_deref().and_then(normalize_address),
        }
    }

    /// Configured owner address, lowercased.
    #[must_use]
    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email.as_deref()
    }

    /// Signed importance score.
    #[must_use]
    pub fn score(&self, input: &ScoringInput<'_>) -> i32 {
        self.assess(input).score
    }

    /// `score > 0`.
    #[must_use]
    pub fn is_important(&self, input: &ScoringInput<'_>) -> bool {
        self.score(input) > 0
    }

    /// Scores a message and records every rule that fired.
    #[must_use]
    pub fn assess(&self, input: &ScoringInput<'_>) -> Assessment {
        let sender = input.sender.unwrap_or_default().to_lowercase();

        let owner = input
            .owner_email
            .and_then(normalize_address)
            .or_else(|| self.owner_email.clone());
        if owner.is_some_and(|owner| sender.contains(&owner)) {
            return Assessment {
                score: SELF_SENT_SCORE,
                self_sent: true,
                contributions: Vec::new(),
            };
        }

        let mut contributions = Vec::new();

        if !sender.is_empty() {
            score_sender(&sender, input.my_email, &mut contributions);
        }

        for (field, text) in [(Field::Subject, input.subject), (Field::Body, input.body)] {
            if text.is_empty() {
                continue;
            }
            let tables = [
                (IMPORTANT.as_slice(), ContributionSource::ImportantKeyword),
                (SPAM.as_slice(), ContributionSource::SpamKeyword),
                (DISCOUNTS.as_slice(), ContributionSource::DiscountPattern),
            ];
            for (terms, source) in tables {
                score_terms(terms, source, field, text, &mut contributions);
            }
        }

        let score = BASE_SCORE + contributions.iter().map(|c| c.weight).sum::<i32>();

        Assessment {
            score,
            self_sent: false,
            contributions,
        }
    }
}

fn normalize_address(address: &str) -> Option<String> {
    let address = address.trim();
    (!address.is_empty()).then(|| address.to_lowercase())
}

/// Sender heuristics. `sender` is already lowercased.
fn score_sender(sender: &str, my_email: Option<&str>, out: &mut Vec<Contribution>) {
    let automated = AUTOMATED_SENDER_MARKERS
        .iter()
        .copied()
        .find(|m| sender.contains(*m));
    if let Some(marker) = automated {
        out.push(Contribution {
            source: ContributionSource::AutomatedSender,
            term: marker.to_string(),
            field: Field::Sender,
            weight: AUTOMATED_SENDER_WEIGHT,
        });
    }

    let my_email = my_email
        .and_then(normalize_address)
        .filter(|m| sender.contains(m.as_str()));
    if let Some(my_email) = my_email {
        out.push(Contribution {
            source: ContributionSource::MyEmail,
            term: my_email,
            field: Field::Sender,
            weight: MY_EMAIL_WEIGHT,
        });
    }

    let bulk = BULK_SENDER_DOMAINS
        .iter()
        .copied()
        .find(|d| sender.contains(*d));
    if let Some(domain) = bulk {
        out.push(Contribution {
            source: ContributionSource::BulkDomain,
            term: domain.to_string(),
            field: Field::Sender,
            weight: BULK_DOMAIN_WEIGHT,
        });
    }
}

/// Each matching term counts once per field, however often it occurs.
fn score_terms(
    terms: &[CompiledTerm],
    source: ContributionSource,
    field: Field,
    text: &str,
    out: &mut Vec<Contribution>,
) {
    out.extend(terms.iter().filter(|t| t.is_match(text)).map(|t| Contribution {
        source,
        term: t.term.to_string(),
        field,
        weight: t.weight,
    }));
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::needless_collect,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scorer() -> Scorer {
        Scorer::new(Some("me@example.com".to_string()))
    }

    fn terms(assessment: &Assessment) -> Vec<(&str, Field)> {
        assessment
            .contributions
            .iter()
            .map(|c| (c.term.as_str(), c.field))
            .collect()
    }

    #[test]
    fn test_meeting_reminder_is_important() {
        let input = ScoringInput::new("Meeting reminder", "Please confirm the schedule for Monday")
            .with_sender("jane@example.com")
            .with_owner_email("me@example.com");
        let assessment = scorer().assess(&input);

        let found = terms(&assessment);
        assert!(found.contains(&("reminder", Field::Subject)));
        assert!(found.contains(&("confirm", Field::Body)));
        assert!(found.contains(&("schedule", Field::Body)));
        // meeting +2, reminder +2, please +1, confirm +2, schedule +2
        assert_eq!(assessment.score, 10);
        assert!(assessment.is_important());
    }

    #[test]
    fn test_promotion_is_not_important() {
        let input = ScoringInput::new("50% OFF everything", "Unsubscribe here. Limited time offer.")
            .with_sender("deals@shop.com");
        let assessment = scorer().assess(&input);

        let found = terms(&assessment);
        assert!(found.contains(&("N off", Field::Subject)));
        assert!(found.contains(&("unsubscribe", Field::Body)));
        assert!(found.contains(&("limited time", Field::Body)));
        assert!(found.contains(&("offer", Field::Body)));
        assert_eq!(assessment.score, 1 - 6 - 10 - 5 - 6);
        assert!(!assessment.is_important());
    }

    #[test]
    fn test_relay_sender_short_circuits() {
        let input = ScoringInput::new("Task", "Unsubscribe. 50% off. Click here.")
            .with_sender("Sortify Relay <relay@sortify.app>")
            .with_owner_email("relay@sortify.app");
        let assessment = scorer().assess(&input);

        assert!(assessment.self_sent);
        assert_eq!(assessment.score, 10);
        assert!(assessment.contributions.is_empty());
    }

    #[test]
    fn test_empty_message_scores_base() {
        let input = ScoringInput::from_parts(Some(""), Some(""), None);
        assert_eq!(scorer().score(&input), 1);
        assert!(scorer().is_important(&input));
    }

    #[test]
    fn test_newsletter_is_not_important() {
        let input = ScoringInput::new(
            "Newsletter: weekly digest",
            "Click here to read more. Unsubscribe anytime.",
        )
        .with_sender("newsletter@company.com");
        let assessment = scorer().assess(&input);

        let found = terms(&assessment);
        assert!(found.contains(&("newsletter", Field::Sender)));
        assert!(found.contains(&("unsubscribe", Field::Body)));
        assert!(found.contains(&("click here", Field::Body)));
        assert!(assessment.score < 0);
    }

    #[test]
    fn test_configured_owner_is_default() {
        let input = ScoringInput::new("Buy now", "Unsubscribe").with_sender("Me <ME@Example.com>");
        assert_eq!(scorer().score(&input), 10);
    }

    #[test]
    fn test_blank_owner_never_short_circuits() {
        let scorer = Scorer::new(Some("   ".to_string()));
        assert_eq!(scorer.owner_email(), None);

        let input = ScoringInput::new("", "").with_sender("anyone@example.com");
        assert_eq!(scorer.score(&input), 1);

        let input = input.with_owner_email("");
        assert_eq!(scorer.score(&input), 1);
    }

    #[test]
    fn test_blank_override_keeps_configured_owner() {
        let input = ScoringInput::new("Buy now", "Unsubscribe")
            .with_sender("me@example.com")
            .with_owner_email("  ");
        let assessment = scorer().assess(&input);
        assert!(assessment.self_sent);
        assert_eq!(assessment.score, 10);

        let input = input.with_owner_email("boss@example.com");
        assert!(!scorer().assess(&input).self_sent);
    }

    #[test]
    fn test_scorer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Scorer>();
    }

    #[test]
    fn test_sender_penalties() {
        let scorer = Scorer::default();

        let input = ScoringInput::new("", "").with_sender("No-Reply <no-reply@noreply.example.com>");
        assert_eq!(scorer.score(&input), 1 - 2);

        let input = ScoringInput::new("", "").with_sender("Shop <news@mail.klaviyo.com>");
        assert_eq!(scorer.score(&input), 1 - 5);

        let input = ScoringInput::new("", "")
            .with_sender("Me via List <me@example.com>")
            .with_my_email("ME@example.com");
        assert_eq!(scorer.score(&input), 1 - 2);
    }

    #[test]
    fn test_my_email_is_independent_of_owner() {
        let input = ScoringInput::new("", "")
            .with_sender("alias@example.com")
            .with_owner_email("owner@example.com")
            .with_my_email("alias@example.com");
        let assessment = scorer().assess(&input);
        assert!(!assessment.self_sent);
        assert_eq!(assessment.score, -1);
    }

    #[test]
    fn test_whole_word_matching() {
        let scorer = Scorer::default();
        assert_eq!(scorer.score(&ScoringInput::new("", "A saleable asset")), 1);
        assert_eq!(scorer.score(&ScoringInput::new("", "Sale starts now")), 1 - 5);
    }

    #[test]
    fn test_keyword_counts_once_per_field() {
        let scorer = Scorer::default();
        let once = scorer.score(&ScoringInput::new("", "urgent"));
        let twice = scorer.score(&ScoringInput::new("", "urgent, urgent, URGENT"));
        assert_eq!(once, twice);

        let both = scorer.score(&ScoringInput::new("urgent", "urgent"));
        assert_eq!(both, 1 + 3 + 3);
    }

    #[test]
    fn test_additivity() {
        let scorer = Scorer::default();
        let one = scorer.score(&ScoringInput::new("", "This is urgent"));
        let two = scorer.score(&ScoringInput::new("", "This is urgent, deadline today"));
        assert!(two > one);
    }

    #[test]
    fn test_discount_patterns_stack() {
        let scorer = Scorer::default();
        assert_eq!(scorer.score(&ScoringInput::new("", "Get 50% off")), 1 - 6);
        // "N off" and "up to N% off" both match
        assert_eq!(scorer.score(&ScoringInput::new("", "up to 40% off")), 1 - 12);
    }

    #[test]
    fn test_score_zero_is_not_important() {
        // base 1, automated sender -2, "review" +1
        let scorer = Scorer::default();
        let input = ScoringInput::new("", "review").with_sender("noreply@example.com");
        assert_eq!(scorer.score(&input), 0);
        assert!(!scorer.is_important(&input));
    }

    #[test]
    fn test_contributions_sum_to_score() {
        let input = ScoringInput::new("Invoice overdue", "Save 20 now, 10% discount, unsubscribe")
            .with_sender("billing@sendgrid.net");
        let assessment = Scorer::default().assess(&input);
        let sum: i32 = assessment.contributions.iter().map(|c| c.weight).sum();
        assert_eq!(assessment.score, BASE_SCORE + sum);
    }

    proptest! {
        #[test]
        fn prop_score_is_deterministic(subject in ".{0,40}", body in ".{0,80}", sender in ".{0,30}") {
            let scorer = scorer();
            let input = ScoringInput::new(&subject, &body).with_sender(&sender);
            prop_assert_eq!(scorer.assess(&input), scorer.assess(&input));
        }

        #[test]
        fn prop_self_sent_always_scores_ten(subject in ".{0,40}", body in ".{0,80}", name in "[A-Za-z ]{0,12}") {
            let sender = format!("{name} <me@example.com>");
            let input = ScoringInput::new(&subject, &body).with_sender(&sender);
            prop_assert_eq!(scorer().score(&input), SELF_SENT_SCORE);
        }

        #[test]
        fn prop_case_does_not_matter(body in "[a-zA-Z %0-9]{0,60}") {
            let scorer = Scorer::default();
            let lower = body.to_lowercase();
            let upper = body.to_uppercase();
            prop_assert_eq!(
                scorer.score(&ScoringInput::new("", &lower)),
                scorer.score(&ScoringInput::new("", &upper))
            );
        }
    }
}
