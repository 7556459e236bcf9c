//! Keyword, discount-pattern, and sender tables.
//!
//! Tables are compiled once on first use and never change afterwards.

use std::sync::LazyLock;

use regex::Regex;

/// Starting score for every message not sent by the owner.
pub const BASE_SCORE: i32 = 1;

/// Fixed score for messages the owner sent to themselves.
pub const SELF_SENT_SCORE: i32 = 10;

/// Applied once when the sender looks like an automated or bulk address.
pub const AUTOMATED_SENDER_WEIGHT: i32 = -2;

/// Applied when the caller-supplied `my_email` appears in the sender.
pub const MY_EMAIL_WEIGHT: i32 = -2;

/// Applied once when the sender belongs to a bulk-mail provider.
pub const BULK_DOMAIN_WEIGHT: i32 = -5;

/// Applied for every discount pattern matching a field.
pub const DISCOUNT_PATTERN_WEIGHT: i32 = -6;

/// Sender substrings marking automated mail.
pub const AUTOMATED_SENDER_MARKERS: &[&str] = &["no-reply", "noreply", "newsletter"];

/// Sender substrings of bulk-mail and marketing providers.
pub const BULK_SENDER_DOMAINS: &[&str] = &[
    "mailchimp",
    "mcsv.net",
    "rsgsv.net",
    "sendgrid",
    "mailgun",
    "amazonses",
    "constantcontact",
    "hubspot",
    "klaviyo",
    "sendinblue",
    "brevo.com",
    "mailerlite",
    "createsend",
    "exacttarget",
    "marketo",
    "substack",
];

/// Phrases that suggest a message needs the owner's attention.
pub const IMPORTANT_KEYWORDS: &[(&str, i32)] = &[
    ("urgent", 3),
    ("asap", 3),
    ("action required", 4),
    ("action needed", 4),
    ("important", 2),
    ("deadline", 3),
    ("overdue", 3),
    ("due", 2),
    ("reminder", 2),
    ("confirm", 2),
    ("confirmation", 2),
    ("schedule", 2),
    ("meeting", 2),
    ("appointment", 2),
    ("interview", 3),
    ("offer letter", 8),
    ("contract", 2),
    ("invoice", 2),
    ("payment", 2),
    ("receipt", 1),
    ("expires", 2),
    ("renew", 2),
    ("submit", 2),
    ("approve", 2),
    ("review", 1),
    ("follow up", 2),
    ("rsvp", 2),
    ("assignment", 2),
    ("please", 1),
    ("let me know", 2),
];

/// Phrases typical of marketing, newsletters, and other bulk mail.
pub const SPAM_KEYWORDS: &[(&str, i32)] = &[
    ("unsubscribe", -10),
    ("newsletter", -4),
    ("no-reply", -3),
    ("auto-generated", -3),
    ("promotion", -5),
    ("promotions", -5),
    ("sale", -5),
    ("social", -2),
    ("updates", -1),
    ("offer", -6),
    ("discount", -5),
    ("deal", -4),
    ("deals", -4),
    ("limited time", -5),
    ("click here", -5),
    ("shop now", -6),
    ("buy now", -6),
    ("free shipping", -5),
    ("coupon", -5),
    ("promo code", -6),
    ("view in browser", -4),
    ("digest", -3),
    ("webinar", -3),
];

/// Discount phrasings, as `(label, pattern)`.
pub const DISCOUNT_PATTERNS: &[(&str, &str)] = &[
    ("N off", r"\b\d{2,4}\s*%?\s*off\b"),
    ("up to N% off", r"\bup\s+to\s+\d{1,3}\s*%\s*off\b"),
    ("save N", r"\bsave\s+[$€£]?\d+"),
    ("N% discount", r"\b\d{1,3}\s*%\s*discount\b"),
];

/// A phrase compiled into a whole-word, case-insensitive matcher.
#[derive(Debug)]
pub struct CompiledTerm {
    /// The phrase or pattern label as written in the table.
    pub term: &'static str,
    /// Score contribution when the term matches a field.
    pub weight: i32,
    regex: Regex,
}

impl CompiledTerm {
    /// Whether the term occurs in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Important keywords, compiled.
pub static IMPORTANT: LazyLock<Vec<CompiledTerm>> =
    LazyLock::new(|| compile_keywords(IMPORTANT_KEYWORDS));

/// Spam keywords, compiled.
pub static SPAM: LazyLock<Vec<CompiledTerm>> = LazyLock::new(|| compile_keywords(SPAM_KEYWORDS));

/// Discount patterns, compiled.
pub static DISCOUNTS: LazyLock<Vec<CompiledTerm>> = LazyLock::new(|| {
    DISCOUNT_PATTERNS
        .iter()
        .map(|&(label, pattern)| CompiledTerm {
            term: label,
            weight: DISCOUNT_PATTERN_WEIGHT,
            regex: build_regex(&format!("(?i){pattern}")),
        })
        .collect()
});

/// Builds the word-bounded pattern for a keyword phrase.
///
/// Words are escaped and joined by `\s+`, so "offer letter" also matches
/// across a line break but never inside "offerletters".
#[must_use]
pub fn keyword_pattern(phrase: &str) -> String {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    format!(r"(?i)\b{}\b", words.join(r"\s+"))
}

fn compile_keywords(table: &'static [(&'static str, i32)]) -> Vec<CompiledTerm> {
    table
        .iter()
        .map(|&(phrase, weight)| CompiledTerm {
            term: phrase,
            weight,
            regex: build_regex(&keyword_pattern(phrase)),
        })
        .collect()
}

// Inputs are escaped literals or the constant patterns above, both covered by tests.
#[allow(clippy::expect_used)]
fn build_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("scoring tables contain only valid patterns")
}
