//! Deadline normalization.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

// Constant pattern, exercised by the tests below.
#[allow(clippy::expect_used)]
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("ISO date pattern is valid")
});

/// Pulls a usable deadline out of a model answer.
///
/// Takes the first valid `YYYY-MM-DD` date in `raw`. Dates before `today`
/// are dropped, as is anything that is not a date at all.
#[must_use]
pub fn normalize_deadline(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    ISO_DATE
        .find_iter(raw)
        .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .filter(|date| *date >= today)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(
            normalize_deadline("2025-04-14", today()),
            NaiveDate::from_ymd_opt(2025, 4, 14)
        );
    }

    #[test]
    fn test_date_inside_text() {
        assert_eq!(
            normalize_deadline("Deadline: 2025-05-01.", today()),
            NaiveDate::from_ymd_opt(2025, 5, 1)
        );
    }

    #[test]
    fn test_today_is_kept() {
        assert_eq!(normalize_deadline("2025-04-10", today()), Some(today()));
    }

    #[test]
    fn test_past_date_is_dropped() {
        assert_eq!(normalize_deadline("2025-04-09", today()), None);
    }

    #[test]
    fn test_invalid_dates_are_skipped() {
        assert_eq!(
            normalize_deadline("2025-13-40 or 2025-06-02", today()),
            NaiveDate::from_ymd_opt(2025, 6, 2)
        );
    }

    #[test]
    fn test_no_date() {
        assert_eq!(normalize_deadline("", today()), None);
        assert_eq!(normalize_deadline("next Friday", today()), None);
        assert_eq!(normalize_deadline("No deadline", today()), None);
    }
}
