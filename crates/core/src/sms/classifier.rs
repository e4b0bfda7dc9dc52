//! Transaction SMS classification.
//!
//! Decides whether an incoming message is a bank transaction notification.
//! A message qualifies when it carries a masked account number (`X1234`,
//! `XX5678`, ...) and no link. A link next to a masked account is treated as
//! a phishing signal and overrides the positive match.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

/// Masked account: one or more uppercase `X` followed by 3-4 ASCII digits.
static MASKED_ACCOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"X+[0-9]{3,4}").expect("masked account pattern is valid"));

/// Substrings that mark a message as containing a link (matched lowercase).
pub const LINK_INDICATORS: [&str; 7] = [
    "http://", "https://", "www.", "bit.ly", "tinyurl", ".com", ".in",
];

/// Why a message was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Body is absent, empty or whitespace-only
    EmptyBody,
    /// No masked account number in the body
    NoMaskedAccount,
    /// Body contains a link (phishing)
    ContainsLink,
}

/// Outcome of classifying a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected(Rejection),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted)
    }
}

/// Classifies a message body, keeping the rejection reason.
///
/// Total over its input: never fails, holds no state.
pub fn classify_sms(body: Option<&str>) -> Classification {
    let body = match body {
        Some(b) if !b.trim().is_empty() => b,
        _ => {
            debug!("SMS rejected: body is absent or blank");
            return Classification::Rejected(Rejection::EmptyBody);
        }
    };

    if !MASKED_ACCOUNT.is_match(body) {
        debug!("SMS rejected: no masked account");
        return Classification::Rejected(Rejection::NoMaskedAccount);
    }

    let lower = body.to_lowercase();
    if let Some(indicator) = LINK_INDICATORS.iter().find(|i| lower.contains(*i)) {
        debug!("SMS rejected: contains link indicator '{}'", indicator);
        return Classification::Rejected(Rejection::ContainsLink);
    }

    debug!("SMS accepted: masked account and no links");
    Classification::Accepted
}

/// Returns true when `body` is a transaction notification.
pub fn is_expense_sms(body: Option<&str>) -> bool {
    classify_sms(body).is_accepted()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_debit_with_masked_account() {
        assert!(is_expense_sms(Some("Your a/c X1234 debited Rs.500")));
    }

    #[test]
    fn test_accepts_multiple_mask_characters() {
        assert!(is_expense_sms(Some("INR 250 spent on card XX5678 at SWIGGY")));
        assert!(is_expense_sms(Some("A/c XXX901 credited with INR 1,000")));
    }

    #[test]
    fn test_rejects_link_even_with_masked_account() {
        assert_eq!(
            classify_sms(Some("Claim reward at http://bit.ly/x, a/c X1234 credited")),
            Classification::Rejected(Rejection::ContainsLink)
        );
    }

    #[test]
    fn test_link_indicators_are_case_insensitive() {
        assert!(!is_expense_sms(Some("A/c X1234 debited. Visit WWW.EXAMPLE.ORG")));
        assert!(!is_expense_sms(Some("A/c X1234 debited. Details: MyBank.COM")));
        assert!(!is_expense_sms(Some("A/c X1234 debited, see TinyURL/abc")));
    }

    #[test]
    fn test_domain_suffix_in_counts_as_link() {
        assert!(!is_expense_sms(Some("a/c X1234 debited, help at sbi.co.in")));
    }

    #[test]
    fn test_rejects_message_without_masked_account() {
        assert_eq!(
            classify_sms(Some("Hello, how are you?")),
            Classification::Rejected(Rejection::NoMaskedAccount)
        );
    }

    #[test]
    fn test_mask_must_be_uppercase_and_followed_by_enough_digits() {
        assert!(!is_expense_sms(Some("a/c x1234 debited")));
        assert!(!is_expense_sms(Some("a/c X12 debited")));
        assert!(!is_expense_sms(Some("a/c X 1234 debited")));
    }

    #[test]
    fn test_mask_digits_must_be_ascii() {
        // Devanagari and Arabic-Indic digits
        assert_eq!(
            classify_sms(Some("a/c X\u{0967}\u{0968}\u{0969}\u{096A} debited")),
            Classification::Rejected(Rejection::NoMaskedAccount)
        );
        assert!(!is_expense_sms(Some(
            "Rs 500 debited from a/c X\u{0661}\u{0662}\u{0663}\u{0664}"
        )));
    }

    #[test]
    fn test_longer_digit_runs_still_match() {
        assert!(is_expense_sms(Some("a/c X123456 debited")));
    }

    #[test]
    fn test_rejects_absent_empty_and_blank_bodies() {
        assert!(!is_expense_sms(None));
        assert!(!is_expense_sms(Some("")));
        assert_eq!(
            classify_sms(Some("   \n\t")),
            Classification::Rejected(Rejection::EmptyBody)
        );
    }

    #[test]
    fn test_classification_is_repeatable() {
        let body = Some("Txn of Rs 99 on XX4321");
        assert_eq!(classify_sms(body), classify_sms(body));
    }
}
