//! Property-based tests for the transaction SMS classifier.

use proptest::prelude::*;
use spendsync_core::sms::{classify_sms, is_expense_sms, Classification, Rejection, LINK_INDICATORS};

// =============================================================================
// Generators
// =============================================================================

/// Generates a masked account number such as `X123` or `XXX4567`.
fn arb_masked_account() -> impl Strategy<Value = String> {
    (1usize..5, "[0-9]{3,4}").prop_map(|(mask_len, digits)| format!("{}{}", "X".repeat(mask_len), digits))
}

/// Generates text that can neither form a masked account nor a link.
fn arb_plain_text() -> impl Strategy<Value = String> {
    "[a-hj-z ,]{0,40}"
}

fn arb_link_indicator() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(LINK_INDICATORS.to_vec())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn classification_is_deterministic(body in ".*") {
        prop_assert_eq!(classify_sms(Some(body.as_str())), classify_sms(Some(body.as_str())));
    }

    #[test]
    fn masked_account_without_link_is_accepted(
        prefix in arb_plain_text(),
        account in arb_masked_account(),
        suffix in arb_plain_text(),
    ) {
        let body = format!("{} {} {}", prefix, account, suffix);
        prop_assert!(is_expense_sms(Some(body.as_str())));
    }

    #[test]
    fn any_link_indicator_overrides_masked_account(
        prefix in arb_plain_text(),
        account in arb_masked_account(),
        indicator in arb_link_indicator(),
        uppercase in any::<bool>(),
    ) {
        let indicator = if uppercase { indicator.to_uppercase() } else { indicator.to_string() };
        let body = format!("{} a/c {} see {}", prefix, account, indicator);
        prop_assert_eq!(
            classify_sms(Some(body.as_str())),
            Classification::Rejected(Rejection::ContainsLink)
        );
    }

    #[test]
    fn text_without_masked_account_is_rejected(body in arb_plain_text()) {
        prop_assert!(!is_expense_sms(Some(body.as_str())));
    }

    #[test]
    fn whitespace_only_bodies_are_rejected(body in "[ \t\r\n]{0,10}") {
        prop_assert_eq!(
            classify_sms(Some(body.as_str())),
            Classification::Rejected(Rejection::EmptyBody)
        );
    }
}
