use unicode_general_category::{get_general_category, GeneralCategory};

use super::Rule;
use crate::models::Receipt;

/// Letters of any case or script, and decimal digits. Other numerics such
/// as superscripts and roman numerals do not count.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// One point for every alphanumeric character in the retailer name.
pub struct RetailerNameRule;

impl Rule for RetailerNameRule {
    fn name(&self) -> &'static str {
        "RetailerNameRule"
    }

    fn description(&self) -> &'static str {
        "One point for every alphanumeric character in the retailer name"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        receipt
            .retailer
            .chars()
            .filter(|&c| is_letter_or_digit(c))
            .count() as u64
    }

    // The count is informative even when it is zero.
    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String> {
        Some(format!(
            "Rule 1: Added {points} points for alphanumeric characters in retailer name '{}'",
            receipt.retailer
        ))
    }
}
