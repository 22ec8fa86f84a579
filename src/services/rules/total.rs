use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::Rule;
use crate::models::Receipt;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;

/// The total in whole cents, or `None` when it carries a sub-cent fraction.
fn total_in_cents(total: Decimal) -> Option<i64> {
    let cents = total.checked_mul(Decimal::ONE_HUNDRED)?;
    if cents.fract().is_zero() {
        cents.to_i64()
    } else {
        None
    }
}

/// 50 points if the total is a round dollar amount with no cents.
pub struct RoundDollarRule;

impl Rule for RoundDollarRule {
    fn name(&self) -> &'static str {
        "RoundDollarRule"
    }

    fn description(&self) -> &'static str {
        "50 points if the total is a round dollar amount"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        if receipt.total.fract().is_zero() {
            ROUND_DOLLAR_POINTS
        } else {
            0
        }
    }

    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String> {
        (points > 0).then(|| {
            format!(
                "Rule 2: Added {points} points for round dollar amount ${:.2}",
                receipt.total
            )
        })
    }
}

/// 25 points if the total is a multiple of 0.25.
pub struct QuarterMultipleRule;

impl Rule for QuarterMultipleRule {
    fn name(&self) -> &'static str {
        "QuarterMultipleRule"
    }

    fn description(&self) -> &'static str {
        "25 points if the total is a multiple of 0.25"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        match total_in_cents(receipt.total) {
            Some(cents) if cents % 25 == 0 => QUARTER_MULTIPLE_POINTS,
            _ => 0,
        }
    }

    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String> {
        (points > 0).then(|| {
            format!(
                "Rule 3: Added {points} points for total ${:.2} being a multiple of 0.25",
                receipt.total
            )
        })
    }
}
