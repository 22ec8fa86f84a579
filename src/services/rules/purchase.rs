use chrono::Datelike;

use super::Rule;
use crate::models::Receipt;

const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;
const AFTERNOON_START: u32 = 14 * 60;
const AFTERNOON_END: u32 = 16 * 60;

/// 6 points if the day of the purchase date is odd.
pub struct OddDayRule;

impl Rule for OddDayRule {
    fn name(&self) -> &'static str {
        "OddDayRule"
    }

    fn description(&self) -> &'static str {
        "6 points if purchase day is odd"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        match receipt.purchase_date.parse() {
            Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
            _ => 0,
        }
    }

    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String> {
        let date = receipt.purchase_date.parse()?;
        (points > 0).then(|| {
            format!(
                "Rule 6: Added {points} points for purchase day {} being odd",
                date.day()
            )
        })
    }
}

/// 10 points if the purchase time is after 14:00 and before 16:00.
pub struct AfternoonTimeRule;

impl Rule for AfternoonTimeRule {
    fn name(&self) -> &'static str {
        "AfternoonTimeRule"
    }

    fn description(&self) -> &'static str {
        "10 points if purchase time is between 14:00 and 16:00 (exclusive)"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        match receipt.purchase_time.minutes_since_midnight() {
            Some(minutes) if minutes > AFTERNOON_START && minutes < AFTERNOON_END => {
                AFTERNOON_POINTS
            }
            _ => 0,
        }
    }

    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String> {
        (points > 0).then(|| {
            format!(
                "Rule 7: Added {points} points for purchase time {} being between 14:00 and 16:00",
                receipt.purchase_time.0
            )
        })
    }
}
