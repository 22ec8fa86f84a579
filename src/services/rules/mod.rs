//! Scoring rules
//!
//! Each rule is an independent, pure function of a receipt. Rules never see
//! each other's output, so their points commute; the order in
//! [`standard_rules`] only fixes the order of log events.

mod items;
mod purchase;
mod retailer;
mod total;

pub use items::{ItemDescriptionLengthRule, ItemPairsRule};
pub use purchase::{AfternoonTimeRule, OddDayRule};
pub use retailer::RetailerNameRule;
pub use total::{QuarterMultipleRule, RoundDollarRule};

use crate::models::Receipt;

/// A single point calculation rule.
///
/// `apply` must be deterministic and side-effect free. Content a rule cannot
/// interpret (an unparseable date, say) earns 0 points rather than an error.
pub trait Rule: Send + Sync {
    /// Unique, human-readable identifier.
    fn name(&self) -> &'static str;

    /// What the rule rewards.
    fn description(&self) -> &'static str;

    /// Points awarded to `receipt`.
    fn apply(&self, receipt: &Receipt) -> u64;

    /// Log line describing an award of `points`. `None` means there is
    /// nothing worth logging.
    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String>;
}

/// All rules in evaluation order.
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(RetailerNameRule),
        Box::new(RoundDollarRule),
        Box::new(QuarterMultipleRule),
        Box::new(ItemPairsRule),
        Box::new(ItemDescriptionLengthRule),
        Box::new(OddDayRule),
        Box::new(AfternoonTimeRule),
    ]
}
