//! Points calculation
//!
//! The [`RuleEngine`] runs an ordered list of [`Rule`]s over one receipt and
//! sums their points. A pass either completes and yields a score, or is
//! cancelled and yields nothing: partial sums never leave this module.
//!
//! Log events go to whatever `tracing` dispatcher is current for the caller.
//! With no subscriber installed the events are dropped and scoring proceeds
//! unchanged.

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::errors::CalculationError;
use crate::models::Receipt;
use crate::services::cancel::CancelSignal;
use crate::services::rules::{standard_rules, Rule};

/// Points awarded by one rule during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// 1-based position of the rule in the engine
    pub index: usize,
    pub rule: &'static str,
    pub points: u64,
}

/// Per-rule result of a completed pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub contributions: Vec<Contribution>,
    pub total: u64,
}

/// Ordered, immutable set of scoring rules.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

/// Engine with the standard rules, built on first use and shared read-only.
pub static STANDARD_ENGINE: Lazy<RuleEngine> = Lazy::new(RuleEngine::standard);

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(standard_rules())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs every rule in order and records what each one awarded.
    ///
    /// `signal` is checked before the pass and again before each rule.
    pub fn evaluate(
        &self,
        signal: &CancelSignal,
        receipt: &Receipt,
    ) -> Result<ScoreBreakdown, CalculationError> {
        signal.check()?;

        debug!(
            retailer = %receipt.retailer,
            date = %receipt.purchase_date.0,
            time = %receipt.purchase_time.0,
            items_count = receipt.items.len(),
            "calculating points for receipt"
        );

        let mut contributions = Vec::with_capacity(self.rules.len());
        let mut total: u64 = 0;

        for (position, rule) in self.rules.iter().enumerate() {
            signal.check()?;

            let index = position + 1;
            let points = rule.apply(receipt);
            if points > 0 {
                if let Some(message) = rule.explain(points, receipt).filter(|m| !m.is_empty()) {
                    info!(rule_index = index, rule = rule.name(), points, "{message}");
                }
            }

            total = total.saturating_add(points);
            contributions.push(Contribution {
                index,
                rule: rule.name(),
                points,
            });
        }

        debug!(retailer = %receipt.retailer, total_points = total, "total points calculated");

        Ok(ScoreBreakdown {
            contributions,
            total,
        })
    }

    /// Score for `receipt`, or the cancellation that stopped the pass.
    pub fn calculate(
        &self,
        signal: &CancelSignal,
        receipt: &Receipt,
    ) -> Result<u64, CalculationError> {
        self.evaluate(signal, receipt).map(|breakdown| breakdown.total)
    }
}

/// Scores `receipt` with the standard rules.
pub fn calculate_points(signal: &CancelSignal, receipt: &Receipt) -> Result<u64, CalculationError> {
    STANDARD_ENGINE.calculate(signal, receipt)
}
