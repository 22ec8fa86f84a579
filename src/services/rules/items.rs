use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::Rule;
use crate::models::{Item, Receipt};

const POINTS_PER_PAIR: u64 = 5;

/// 5 points for every two items on the receipt.
pub struct ItemPairsRule;

impl Rule for ItemPairsRule {
    fn name(&self) -> &'static str {
        "ItemPairsRule"
    }

    fn description(&self) -> &'static str {
        "5 points for every two items"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        (receipt.items.len() / 2) as u64 * POINTS_PER_PAIR
    }

    fn explain(&self, points: u64, receipt: &Receipt) -> Option<String> {
        (points > 0).then(|| {
            format!(
                "Rule 4: Added {points} points for {} pairs of items ({} items total)",
                receipt.items.len() / 2,
                receipt.items.len()
            )
        })
    }
}

/// Trimmed description length a multiple of 3 earns `ceil(price * 0.2)`.
pub struct ItemDescriptionLengthRule;

impl ItemDescriptionLengthRule {
    fn item_points(item: &Item) -> u64 {
        // Length is in UTF-8 bytes.
        let length = item.short_description.trim().len();
        if length == 0 || length % 3 != 0 || item.price.is_sign_negative() {
            return 0;
        }
        item.price
            .checked_mul(Decimal::new(2, 1))
            .and_then(|points| points.ceil().to_u64())
            .unwrap_or(u64::MAX)
    }
}

impl Rule for ItemDescriptionLengthRule {
    fn name(&self) -> &'static str {
        "ItemDescriptionLengthRule"
    }

    fn description(&self) -> &'static str {
        "If trimmed item description length is a multiple of 3, add ceil(price * 0.2) points"
    }

    fn apply(&self, receipt: &Receipt) -> u64 {
        receipt
            .items
            .iter()
            .map(Self::item_points)
            .fold(0, u64::saturating_add)
    }

    fn explain(&self, points: u64, _receipt: &Receipt) -> Option<String> {
        (points > 0).then(|| {
            format!("Rule 5: Added {points} points for items with description length multiple of 3")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{item, target_receipt};

    fn with_items(items: Vec<Item>) -> Receipt {
        let mut receipt = target_receipt();
        receipt.items = items;
        receipt
    }

    #[test]
    fn test_pairs_floor() {
        let expected = [0, 0, 5, 5, 10];
        for (count, points) in expected.into_iter().enumerate() {
            let receipt = with_items(vec![item("Item", "1.00"); count]);
            assert_eq!(ItemPairsRule.apply(&receipt), points, "{count} items");
        }
    }

    #[test]
    fn test_pairs_explain() {
        let receipt = with_items(vec![item("Item", "1.00"); 3]);
        assert_eq!(
            ItemPairsRule.explain(5, &receipt).unwrap(),
            "Rule 4: Added 5 points for 1 pairs of items (3 items total)"
        );
        assert_eq!(ItemPairsRule.explain(0, &receipt), None);
    }

    #[test]
    fn test_description_length_not_multiple() {
        let receipt = with_items(vec![item("Item1", "1.00"), item("Item2", "2.00")]);
        assert_eq!(ItemDescriptionLengthRule.apply(&receipt), 0);
    }

    #[test]
    fn test_description_length_multiple() {
        let receipt = with_items(vec![item("123", "5.00"), item("123456", "10.00")]);
        assert_eq!(ItemDescriptionLengthRule.apply(&receipt), 3);
    }

    #[test]
    fn test_description_is_trimmed() {
        let receipt = with_items(vec![item("   123   ", "5.00"), item("Item", "1.00")]);
        assert_eq!(ItemDescriptionLengthRule.apply(&receipt), 1);

        let receipt = with_items(vec![item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00")]);
        assert_eq!(ItemDescriptionLengthRule.apply(&receipt), 3);
    }

    #[test]
    fn test_price_rounds_up() {
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("abc", "4.99")), 1);
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("abc", "5.00")), 1);
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("abc", "5.01")), 2);
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("abc", "0.00")), 0);
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("abc", "12.25")), 3);
    }

    #[test]
    fn test_blank_description_scores_nothing() {
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("      ", "100.00")), 0);
    }

    #[test]
    fn test_description_length_counts_bytes() {
        // "añb" is three characters but four bytes.
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("añb", "10.00")), 0);
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("ñb", "10.00")), 2);
    }

    #[test]
    fn test_huge_prices_saturate() {
        let receipt = with_items(vec![
            item("abc", "90000000000000000000"),
            item("abc", "90000000000000000000"),
        ]);
        assert_eq!(ItemDescriptionLengthRule.apply(&receipt), u64::MAX);

        let single = item("abc", "100000000000000000000000");
        assert_eq!(ItemDescriptionLengthRule::item_points(&single), u64::MAX);
    }

    #[test]
    fn test_negative_price_scores_nothing() {
        assert_eq!(ItemDescriptionLengthRule::item_points(&item("abc", "-5.00")), 0);
    }

    #[test]
    fn test_description_length_explain() {
        let receipt = with_items(vec![item("123", "5.00")]);
        assert_eq!(
            ItemDescriptionLengthRule.explain(1, &receipt).unwrap(),
            "Rule 5: Added 1 points for items with description length multiple of 3"
        );
        assert_eq!(ItemDescriptionLengthRule.explain(0, &receipt), None);
    }
}
