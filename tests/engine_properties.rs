//! Property tests for the rule engine.

use proptest::prelude::*;
use receipt_points::services::rules::standard_rules;
use receipt_points::{calculate_points, CancelSignal, Item, Receipt, RuleEngine};
use rust_decimal::Decimal;

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn item() -> impl Strategy<Value = Item> {
    ("[ a-zA-Z0-9-]{0,24}", amount()).prop_map(|(short_description, price)| Item {
        short_description,
        price,
    })
}

fn receipt() -> impl Strategy<Value = Receipt> {
    (
        "[ a-zA-Z0-9&'-]{0,32}",
        1u32..=28,
        0u32..24,
        0u32..60,
        prop::collection::vec(item(), 0..8),
        amount(),
    )
        .prop_map(|(retailer, day, hour, minute, items, total)| Receipt {
            retailer,
            purchase_date: format!("2022-02-{day:02}").as_str().into(),
            purchase_time: format!("{hour:02}:{minute:02}").as_str().into(),
            items,
            total,
        })
}

proptest! {
    #[test]
    fn calculation_is_deterministic(receipt in receipt()) {
        let signal = CancelSignal::never();
        let first = calculate_points(&signal, &receipt).unwrap();
        let second = calculate_points(&signal, &receipt).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn total_is_sum_of_rules(receipt in receipt()) {
        let expected: u64 = standard_rules().iter().map(|rule| rule.apply(&receipt)).sum();
        let breakdown = RuleEngine::standard()
            .evaluate(&CancelSignal::never(), &receipt)
            .unwrap();
        prop_assert_eq!(breakdown.total, expected);
        prop_assert_eq!(calculate_points(&CancelSignal::never(), &receipt).unwrap(), expected);
        prop_assert_eq!(breakdown.contributions.len(), 7);
    }

    #[test]
    fn item_pairs_contribute_five_per_pair(receipt in receipt()) {
        let breakdown = RuleEngine::standard()
            .evaluate(&CancelSignal::never(), &receipt)
            .unwrap();
        let pairs = breakdown
            .contributions
            .iter()
            .find(|c| c.rule == "ItemPairsRule")
            .unwrap();
        prop_assert_eq!(pairs.points, (receipt.items.len() as u64 / 2) * 5);
    }

    #[test]
    fn cancelled_signal_never_scores(receipt in receipt()) {
        let canceller = receipt_points::Canceller::new();
        canceller.cancel();
        prop_assert!(calculate_points(&canceller.signal(), &receipt).is_err());
    }
}
