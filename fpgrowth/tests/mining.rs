use std::collections::BTreeMap;

use fpgrowth::{FPGrowth, Item, ItemCounts, ItemFrequencies, Itemsets, MinerConfig, MiningError};
use test_case::test_case;

fn basket() -> Vec<Vec<Item>> {
    vec![vec![1, 2, 3], vec![2, 3], vec![1, 2, 3, 4], vec![2, 3, 4], vec![1, 2]]
}

fn supports(itemsets: &Itemsets) -> BTreeMap<Vec<Item>, usize> {
    itemsets
        .iter()
        .map(|itemset| (itemset.items().to_vec(), itemset.support()))
        .collect()
}

fn expected_basket_supports() -> BTreeMap<Vec<Item>, usize> {
    [
        (vec![1], 3),
        (vec![2], 5),
        (vec![3], 4),
        (vec![4], 2),
        (vec![1, 2], 3),
        (vec![1, 3], 2),
        (vec![2, 3], 4),
        (vec![2, 4], 2),
        (vec![3, 4], 2),
        (vec![1, 2, 3], 2),
        (vec![2, 3, 4], 2),
    ]
    .into_iter()
    .collect()
}

#[test]
fn basket_scenario_matches_expected_itemsets() {
    let result = FPGrowth::new(0.4).unwrap().run(&basket()).unwrap();

    assert_eq!(result.stats.min_support_absolute, 2);
    assert_eq!(result.stats.transaction_count, 5);
    assert_eq!(result.stats.itemset_count, 11);
    assert_eq!(supports(&result.itemsets), expected_basket_supports());

    let levels = result.itemsets.levels();
    assert_eq!(levels.len(), 4);
    assert!(levels[0].is_empty());
    assert_eq!(levels[1].len(), 4);
    assert_eq!(levels[2].len(), 5);
    assert_eq!(levels[3].len(), 2);
    for (size, level) in levels.iter().enumerate() {
        assert!(level.iter().all(|itemset| itemset.len() == size));
    }
}

#[test]
fn empty_input_yields_empty_result() {
    let transactions: Vec<Vec<Item>> = Vec::new();
    let result = FPGrowth::new(0.5).unwrap().run(&transactions).unwrap();

    assert!(result.itemsets.is_empty());
    assert_eq!(result.itemsets.levels().len(), 1);
    assert_eq!(result.stats.transaction_count, 0);
}

#[test]
fn nothing_frequent_yields_empty_result() {
    let transactions: Vec<Vec<Item>> = vec![vec![1], vec![2], vec![3], vec![4]];
    let result = FPGrowth::new(0.5).unwrap().run(&transactions).unwrap();

    assert!(result.itemsets.is_empty());
    assert_eq!(result.stats.min_support_absolute, 2);
}

#[test_case(0.0 ; "zero")]
#[test_case(-0.2 ; "negative")]
#[test_case(1.5 ; "above one")]
#[test_case(f64::NAN ; "nan")]
fn invalid_support_ratio_is_rejected(min_support: f64) {
    let err = FPGrowth::new(min_support).unwrap_err();
    assert!(matches!(err, MiningError::InvalidArgument(_)));
}

#[test_case(1.0, 5 ; "full support")]
#[test_case(0.6, 3 ; "three of five")]
#[test_case(0.5, 3 ; "half rounds up")]
#[test_case(0.2, 1 ; "single transaction")]
fn min_support_is_resolved_with_ceiling(min_support: f64, expected: usize) {
    let result = FPGrowth::new(min_support).unwrap().run(&basket()).unwrap();
    assert_eq!(result.stats.min_support_absolute, expected);
}

#[test]
fn full_support_keeps_only_universal_items() {
    let result = FPGrowth::new(1.0).unwrap().run(&basket()).unwrap();
    assert_eq!(supports(&result.itemsets), [(vec![2], 5)].into_iter().collect());
}

#[test]
fn supplied_frequencies_match_computed_ones() {
    let transactions = basket();
    let mut counts = ItemCounts::new();
    counts.add_transactions(&transactions[..2]);
    counts.add_transactions(&transactions[2..]);
    let (frequencies, transaction_count) = counts.into_parts();

    let miner = FPGrowth::new(0.4).unwrap();
    let result = miner
        .run_with(&transactions, Some(&frequencies), Some(transaction_count))
        .unwrap();

    assert_eq!(supports(&result.itemsets), expected_basket_supports());
}

#[test]
fn missing_frequency_entry_fails_fast() {
    let transactions = basket();
    let frequencies: ItemFrequencies = [(1, 3), (2, 5), (3, 4)].into_iter().collect();

    let err = FPGrowth::new(0.4)
        .unwrap()
        .run_with(&transactions, Some(&frequencies), None)
        .unwrap_err();
    assert!(matches!(err, MiningError::InconsistentFrequencyMap { item: 4 }));
}

#[test]
fn explicit_transaction_count_overrides_threshold() {
    // 0.4 * 10 = 4: only item 2 (5) and 3 (4) and the pair [2, 3] (4) survive
    let result = FPGrowth::new(0.4)
        .unwrap()
        .run_with(&basket(), None, Some(10))
        .unwrap();

    assert_eq!(result.stats.transaction_count, 10);
    assert_eq!(result.stats.min_support_absolute, 4);
    assert_eq!(
        supports(&result.itemsets),
        [(vec![2], 5), (vec![3], 4), (vec![2, 3], 4)].into_iter().collect()
    );
}

#[test]
fn zero_transaction_count_with_transactions_is_rejected() {
    let err = FPGrowth::new(0.4)
        .unwrap()
        .run_with(&basket(), None, Some(0))
        .unwrap_err();
    assert!(matches!(err, MiningError::InvalidArgument(_)));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(FPGrowth::with_config(MinerConfig::new(0.5).with_buffer_capacity(0)).is_err());
    assert!(FPGrowth::with_config(MinerConfig::new(0.5).with_memory_budget(0)).is_err());
    assert!(FPGrowth::with_config(MinerConfig::new(0.5).with_memory_budget(1 << 20)).is_ok());
}

#[test]
fn runs_are_deterministic() {
    let transactions: Vec<Vec<Item>> = vec![
        vec![5, 1, 9],
        vec![9, 5],
        vec![1, 9, 3, 5],
        vec![3, 1],
        vec![9, 3, 5, 1],
        vec![5],
    ];
    let miner = FPGrowth::new(0.3).unwrap();

    let first = miner.run(&transactions).unwrap().itemsets;
    for _ in 0..5 {
        let again = miner.run(&transactions).unwrap().itemsets;
        assert_eq!(first, again);
    }
}

#[test]
fn item_order_within_transactions_does_not_matter() {
    let reversed: Vec<Vec<Item>> = basket()
        .into_iter()
        .map(|mut transaction| {
            transaction.reverse();
            transaction
        })
        .collect();

    let result = FPGrowth::new(0.4).unwrap().run(&reversed).unwrap();
    assert_eq!(supports(&result.itemsets), expected_basket_supports());
}

#[test]
fn slices_and_arrays_are_accepted() {
    let transactions: [&[Item]; 3] = [&[1, 2], &[1, 2], &[2]];
    let result = fpgrowth::fp_growth_algorithm(&transactions, 0.6).unwrap();
    assert_eq!(
        supports(&result),
        [(vec![1], 2), (vec![2], 3), (vec![1, 2], 2)].into_iter().collect()
    );
}

#[test]
fn stats_render_summary() {
    let result = FPGrowth::new(0.4).unwrap().run(&basket()).unwrap();
    let rendered = result.stats.to_string();
    assert!(rendered.contains("Transactions count from database : 5"));
    assert!(rendered.contains("Frequent itemsets count : 11"));
}
