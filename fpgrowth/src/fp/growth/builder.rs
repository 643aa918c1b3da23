use std::cmp::Reverse;
use std::collections::HashMap;

use rayon::prelude::*;

use super::tree::{FPTree, NodeId};
use crate::fp::{Item, ItemFrequencies, MiningError, Result};

/// Counts how many transactions contain each item, in one parallel pass.
pub fn count_item_frequencies<T>(transactions: &[T]) -> ItemFrequencies
where
    T: AsRef<[Item]> + Sync,
{
    transactions
        .par_iter()
        .fold(HashMap::new, |mut counts: ItemFrequencies, transaction| {
            for &item in transaction.as_ref() {
                *counts.entry(item).or_insert(0) += 1;
            }
            counts
        })
        .reduce(HashMap::new, |mut left, right| {
            for (item, count) in right {
                *left.entry(item).or_insert(0) += count;
            }
            left
        })
}

/// Products this close to an integer are taken as that integer.
const SUPPORT_EPSILON: f64 = 1e-9;

/// `ceil(ratio * transaction_count)`, the absolute support threshold.
///
/// A product within [`SUPPORT_EPSILON`] of an integer rounds to it, so that
/// `0.07 * 100` yields 7 rather than 8 from its binary representation. The
/// threshold is at least 1 whenever there are transactions.
pub fn min_support_count(min_support: f64, transaction_count: usize) -> usize {
    if transaction_count == 0 {
        return 0;
    }
    let exact = min_support * transaction_count as f64;
    let nearest = exact.round();
    let count = if (exact - nearest).abs() <= SUPPORT_EPSILON * nearest.max(1.0) {
        nearest
    } else {
        exact.ceil()
    };
    (count as usize).max(1)
}

/// Sorts items by descending frequency, ties by ascending item id.
pub fn sort_by_frequency(items: &mut [Item], frequencies: &ItemFrequencies) {
    items.sort_unstable_by_key(|item| (Reverse(frequencies.get(item).copied().unwrap_or(0)), *item));
}

/// Builds the initial tree from pruned, frequency-sorted transactions and
/// computes its header list.
///
/// Every transaction item must be present in `frequencies`.
pub fn build_fp_tree<T>(
    transactions: &[T],
    frequencies: &ItemFrequencies,
    min_count: usize,
) -> Result<FPTree>
where
    T: AsRef<[Item]>,
{
    let mut fp_tree = FPTree::new();
    let mut tx_items: Vec<Item> = Vec::new();

    for transaction in transactions {
        tx_items.clear();
        for &item in transaction.as_ref() {
            let count = frequencies
                .get(&item)
                .copied()
                .ok_or(MiningError::InconsistentFrequencyMap { item })?;
            if count >= min_count {
                tx_items.push(item);
            }
        }

        if !tx_items.is_empty() {
            sort_by_frequency(&mut tx_items, frequencies);
            fp_tree.insert_transaction(&tx_items);
        }
    }

    fp_tree.build_header_list(frequencies);
    Ok(fp_tree)
}

/// Support of every ancestor item across the prefix paths of `item`.
pub fn conditional_frequencies(tree: &FPTree, item: Item) -> ItemFrequencies {
    let mut beta_frequencies = HashMap::new();
    for node in tree.chain(item) {
        let path_count = tree.nodes[node].count;
        for ancestor in tree.ancestors(node) {
            if let Some(ancestor_item) = tree.nodes[ancestor].item {
                *beta_frequencies.entry(ancestor_item).or_insert(0) += path_count;
            }
        }
    }
    beta_frequencies
}

/// Builds the conditional tree of `item` from its prefix paths in `tree`.
///
/// Returns the tree, with its header list built when it has any node, and
/// the conditional frequencies of the items it was built from. `scratch`
/// holds one prefix path at a time and is left in an unspecified state.
pub fn build_conditional_fp_tree(
    tree: &FPTree,
    item: Item,
    min_count: usize,
    scratch: &mut Vec<NodeId>,
) -> (FPTree, ItemFrequencies) {
    let beta_frequencies = conditional_frequencies(tree, item);
    let mut conditional_tree = FPTree::new();

    for node in tree.chain(item) {
        if tree.nodes[node].parent == Some(tree.root_index) {
            continue;
        }
        scratch.clear();
        scratch.push(node);
        scratch.extend(tree.ancestors(node));
        conditional_tree.insert_conditional_path(tree, scratch, &beta_frequencies, min_count);
    }

    if !conditional_tree.is_empty() {
        conditional_tree.build_header_list(&beta_frequencies);
    }
    (conditional_tree, beta_frequencies)
}
