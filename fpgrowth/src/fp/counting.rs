use std::collections::HashMap;

use super::growth::builder::count_item_frequencies;
use super::{Item, ItemFrequencies};

/// Item frequencies and transaction count accumulated over batches, for
/// callers that cannot hand every transaction to a single counting pass.
///
/// The result feeds [`FPGrowth::run_with`](super::FPGrowth::run_with).
#[derive(Debug, Clone, Default)]
pub struct ItemCounts {
    frequencies: ItemFrequencies,
    transaction_count: usize,
}

impl ItemCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transactions<T>(&mut self, transactions: &[T])
    where
        T: AsRef<[Item]> + Sync,
    {
        self.transaction_count += transactions.len();
        for (item, count) in count_item_frequencies(transactions) {
            *self.frequencies.entry(item).or_insert(0) += count;
        }
    }

    pub fn add_transaction(&mut self, transaction: &[Item]) {
        self.transaction_count += 1;
        for &item in transaction {
            *self.frequencies.entry(item).or_insert(0) += 1;
        }
    }

    pub fn frequency(&self, item: Item) -> usize {
        self.frequencies.get(&item).copied().unwrap_or(0)
    }

    pub fn frequencies(&self) -> &ItemFrequencies {
        &self.frequencies
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn into_parts(self) -> (HashMap<Item, usize>, usize) {
        (self.frequencies, self.transaction_count)
    }
}
