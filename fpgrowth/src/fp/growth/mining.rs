use std::time::Instant;

use tracing::{debug, info, trace, warn};

use super::builder::{build_conditional_fp_tree, build_fp_tree, count_item_frequencies, min_support_count};
use super::tree::{FPTree, NodeId};
use crate::fp::combinations::{apply_subset, subset_masks};
use crate::fp::memory::{estimate_fp_tree_size, estimate_itemset_size, MemoryBudget, MemoryGuard};
use crate::fp::utils::{Itemset, Itemsets};
use crate::fp::{Item, ItemFrequencies, MinerConfig, MiningError, ResourceError, Result, RunStats};

/// Frequent itemsets of a run together with its statistics.
#[derive(Debug, Clone)]
pub struct MiningResult {
    pub itemsets: Itemsets,
    pub stats: RunStats,
}

/// FP-Growth miner. Holds only configuration, so one instance can serve any
/// number of independent runs.
#[derive(Debug, Clone)]
pub struct FPGrowth {
    config: MinerConfig,
}

/// Mines `transactions` with default settings and returns the itemsets.
pub fn fp_growth_algorithm<T>(transactions: &[T], min_support: f64) -> Result<Itemsets>
where
    T: AsRef<[Item]> + Sync,
{
    Ok(FPGrowth::new(min_support)?.run(transactions)?.itemsets)
}

impl FPGrowth {
    pub fn new(min_support: f64) -> Result<Self> {
        Self::with_config(MinerConfig::new(min_support))
    }

    pub fn with_config(config: MinerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    pub fn run<T>(&self, transactions: &[T]) -> Result<MiningResult>
    where
        T: AsRef<[Item]> + Sync,
    {
        self.run_with(transactions, None, None)
    }

    /// Runs with an optional precomputed frequency map and transaction count.
    ///
    /// Without `frequencies`, one pass over `transactions` computes them. A
    /// supplied map must cover every item of every transaction. An explicit
    /// `transaction_count` overrides the number of transactions given.
    pub fn run_with<T>(
        &self,
        transactions: &[T],
        frequencies: Option<&ItemFrequencies>,
        transaction_count: Option<usize>,
    ) -> Result<MiningResult>
    where
        T: AsRef<[Item]> + Sync,
    {
        let start = Instant::now();
        let transaction_count = resolve_transaction_count(transactions.len(), transaction_count)?;

        match frequencies {
            Some(frequencies) => self.execute(transactions, frequencies, transaction_count, start),
            None => {
                let frequencies = count_item_frequencies(transactions);
                self.execute(transactions, &frequencies, transaction_count, start)
            }
        }
    }

    fn execute<T>(
        &self,
        transactions: &[T],
        frequencies: &ItemFrequencies,
        transaction_count: usize,
        start: Instant,
    ) -> Result<MiningResult>
    where
        T: AsRef<[Item]>,
    {
        let min_count = min_support_count(self.config.min_support, transaction_count);
        debug!(
            transactions = transactions.len(),
            transaction_count,
            min_count,
            distinct_items = frequencies.len(),
            "starting FP-Growth run"
        );

        let budget = self
            .config
            .memory_budget_bytes
            .map_or_else(MemoryBudget::unlimited, MemoryBudget::new);

        let tree = build_fp_tree(transactions, frequencies, min_count)?;
        let _tree_guard = MemoryGuard::new(&budget, estimate_fp_tree_size(&tree))?;
        debug!(
            nodes = tree.node_count(),
            frequent_items = tree.header_list.len(),
            "built initial FP-tree"
        );

        let mut miner = Miner::new(min_count, &budget, self.config.buffer_capacity);
        if !tree.header_list.is_empty() {
            miner.mine(&tree, 0, transaction_count, frequencies)?;
        }
        let itemsets = miner.patterns;

        let stats = RunStats {
            elapsed: start.elapsed(),
            peak_memory_bytes: budget.peak_usage(),
            itemset_count: itemsets.count(),
            transaction_count,
            min_support_absolute: min_count,
        };
        info!(
            itemsets = stats.itemset_count,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            peak_memory_bytes = stats.peak_memory_bytes,
            "FP-Growth run finished"
        );

        Ok(MiningResult { itemsets, stats })
    }
}

fn resolve_transaction_count(given: usize, explicit: Option<usize>) -> Result<usize> {
    match explicit {
        None => Ok(given),
        Some(0) if given > 0 => Err(MiningError::invalid(format!(
            "transaction count is zero but {given} transactions were supplied"
        ))),
        Some(count) => {
            if count < given {
                warn!(count, given, "transaction count is lower than the transactions supplied");
            }
            Ok(count)
        }
    }
}

/// Prefix slots reserved up front; longer prefixes grow the buffer.
const PREFIX_RESERVE: usize = 64;

/// Recursion state shared by every level of one run.
///
/// `prefix` follows stack discipline: a call at prefix length `n` only
/// writes at positions `>= n` and leaves the buffer at length `n` on return.
struct Miner<'a> {
    min_count: usize,
    budget: &'a MemoryBudget,
    buffer_capacity: Option<usize>,
    prefix: Vec<Item>,
    single_path: Vec<(Item, usize)>,
    path_scratch: Vec<NodeId>,
    patterns: Itemsets,
}

impl<'a> Miner<'a> {
    fn new(min_count: usize, budget: &'a MemoryBudget, buffer_capacity: Option<usize>) -> Self {
        Self {
            min_count,
            budget,
            buffer_capacity,
            // the capacity is a limit enforced by `check_capacity`, not a reservation
            prefix: Vec::with_capacity(buffer_capacity.unwrap_or(0).min(PREFIX_RESERVE)),
            single_path: Vec::new(),
            path_scratch: Vec::new(),
            patterns: Itemsets::default(),
        }
    }

    fn mine(
        &mut self,
        tree: &FPTree,
        prefix_len: usize,
        prefix_support: usize,
        frequencies: &ItemFrequencies,
    ) -> Result<()> {
        debug_assert_eq!(self.prefix.len(), prefix_len);

        if let Some(path_support) = tree.single_path(&mut self.single_path) {
            if path_support >= self.min_count {
                return self.save_path_combinations(prefix_len);
            }
        }

        for &item in tree.header_list.iter().rev() {
            let support = frequencies.get(&item).copied().unwrap_or(0);
            let beta_support = prefix_support.min(support);

            self.prefix.truncate(prefix_len);
            self.push_prefix(item)?;
            self.save_itemset(beta_support)?;

            let (conditional_tree, beta_frequencies) =
                build_conditional_fp_tree(tree, item, self.min_count, &mut self.path_scratch);
            if conditional_tree.is_empty() {
                continue;
            }

            let budget = self.budget;
            let _guard = MemoryGuard::new(budget, estimate_fp_tree_size(&conditional_tree))?;
            trace!(
                item,
                depth = prefix_len + 1,
                nodes = conditional_tree.node_count(),
                "mining conditional FP-tree"
            );
            self.mine(&conditional_tree, prefix_len + 1, beta_support, &beta_frequencies)?;
        }

        self.prefix.truncate(prefix_len);
        Ok(())
    }

    /// Emits every non-empty subset of the recorded single path appended to
    /// the current prefix.
    fn save_path_combinations(&mut self, prefix_len: usize) -> Result<()> {
        self.check_capacity(prefix_len + self.single_path.len())?;

        for mask in subset_masks(self.single_path.len())? {
            self.prefix.truncate(prefix_len);
            let support = apply_subset(&self.single_path, mask, &mut self.prefix);
            self.save_itemset(support)?;
        }

        self.prefix.truncate(prefix_len);
        Ok(())
    }

    fn push_prefix(&mut self, item: Item) -> Result<()> {
        self.check_capacity(self.prefix.len() + 1)?;
        self.prefix.push(item);
        Ok(())
    }

    fn check_capacity(&self, required: usize) -> Result<()> {
        match self.buffer_capacity {
            Some(capacity) if required > capacity => {
                Err(ResourceError::BufferTooSmall { required, capacity }.into())
            }
            _ => Ok(()),
        }
    }

    fn save_itemset(&mut self, support: usize) -> Result<()> {
        let len = self.prefix.len();
        self.budget.allocate(estimate_itemset_size(len))?;
        self.patterns.add(Itemset::new(self.prefix.clone(), support), len);
        Ok(())
    }
}
