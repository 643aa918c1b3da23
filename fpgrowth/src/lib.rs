//! Frequent itemset mining with FP-Growth (Han, Pei & Yin, 2000).
//!
//! ```
//! use fpgrowth::FPGrowth;
//!
//! let transactions: Vec<Vec<u32>> = vec![vec![1, 2, 3], vec![2, 3], vec![1, 2, 3, 4], vec![2, 3, 4], vec![1, 2]];
//! let result = FPGrowth::new(0.4).unwrap().run(&transactions).unwrap();
//!
//! assert_eq!(result.stats.min_support_absolute, 2);
//! assert_eq!(result.itemsets.level(3).len(), 2);
//! ```

pub mod fp;

#[cfg(feature = "python")]
mod python;

pub use fp::{
    fp_growth_algorithm, FPGrowth, Item, ItemCounts, ItemFrequencies, Itemset, Itemsets, MinerConfig,
    MiningError, MiningResult, Result, RunStats,
};
