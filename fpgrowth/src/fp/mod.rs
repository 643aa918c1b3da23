use std::collections::HashMap;

pub mod combinations;
pub mod config;
pub mod counting;
pub mod error;
pub mod growth;
pub mod io;
pub mod memory;
pub mod stats;
pub mod utils;


/// Item identifier.
pub type Item = u32;

/// Support count per item.
pub type ItemFrequencies = HashMap<Item, usize>;

pub use config::MinerConfig;
pub use counting::ItemCounts;
pub use error::{MiningError, ResourceError, Result};
pub use growth::{fp_growth_algorithm, FPGrowth, FPNode, FPTree, MiningResult, NodeId};
pub use stats::RunStats;
pub use utils::{Itemset, Itemsets};
