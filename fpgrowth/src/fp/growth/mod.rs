pub mod builder;
pub mod mining;
pub mod tree;

pub use mining::{fp_growth_algorithm, FPGrowth, MiningResult};
pub use tree::{FPNode, FPTree, NodeId};
