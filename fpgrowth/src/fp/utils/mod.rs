pub mod storage;

pub use storage::{Itemset, Itemsets};
