use std::fmt;
use std::time::Duration;

/// Statistics of one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub elapsed: Duration,
    /// High-water mark of the estimated bytes held by trees and results.
    pub peak_memory_bytes: usize,
    pub itemset_count: usize,
    pub transaction_count: usize,
    pub min_support_absolute: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=============  FP-GROWTH - STATS =============")?;
        writeln!(f, " Transactions count from database : {}", self.transaction_count)?;
        writeln!(f, " Min support absolute: {}", self.min_support_absolute)?;
        writeln!(f, " Max memory usage Kb: {:.2}", self.peak_memory_bytes as f64 / 1024.0)?;
        writeln!(f, " Frequent itemsets count : {}", self.itemset_count)?;
        writeln!(f, " Total time ~ {} ms", self.elapsed.as_millis())?;
        writeln!(f, "===================================================")
    }
}
