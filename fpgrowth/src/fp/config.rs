use super::{MiningError, Result};

/// Parameters of a mining run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinerConfig {
    /// Minimum support as a fraction of transactions, in `(0, 1]`.
    pub min_support: f64,
    /// Fixed capacity of the prefix buffer. `None` lets it grow; with a
    /// capacity, a longer itemset aborts the run instead of being truncated.
    pub buffer_capacity: Option<usize>,
    /// Upper bound on the estimated bytes held by trees and results.
    ///
    /// Checked when each tree is complete and whenever an itemset is emitted.
    /// The initial tree is built in full before its size is checked, so an
    /// oversized input fails the run after construction rather than during it.
    pub memory_budget_bytes: Option<usize>,
}

impl MinerConfig {
    pub fn new(min_support: f64) -> Self {
        Self {
            min_support,
            buffer_capacity: None,
            memory_budget_bytes: None,
        }
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    pub fn with_memory_budget(mut self, bytes: usize) -> Self {
        self.memory_budget_bytes = Some(bytes);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(MiningError::invalid(format!(
                "minimum support {} is outside (0, 1]",
                self.min_support
            )));
        }
        if self.buffer_capacity == Some(0) {
            return Err(MiningError::invalid("buffer capacity must be at least 1"));
        }
        if self.memory_budget_bytes == Some(0) {
            return Err(MiningError::invalid("memory budget must be at least 1 byte"));
        }
        Ok(())
    }
}
