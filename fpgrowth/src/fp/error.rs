use thiserror::Error;

use super::Item;

pub type Result<T> = std::result::Result<T, MiningError>;

/// Errors that abort a mining run. No partial result survives any of them.
#[derive(Debug, Error)]
pub enum MiningError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("item {item} appears in a transaction but has no entry in the frequency map")]
    InconsistentFrequencyMap { item: Item },

    #[error("resource exhausted: {0}")]
    ResourceExhaustion(#[from] ResourceError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("prefix buffer too small: required {required}, capacity {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },

    #[error("single path of {len} nodes is too long to enumerate")]
    PathTooLong { len: usize },

    #[error("memory budget exceeded: requested {requested} bytes, {available} available")]
    BudgetExceeded { requested: usize, available: usize },
}

impl MiningError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
