use std::mem::size_of;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::growth::tree::{FPNode, FPTree, NodeId};
use super::utils::Itemset;
use super::{Item, ResourceError};

/// Tracks estimated bytes held by a mining run against an upper bound and
/// remembers the high-water mark.
#[derive(Debug)]
pub struct MemoryBudget {
    max_bytes: usize,
    current_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
}

impl MemoryBudget {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            current_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    pub fn allocate(&self, bytes: usize) -> Result<(), ResourceError> {
        let current = self.current_bytes.fetch_add(bytes, Ordering::SeqCst);
        let total = current.saturating_add(bytes);
        if total > self.max_bytes {
            self.current_bytes.fetch_sub(bytes, Ordering::SeqCst);
            return Err(ResourceError::BudgetExceeded {
                requested: bytes,
                available: self.max_bytes.saturating_sub(current),
            });
        }
        self.peak_bytes.fetch_max(total, Ordering::SeqCst);
        Ok(())
    }

    pub fn deallocate(&self, bytes: usize) {
        self.current_bytes.fetch_sub(bytes, Ordering::SeqCst);
    }

    pub fn current_usage(&self) -> usize {
        self.current_bytes.load(Ordering::SeqCst)
    }

    pub fn peak_usage(&self) -> usize {
        self.peak_bytes.load(Ordering::SeqCst)
    }

    pub fn available(&self) -> usize {
        self.max_bytes.saturating_sub(self.current_usage())
    }
}

/// Reservation released when dropped.
pub struct MemoryGuard<'a> {
    budget: &'a MemoryBudget,
    bytes: usize,
}

impl<'a> MemoryGuard<'a> {
    pub fn new(budget: &'a MemoryBudget, bytes: usize) -> Result<Self, ResourceError> {
        budget.allocate(bytes)?;
        Ok(Self { budget, bytes })
    }
}

impl Drop for MemoryGuard<'_> {
    fn drop(&mut self) {
        self.budget.deallocate(self.bytes);
    }
}

pub fn estimate_fp_tree_size(tree: &FPTree) -> usize {
    let nodes = tree.nodes.len();
    let items = tree.header_list.len();
    // one child slot per non-root node, two chain index entries per item
    nodes * (size_of::<FPNode>() + size_of::<NodeId>())
        + items * (size_of::<Item>() + 2 * (size_of::<Item>() + size_of::<NodeId>()))
        + size_of::<FPTree>()
}

pub fn estimate_itemset_size(itemset_len: usize) -> usize {
    size_of::<Itemset>() + itemset_len * size_of::<Item>()
}
