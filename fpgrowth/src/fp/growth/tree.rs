use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::iter;

use crate::fp::{Item, ItemFrequencies};

/// Index of a node inside an [`FPTree`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct FPNode {
    /// `None` only for the root.
    pub item: Option<Item>,
    pub count: usize,
    pub parent: Option<NodeId>,
    /// Children in insertion order.
    pub children: Vec<NodeId>,
    /// Next node carrying the same item, in insertion order.
    pub next: Option<NodeId>,
}

/// A compressed prefix tree over support-sorted transactions.
///
/// Nodes live in a single arena owned by the tree; parent, child and chain
/// links are indices into it, so dropping the tree frees the whole graph.
#[derive(Debug, Clone)]
pub struct FPTree {
    pub nodes: Vec<FPNode>,
    pub header_list: Vec<Item>,
    pub root_index: NodeId,
    chain_heads: HashMap<Item, NodeId>,
    chain_tails: HashMap<Item, NodeId>,
}

impl FPNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: Vec::new(),
            next: None,
        }
    }

    pub fn new_item(item: Item, count: usize, parent: NodeId) -> Self {
        Self {
            item: Some(item),
            count,
            parent: Some(parent),
            children: Vec::new(),
            next: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.item.is_none()
    }
}

impl Default for FPTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FPTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![FPNode::new_root()],
            header_list: Vec::new(),
            root_index: 0,
            chain_heads: HashMap::new(),
            chain_tails: HashMap::new(),
        }
    }

    pub fn root(&self) -> &FPNode {
        &self.nodes[self.root_index]
    }

    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    /// Number of item nodes, root excluded.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Inserts one transaction whose items are already pruned and sorted by
    /// descending frequency, ties by ascending item id.
    pub fn insert_transaction(&mut self, transaction: &[Item]) {
        let mut current_index = self.root_index;
        for &item in transaction {
            current_index = self.add_count(current_index, item, 1);
        }
    }

    /// Inserts one prefix path of a conditional pattern base.
    ///
    /// `path` holds node indices of `source`: the first entry is the node whose
    /// count is propagated, the rest are its ancestors from nearest to
    /// outermost. Ancestors are inserted outermost first and those whose
    /// conditional frequency is below `min_support` are skipped.
    pub fn insert_conditional_path(
        &mut self,
        source: &FPTree,
        path: &[NodeId],
        beta_frequencies: &ItemFrequencies,
        min_support: usize,
    ) {
        let Some((&leaf, ancestors)) = path.split_first() else {
            return;
        };
        let path_count = source.nodes[leaf].count;

        let mut current_index = self.root_index;
        for &ancestor in ancestors.iter().rev() {
            let Some(item) = source.nodes[ancestor].item else {
                continue;
            };
            let frequency = beta_frequencies.get(&item).copied().unwrap_or(0);
            if frequency >= min_support {
                current_index = self.add_count(current_index, item, path_count);
            }
        }
    }

    /// Sorts the items present in the tree by descending `frequencies`,
    /// ties broken by ascending item id.
    pub fn build_header_list(&mut self, frequencies: &ItemFrequencies) {
        let mut header_list: Vec<Item> = self.chain_heads.keys().copied().collect();
        header_list.sort_unstable_by_key(|item| {
            (Reverse(frequencies.get(item).copied().unwrap_or(0)), *item)
        });
        self.header_list = header_list;
    }

    pub fn chain_head(&self, item: Item) -> Option<NodeId> {
        self.chain_heads.get(&item).copied()
    }

    /// Every node carrying `item`, in insertion order.
    pub fn chain(&self, item: Item) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.chain_head(item), move |&idx| self.nodes[idx].next)
    }

    /// Ancestors of `node` from its parent upward, root excluded.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.nodes[node].parent, move |&idx| self.nodes[idx].parent)
            .take_while(move |&idx| !self.nodes[idx].is_root())
    }

    /// Sum of the counters along the chain of `item`.
    pub fn item_support(&self, item: Item) -> usize {
        self.chain(item).map(|idx| self.nodes[idx].count).sum()
    }

    pub fn has_single_path(&self) -> bool {
        let mut current_index = self.root_index;
        loop {
            match self.nodes[current_index].children.as_slice() {
                [] => return true,
                [only] => current_index = *only,
                _ => return false,
            }
        }
    }

    /// Records the unique root-to-leaf path as `(item, count)` pairs into
    /// `path` and returns the leaf counter, or `None` when the tree branches
    /// or is empty. `path` is cleared first and may be partially filled on
    /// `None`.
    pub fn single_path(&self, path: &mut Vec<(Item, usize)>) -> Option<usize> {
        path.clear();
        let mut current_index = match self.root().children.as_slice() {
            [only] => *only,
            _ => return None,
        };

        loop {
            let node = &self.nodes[current_index];
            let item = node.item?;
            path.push((item, node.count));
            match node.children.as_slice() {
                [] => return Some(node.count),
                [only] => current_index = *only,
                _ => return None,
            }
        }
    }

    fn find_child(&self, parent: NodeId, item: Item) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].item == Some(item))
    }

    fn add_count(&mut self, parent: NodeId, item: Item, count: usize) -> NodeId {
        if let Some(child_index) = self.find_child(parent, item) {
            self.nodes[child_index].count += count;
            return child_index;
        }

        let new_index = self.nodes.len();
        self.nodes.push(FPNode::new_item(item, count, parent));
        self.nodes[parent].children.push(new_index);
        self.link_node(item, new_index);
        new_index
    }

    fn link_node(&mut self, item: Item, new_index: NodeId) {
        if let Some(last) = self.chain_tails.insert(item, new_index) {
            self.nodes[last].next = Some(new_index);
        }
        self.chain_heads.entry(item).or_insert(new_index);
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, idx: NodeId, depth: usize) -> fmt::Result {
        let node = &self.nodes[idx];
        match node.item {
            Some(item) => writeln!(f, "{:indent$}({} count={})", "", item, node.count, indent = depth * 2)?,
            None => writeln!(f, "(root)")?,
        }
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for FPTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "header list: {:?}", self.header_list)?;
        self.fmt_node(f, self.root_index, 0)
    }
}
