use std::cmp::Ordering;
use std::fmt;

use crate::fp::Item;

/// A set of items, sorted ascending, with its absolute support.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Itemset {
    items: Vec<Item>,
    support: usize,
}

impl Itemset {
    /// Sorts `items` ascending.
    pub fn new(mut items: Vec<Item>, support: usize) -> Self {
        items.sort_unstable();
        Self { items, support }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn support(&self) -> usize {
        self.support
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Item> {
        self.items.get(position).copied()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.items.binary_search(&item).is_ok()
    }

    /// Items present in both itemsets, ascending.
    pub fn intersection(&self, other: &Itemset) -> Vec<Item> {
        let (left, right) = (&self.items, &other.items);
        let mut shared = Vec::with_capacity(left.len().min(right.len()));
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    shared.push(left[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, " #SUP: {}", self.support)
    }
}

/// Itemsets grouped by size: `levels()[k]` holds the itemsets of `k` items.
///
/// Level 0 always exists and stays empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itemsets {
    name: String,
    levels: Vec<Vec<Itemset>>,
    count: usize,
}

impl Default for Itemsets {
    fn default() -> Self {
        Self::new("FREQUENT ITEMSETS")
    }
}

impl Itemsets {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: vec![Vec::new()],
            count: 0,
        }
    }

    pub fn add(&mut self, itemset: Itemset, level: usize) {
        while self.levels.len() <= level {
            self.levels.push(Vec::new());
        }
        self.levels[level].push(itemset);
        self.count += 1;
    }

    pub fn levels(&self) -> &[Vec<Itemset>] {
        &self.levels
    }

    /// Itemsets of exactly `k` items; empty past the largest level.
    pub fn level(&self, k: usize) -> &[Itemset] {
        self.levels.get(k).map(Vec::as_slice).unwrap_or_default()
    }

    /// Size of the largest itemset stored, 0 when empty.
    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Itemset> {
        self.levels.iter().flatten()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Lowers the reported count for callers that discard an inspected
    /// itemset. Stored levels are left untouched.
    pub fn decrease_count(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl fmt::Display for Itemsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ------- {} -------", self.name)?;
        let mut pattern = 0;
        for (level, itemsets) in self.levels.iter().enumerate() {
            writeln!(f, "  L{level}")?;
            for itemset in itemsets {
                writeln!(f, "  pattern {pattern}:  {itemset}")?;
                pattern += 1;
            }
        }
        writeln!(f, " --------------------------------")
    }
}
