use super::{Item, ResourceError};

/// Largest single path whose subsets can be enumerated with a `u64` mask.
pub const MAX_PATH_LEN: usize = 63;

/// Masks of every non-empty subset of a path of `len` nodes, `1..2^len`.
pub fn subset_masks(len: usize) -> Result<std::ops::Range<u64>, ResourceError> {
    if len > MAX_PATH_LEN {
        return Err(ResourceError::PathTooLong { len });
    }
    Ok(1..(1u64 << len))
}

/// Appends the items selected by `mask` to `pattern` and returns the support
/// of the selection: the smallest counter among the selected nodes.
///
/// `mask` must be non-zero.
pub fn apply_subset(path: &[(Item, usize)], mask: u64, pattern: &mut Vec<Item>) -> usize {
    let mut support = usize::MAX;
    for (position, &(item, count)) in path.iter().enumerate() {
        if mask & (1u64 << position) != 0 {
            pattern.push(item);
            support = support.min(count);
        }
    }
    support
}
