//! Transaction sources feeding the miner.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::ArrayView2;

use super::{Item, MiningError, Result};

/// Converts an externally supplied identifier into an [`Item`].
pub fn parse_item(raw: i64) -> Result<Item> {
    Item::try_from(raw)
        .map_err(|_| MiningError::invalid(format!("item {raw} is outside the range 0..={}", Item::MAX)))
}

/// Reads one transaction per line, items separated by whitespace.
///
/// Blank lines and lines starting with `#`, `%` or `@` are skipped. Repeated
/// items within a line are kept once, in first-occurrence order.
pub fn read_transactions<R: BufRead>(reader: R) -> Result<Vec<Vec<Item>>> {
    let mut transactions = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(['#', '%', '@']) {
            continue;
        }

        let mut transaction = Vec::new();
        for token in line.split_whitespace() {
            let raw: i64 = token.parse().map_err(|_| {
                MiningError::invalid(format!("line {}: '{token}' is not an item identifier", idx + 1))
            })?;
            let item = parse_item(raw).map_err(|err| match err {
                MiningError::InvalidArgument(message) => {
                    MiningError::invalid(format!("line {}: {message}", idx + 1))
                }
                other => other,
            })?;
            if !transaction.contains(&item) {
                transaction.push(item);
            }
        }
        transactions.push(transaction);
    }

    Ok(transactions)
}

pub fn read_transactions_file(path: impl AsRef<Path>) -> Result<Vec<Vec<Item>>> {
    let file = File::open(path)?;
    read_transactions(BufReader::new(file))
}

/// Converts a one-hot matrix into transactions: row `i` holds every column
/// index whose cell is non-zero.
pub fn transactions_from_matrix(matrix: ArrayView2<i32>) -> Result<Vec<Vec<Item>>> {
    let num_items = matrix.ncols();
    if num_items > 0 {
        Item::try_from(num_items - 1).map_err(|_| {
            MiningError::invalid(format!("{num_items} columns exceed the item identifier range"))
        })?;
    }

    Ok(matrix
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != 0)
                .map(|(column, _)| column as Item)
                .collect()
        })
        .collect())
}
