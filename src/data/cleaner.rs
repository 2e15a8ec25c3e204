//! Data Cleaner Module
//! Row-level cleanup and dataset review over the loaded table.

use std::collections::HashSet;

use tracing::info;

use crate::data::TransactionTable;

/// Descriptive review of a loaded table, in the spirit of an initial
/// `describe()` pass over the raw file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub missing_postcode: usize,
    pub duplicate_ids: usize,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub mean_price: Option<f64>,
}

impl TransactionTable {
    /// Remove every record whose postcode is empty or whitespace. Returns
    /// the number of removed rows. Idempotent; the schema is untouched.
    pub fn drop_missing_postcodes(&mut self) -> usize {
        let before = self.len();
        self.retain(|tx| tx.has_postcode());
        before - self.len()
    }

    pub fn summary(&self) -> TableSummary {
        let mut summary = TableSummary {
            rows: self.len(),
            ..TableSummary::default()
        };

        let mut seen_ids: HashSet<&str> = HashSet::with_capacity(self.len());
        let mut price_sum = 0i64;
        let mut priced = 0usize;

        for tx in self.records() {
            if !tx.has_postcode() {
                summary.missing_postcode += 1;
            }
            if !seen_ids.insert(tx.transaction_id.as_str()) {
                summary.duplicate_ids += 1;
            }
            if let Some(price) = tx.price {
                price_sum += price;
                priced += 1;
                summary.min_price = Some(summary.min_price.map_or(price, |m| m.min(price)));
                summary.max_price = Some(summary.max_price.map_or(price, |m| m.max(price)));
            }
        }

        if priced > 0 {
            summary.mean_price = Some(price_sum as f64 / priced as f64);
        }
        summary
    }
}

/// Flag-controlled form of the cleanup stage: when `drop_missing` is false
/// the table passes through unchanged.
pub fn clean(table: &mut TransactionTable, drop_missing: bool) -> usize {
    if !drop_missing {
        return 0;
    }
    let removed = table.drop_missing_postcodes();
    info!(removed, rows = table.len(), "dropped transactions without postcode");
    removed
}
