//! Category Counting Module
//! Grouping, share and top/bottom-N ranking over single columns.

use std::collections::HashMap;

use crate::data::TransactionTable;
use crate::reports::{ensure_rows, ReportError};

/// Absolute occurrence count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Occurrence count plus its percentage of the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Ranking direction for `ranked_counts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Top,
    Bottom,
}

/// Count occurrences of each label, preserving first-seen order.
pub fn grouped_counts<'a, I>(labels: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for label in labels {
        match index.get(label) {
            Some(&at) => order[at].count += 1,
            None => {
                index.insert(label.to_string(), order.len());
                order.push(CategoryCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    order
}

/// Sort counts by rank direction and keep the first `n`. The sort is stable
/// and compares counts only, so equal counts keep their first-seen order.
pub fn ranked_counts(mut counts: Vec<CategoryCount>, n: usize, order: RankOrder) -> Vec<CategoryCount> {
    match order {
        RankOrder::Top => counts.sort_by(|a, b| b.count.cmp(&a.count)),
        RankOrder::Bottom => counts.sort_by(|a, b| a.count.cmp(&b.count)),
    }
    counts.truncate(n);
    counts
}

fn to_shares(counts: Vec<CategoryCount>, total: usize) -> Vec<CategoryShare> {
    counts
        .into_iter()
        .map(|c| CategoryShare {
            percent: c.count as f64 * 100.0 / total as f64,
            label: c.label,
            count: c.count,
        })
        .collect()
}

/// Share of each property type, largest first. Labels are the dataset's
/// single-letter type codes.
pub fn property_type_shares(table: &TransactionTable) -> Result<Vec<CategoryShare>, ReportError> {
    let total = ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.property_type.code()));
    Ok(to_shares(ranked_counts(counts, usize::MAX, RankOrder::Top), total))
}

/// Share of each county, largest first.
pub fn county_shares(table: &TransactionTable) -> Result<Vec<CategoryShare>, ReportError> {
    let total = ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.county.as_str()));
    Ok(to_shares(ranked_counts(counts, usize::MAX, RankOrder::Top), total))
}

/// Absolute sales per property type, largest first.
pub fn sales_per_type(table: &TransactionTable) -> Result<Vec<CategoryCount>, ReportError> {
    ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.property_type.code()));
    Ok(ranked_counts(counts, usize::MAX, RankOrder::Top))
}

pub fn top_towns(table: &TransactionTable, n: usize) -> Result<Vec<CategoryCount>, ReportError> {
    ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.town_city.as_str()));
    Ok(ranked_counts(counts, n, RankOrder::Top))
}

pub fn bottom_towns(table: &TransactionTable, n: usize) -> Result<Vec<CategoryCount>, ReportError> {
    ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.town_city.as_str()));
    Ok(ranked_counts(counts, n, RankOrder::Bottom))
}

pub fn top_counties(table: &TransactionTable, n: usize) -> Result<Vec<CategoryCount>, ReportError> {
    ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.county.as_str()));
    Ok(ranked_counts(counts, n, RankOrder::Top))
}

pub fn bottom_counties(
    table: &TransactionTable,
    n: usize,
) -> Result<Vec<CategoryCount>, ReportError> {
    ensure_rows(table)?;
    let counts = grouped_counts(table.records().iter().map(|tx| tx.county.as_str()));
    Ok(ranked_counts(counts, n, RankOrder::Bottom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::transaction;
    use crate::data::{PropertyType, TransactionTable};

    fn table_with_types(types: &[PropertyType]) -> TransactionTable {
        TransactionTable::new(
            types
                .iter()
                .map(|&pt| transaction(pt, "LONDON", "GREATER LONDON"))
                .collect(),
        )
    }

    fn table_with_towns(towns: &[&str]) -> TransactionTable {
        TransactionTable::new(
            towns
                .iter()
                .map(|town| transaction(PropertyType::Flat, town, "GREATER LONDON"))
                .collect(),
        )
    }

    #[test]
    fn type_shares_for_a_known_mix() {
        use PropertyType::*;
        let table = table_with_types(&[Terraced, Terraced, SemiDetached, Detached, Flat]);
        let shares = property_type_shares(&table).unwrap();

        assert_eq!(shares[0].label, "T");
        assert_eq!(shares[0].count, 2);
        assert!((shares[0].percent - 40.0).abs() < 1e-9);
        for share in &shares[1..] {
            assert_eq!(share.count, 1);
            assert!((share.percent - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let table = table_with_towns(&["LEEDS", "YORK", "LEEDS", "BATH", "YORK", "YORK", "HULL"]);
        let total: f64 = county_shares(&table)
            .unwrap()
            .iter()
            .chain(property_type_shares(&table).unwrap().iter())
            .map(|s| s.percent)
            .sum();
        // two reports, each summing to 100
        assert!((total - 200.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = TransactionTable::default();
        assert_eq!(
            property_type_shares(&table).unwrap_err(),
            ReportError::EmptyDataset
        );
        assert_eq!(top_towns(&table, 20).unwrap_err(), ReportError::EmptyDataset);
        assert_eq!(sales_per_type(&table).unwrap_err(), ReportError::EmptyDataset);
    }

    #[test]
    fn ranking_truncates_and_orders() {
        let table = table_with_towns(&["A", "B", "B", "C", "C", "C"]);
        let top = top_towns(&table, 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "C");
        assert_eq!(top[1].label, "B");

        let bottom = bottom_towns(&table, 2).unwrap();
        assert_eq!(bottom[0].label, "A");
        assert_eq!(bottom[1].label, "B");
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let counts = grouped_counts(["YORK", "BATH", "HULL", "BATH", "YORK", "HULL"]);
        let ranked = ranked_counts(counts, 3, RankOrder::Top);
        let labels: Vec<&str> = ranked.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["YORK", "BATH", "HULL"]);
    }

    #[test]
    fn top_and_bottom_report_consistent_counts() {
        let table = table_with_towns(&["A", "A", "B", "C", "C", "C", "D"]);
        let top = top_towns(&table, 10).unwrap();
        let bottom = bottom_towns(&table, 10).unwrap();
        for entry in &top {
            let twin = bottom.iter().find(|c| c.label == entry.label).unwrap();
            assert_eq!(twin.count, entry.count);
        }
    }
}
