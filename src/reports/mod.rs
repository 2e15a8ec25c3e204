//! Reports module - read-only aggregations over the transaction table
//!
//! Every operation here takes the table by reference and never mutates it;
//! the only error path is an empty dataset.

mod counts;
mod hierarchy;

use thiserror::Error;

use crate::data::TransactionTable;

pub use counts::{
    bottom_counties, bottom_towns, county_shares, grouped_counts, property_type_shares,
    ranked_counts, sales_per_type, top_counties, top_towns, CategoryCount, CategoryShare,
    RankOrder,
};
pub use hierarchy::{location_hierarchy, CountyNode, LocationHierarchy};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("dataset has no rows")]
    EmptyDataset,
}

pub(crate) fn ensure_rows(table: &TransactionTable) -> Result<usize, ReportError> {
    if table.is_empty() {
        Err(ReportError::EmptyDataset)
    } else {
        Ok(table.len())
    }
}
