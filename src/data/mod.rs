//! Data module - transaction records, loading and cleanup

mod cleaner;
mod loader;
mod record;

pub use cleaner::{clean, TableSummary};
pub use loader::{load_transactions, LoaderError};
pub use record::{
    PpdCategory, PropertyType, RecordStatus, Tenure, Transaction, TransactionTable, COLUMNS,
    ENRICHED_COLUMNS,
};
