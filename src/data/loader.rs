//! Transaction Loader Module
//! Reads a headerless price paid CSV extract into a typed table.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::{info, warn};

use crate::data::{Transaction, TransactionTable};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to open {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Load a price paid extract. The file has no header row; the 16-column
/// schema is assigned positionally. Rows that do not fit the schema at all
/// (wrong column count) are skipped with a warning; cell-level leniency is
/// handled by the record decoder.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<TransactionTable, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (idx, row) in reader.deserialize::<Transaction>().enumerate() {
        match row {
            Ok(tx) => records.push(tx),
            Err(err) if err.is_io_error() => return Err(LoaderError::Csv(err)),
            Err(err) => {
                skipped += 1;
                warn!(line = idx + 1, %err, "skipping row that does not fit the schema");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "rows dropped during load");
    }
    info!(rows = records.len(), path = %path.display(), "loaded transactions");
    Ok(TransactionTable::new(records))
}
