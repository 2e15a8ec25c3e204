//! Geo module - postcode centroid lookup and coordinate enrichment

mod enricher;
mod postcodes;

use std::path::PathBuf;

use thiserror::Error;

pub use enricher::{EnrichStats, GeoEnricher};
pub use postcodes::{Coordinates, PostcodeIndex};

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("failed to read postcode reference {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write enriched output {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
