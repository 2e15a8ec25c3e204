//! Geo Enricher Module
//! Attaches postcode centroids to every transaction and writes the
//! 18-column enriched table back out in the input's delimited format.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::data::TransactionTable;
use crate::geo::{GeoError, PostcodeIndex};

/// Hit/miss tally of one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub resolved: usize,
    pub missed: usize,
}

pub struct GeoEnricher {
    index: PostcodeIndex,
}

impl GeoEnricher {
    pub fn new(index: PostcodeIndex) -> Self {
        Self { index }
    }

    /// Fill in coordinates for every record. A lookup miss (unknown,
    /// malformed or empty postcode) leaves that record's coordinates unset
    /// and never aborts the pass.
    pub fn enrich(&self, table: &mut TransactionTable) -> EnrichStats {
        let mut stats = EnrichStats::default();
        for tx in table.records_mut() {
            tx.coordinates = self.index.lookup(&tx.postcode);
            match tx.coordinates {
                Some(coords) => {
                    stats.resolved += 1;
                    debug!(
                        postcode = %tx.postcode,
                        lat = coords.latitude,
                        lon = coords.longitude,
                        "resolved postcode"
                    );
                }
                None => stats.missed += 1,
            }
        }
        info!(
            resolved = stats.resolved,
            missed = stats.missed,
            "enriched transactions with coordinates"
        );
        stats
    }

    /// Enrich the table, then write all 18 columns to `path` (headerless,
    /// comma-delimited, empty cells for unresolved coordinates). Overwrites
    /// any existing file at the destination.
    pub fn enrich_to_path(
        &self,
        table: &mut TransactionTable,
        path: impl AsRef<Path>,
    ) -> Result<EnrichStats, GeoError> {
        let path = path.as_ref();
        let stats = self.enrich(table);

        let file = File::create(path).map_err(|source| GeoError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        for tx in table.records() {
            writer.write_record(tx.enriched_wire_fields())?;
        }
        writer.flush().map_err(|source| GeoError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

        info!(rows = table.len(), path = %path.display(), "wrote enriched table");
        Ok(stats)
    }
}
