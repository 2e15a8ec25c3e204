//! Postcode Reference Module
//! Local outward-code centroid lookup standing in for a full geocoder.
//!
//! The reference file is a CSV with a header row of
//! `outward_code,latitude,longitude`. Centroids are keyed at outward-code
//! granularity ("SW1A" for "SW1A 1AA"), which matches the resolution of the
//! public postcode gazetteers this tool is meant to be fed with; entries for
//! full postcodes are also honored and win over the outward fallback.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{info, warn};

use crate::geo::GeoError;

/// Approximate WGS84 position of a postcode centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    outward_code: String,
    latitude: f64,
    longitude: f64,
}

/// In-memory postcode → centroid index.
#[derive(Debug, Clone, Default)]
pub struct PostcodeIndex {
    centroids: HashMap<String, Coordinates>,
}

impl PostcodeIndex {
    /// Load the reference CSV. Rows that fail to parse are skipped with a
    /// warning so one bad line cannot poison the whole reference.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, GeoError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GeoError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut centroids = HashMap::new();
        for (idx, row) in reader.deserialize::<ReferenceRow>().enumerate() {
            match row {
                Ok(row) => {
                    centroids.insert(
                        normalize(&row.outward_code),
                        Coordinates {
                            latitude: row.latitude,
                            longitude: row.longitude,
                        },
                    );
                }
                Err(err) => warn!(line = idx + 2, %err, "skipping unreadable reference row"),
            }
        }

        info!(entries = centroids.len(), path = %path.display(), "loaded postcode reference");
        Ok(Self { centroids })
    }

    /// Build an index from in-memory entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinates)>,
        S: AsRef<str>,
    {
        let centroids = entries
            .into_iter()
            .map(|(code, coords)| (normalize(code.as_ref()), coords))
            .collect();
        Self { centroids }
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Resolve a postcode to its centroid. Tries the full normalized code
    /// first, then the outward code. Unknown or empty postcodes yield `None`.
    pub fn lookup(&self, postcode: &str) -> Option<Coordinates> {
        let norm = normalize(postcode);
        if norm.is_empty() {
            return None;
        }
        if let Some(coords) = self.centroids.get(&norm) {
            return Some(*coords);
        }
        outward(&norm).and_then(|out| self.centroids.get(out).copied())
    }
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Outward part of a normalized postcode: the token before the space, or
/// everything except the trailing 3-character inward unit when the space is
/// missing.
fn outward(norm: &str) -> Option<&str> {
    if let Some((out, _)) = norm.split_once(' ') {
        return Some(out);
    }
    if norm.len() > 3 {
        Some(&norm[..norm.len() - 3])
    } else {
        None
    }
}
