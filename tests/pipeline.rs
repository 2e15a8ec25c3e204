//! End-to-end pipeline tests over temporary files: load a small extract,
//! clean it, enrich it against an in-memory postcode reference and check
//! the written output plus the reports derived from the same table.

use std::fs;
use std::io::Write;

use landviz::data::{load_transactions, COLUMNS, ENRICHED_COLUMNS};
use landviz::geo::{Coordinates, GeoEnricher, PostcodeIndex};
use landviz::reports;
use tempfile::NamedTempFile;

fn row(id: u32, postcode: &str, property_type: &str, town: &str, county: &str) -> String {
    format!(
        "\"{{{id:08}}}\",250000,2024-03-01 00:00,\"{postcode}\",{property_type},N,F,1,,HIGH STREET,,{town},{town},{county},A,A"
    )
}

fn write_extract(rows: &[String]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(tmp, "{row}").unwrap();
    }
    tmp
}

fn reference_index() -> PostcodeIndex {
    PostcodeIndex::from_entries([
        (
            "SW1A",
            Coordinates {
                latitude: 51.5010,
                longitude: -0.1416,
            },
        ),
        (
            "LS1",
            Coordinates {
                latitude: 53.7965,
                longitude: -1.5478,
            },
        ),
    ])
}

#[test]
fn load_clean_enrich_and_write() {
    let extract = write_extract(&[
        row(1, "SW1A 1AA", "T", "LONDON", "GREATER LONDON"),
        row(2, "", "S", "LEEDS", "WEST YORKSHIRE"),
        row(3, "LS1 4AP", "D", "LEEDS", "WEST YORKSHIRE"),
        row(4, "", "F", "BATH", "SOMERSET"),
        row(5, "ZZ99 9ZZ", "F", "BATH", "SOMERSET"),
    ]);

    let mut table = load_transactions(extract.path()).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(COLUMNS.len(), 16);

    // removal flag on: both empty-postcode rows go
    let removed = table.drop_missing_postcodes();
    assert_eq!(removed, 2);
    assert_eq!(table.len(), 3);

    let out = NamedTempFile::new().unwrap();
    let stats = GeoEnricher::new(reference_index())
        .enrich_to_path(&mut table, out.path())
        .unwrap();
    assert_eq!(stats.resolved, 2);
    assert_eq!(stats.missed, 1);

    // read the enriched file back: 18 columns, postcodes untouched,
    // unresolved rows have empty coordinate cells
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(fs::File::open(out.path()).unwrap());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    for (rec, tx) in rows.iter().zip(table.records()) {
        assert_eq!(rec.len(), ENRICHED_COLUMNS.len());
        assert_eq!(&rec[3], tx.postcode.as_str());
    }
    assert!(!rows[0][16].is_empty());
    assert!(!rows[1][16].is_empty());
    assert!(rows[2][16].is_empty() && rows[2][17].is_empty());
}

#[test]
fn reports_over_the_loaded_table() {
    let extract = write_extract(&[
        row(1, "LS1 4AP", "T", "LEEDS", "WEST YORKSHIRE"),
        row(2, "LS1 4AP", "T", "LEEDS", "WEST YORKSHIRE"),
        row(3, "LS1 4AP", "S", "BRADFORD", "WEST YORKSHIRE"),
        row(4, "SW1A 1AA", "D", "LONDON", "GREATER LONDON"),
        row(5, "SW1A 1AA", "F", "LONDON", "GREATER LONDON"),
    ]);
    let table = load_transactions(extract.path()).unwrap();

    let shares = reports::property_type_shares(&table).unwrap();
    assert_eq!(shares[0].label, "T");
    assert_eq!(shares[0].count, 2);
    assert!((shares[0].percent - 40.0).abs() < 1e-9);
    let percent_sum: f64 = shares.iter().map(|s| s.percent).sum();
    assert!((percent_sum - 100.0).abs() < 1e-9);

    let top = reports::top_towns(&table, 20).unwrap();
    let bottom = reports::bottom_towns(&table, 20).unwrap();
    assert!(top.len() <= 20 && bottom.len() <= 20);
    assert_eq!(top[0].label, "LEEDS");
    for entry in &top {
        let twin = bottom.iter().find(|c| c.label == entry.label).unwrap();
        assert_eq!(twin.count, entry.count);
    }

    let hierarchy = reports::location_hierarchy(&table).unwrap();
    assert_eq!(hierarchy.total, 5);
    assert_eq!(hierarchy.counties[0].name, "WEST YORKSHIRE");
    assert_eq!(hierarchy.counties[0].total, 3);
}
