//! Landviz - HM Land Registry Price Paid Data analysis
//!
//! Runs the full pipeline over a price paid extract: load, review, drop
//! rows without a postcode, attach postcode centroids (writing the enriched
//! table out) and render the descriptive charts.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use landviz::charts;
use landviz::data::{self, load_transactions};
use landviz::geo::{GeoEnricher, PostcodeIndex};
use landviz::reports;

const RANK_SIZE: usize = 20;

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // positional arguments with defaults: input extract, postcode
    // reference, output directory
    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "datasets/pp-2024.csv".into()));
    let reference = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "datasets/gb-postcodes.csv".into()),
    );
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "charts".into()));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut table = load_transactions(&input)?;
    let summary = table.summary();
    info!(
        rows = summary.rows,
        missing_postcode = summary.missing_postcode,
        duplicate_ids = summary.duplicate_ids,
        min_price = summary.min_price,
        max_price = summary.max_price,
        mean_price = summary.mean_price,
        "dataset review"
    );

    data::clean(&mut table, true);

    let index = PostcodeIndex::from_csv_path(&reference)?;
    let enricher = GeoEnricher::new(index);
    enricher.enrich_to_path(&mut table, out_dir.join("enriched.csv"))?;

    charts::render_pie_chart(
        &reports::property_type_shares(&table)?,
        "Type of properties sold",
        &out_dir.join("type_sold.png"),
    )?;
    charts::render_pie_chart(
        &reports::county_shares(&table)?,
        "Properties sold per location",
        &out_dir.join("sold_location.png"),
    )?;
    charts::render_bar_chart(
        &reports::sales_per_type(&table)?,
        "Number of sales per category",
        "Terraced/Semi-Detached/Detached/Flat/Other",
        "Number of Sales",
        &out_dir.join("sales_per_category.png"),
    )?;
    charts::render_ranked_bar_chart(
        &reports::top_towns(&table, RANK_SIZE)?,
        "Top 20 Cities and Towns by Number of Sales",
        "Number of Sales",
        "City/Town",
        &out_dir.join("top20_city.png"),
    )?;
    charts::render_ranked_bar_chart(
        &reports::bottom_towns(&table, RANK_SIZE)?,
        "Bottom 20 Cities and Towns by Number of Sales",
        "Number of Sales",
        "City/Town",
        &out_dir.join("bottom20_cities.png"),
    )?;
    charts::render_ranked_bar_chart(
        &reports::top_counties(&table, RANK_SIZE)?,
        "Top 20 Counties by Number of Sales",
        "Number of Sales",
        "County",
        &out_dir.join("top20_county.png"),
    )?;
    charts::render_ranked_bar_chart(
        &reports::bottom_counties(&table, RANK_SIZE)?,
        "Bottom 20 Counties by Number of Sales",
        "Number of Sales",
        "County",
        &out_dir.join("bottom20_county.png"),
    )?;
    charts::render_sunburst(
        &reports::location_hierarchy(&table)?,
        "Where did transactions take place?",
        &out_dir.join("location_burst.png"),
    )?;

    info!(dir = %out_dir.display(), "charts written");
    Ok(())
}
