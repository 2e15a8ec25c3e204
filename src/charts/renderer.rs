//! Static Chart Renderer
//! Renders the report data to PNG files: donut-style pies, vertical and
//! horizontal bars, and a two-ring sunburst for the location hierarchy.

use std::path::Path;

use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::charts::{ChartError, PALETTE};
use crate::reports::{CategoryCount, CategoryShare, LocationHierarchy};

fn backend_err<E: std::fmt::Display>(path: &Path, err: E) -> ChartError {
    ChartError::Backend {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Pie chart of category shares. Slices are labeled with the category label;
/// percentages are drawn inside the slices.
pub fn render_pie_chart(
    shares: &[CategoryShare],
    title: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| backend_err(path, e))?;
    let root = root
        .titled(title, ("sans-serif", 30))
        .map_err(|e| backend_err(path, e))?;

    let (w, h) = root.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = f64::from(w.min(h)) / 2.0 - 60.0;

    let sizes: Vec<f64> = shares.iter().map(|s| s.count as f64).collect();
    let labels: Vec<String> = shares.iter().map(|s| s.label.clone()).collect();
    let colors: Vec<RGBColor> = (0..shares.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    pie.percentages(
        ("sans-serif", (radius * 0.06).max(14.0))
            .into_font()
            .color(&BLACK),
    );
    root.draw(&pie).map_err(|e| backend_err(path, e))?;
    root.present().map_err(|e| backend_err(path, e))
}

/// Vertical bar chart of absolute counts, one bar per category.
pub fn render_bar_chart(
    counts: &[CategoryCount],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| backend_err(path, e))?;

    let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as i32;
    let y_max = max + max / 5 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0..counts.len() as i32).into_segmented(), 0..y_max)
        .map_err(|e| backend_err(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(counts.len().max(1))
        .x_label_formatter(&|seg| segment_label(seg, counts))
        .draw()
        .map_err(|e| backend_err(path, e))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(PALETTE[4].filled())
                .margin(10)
                .data(
                    counts
                        .iter()
                        .enumerate()
                        .map(|(i, c)| (i as i32, c.count as i32)),
                ),
        )
        .map_err(|e| backend_err(path, e))?;

    root.present().map_err(|e| backend_err(path, e))
}

/// Horizontal bar chart for ranked category counts, category names on the
/// y axis.
pub fn render_ranked_bar_chart(
    counts: &[CategoryCount],
    title: &str,
    value_desc: &str,
    category_desc: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| backend_err(path, e))?;

    let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as i32;
    let x_max = max + max / 5 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(180)
        .build_cartesian_2d(0..x_max, (0..counts.len() as i32).into_segmented())
        .map_err(|e| backend_err(path, e))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(value_desc)
        .y_desc(category_desc)
        .y_labels(counts.len().max(1))
        .y_label_formatter(&|seg| segment_label(seg, counts))
        .draw()
        .map_err(|e| backend_err(path, e))?;

    chart
        .draw_series(
            Histogram::horizontal(&chart)
                .style(PALETTE[6].filled())
                .margin(6)
                .data(
                    counts
                        .iter()
                        .enumerate()
                        .map(|(i, c)| (i as i32, c.count as i32)),
                ),
        )
        .map_err(|e| backend_err(path, e))?;

    root.present().map_err(|e| backend_err(path, e))
}

/// Sunburst of the county → town hierarchy: counties on the inner ring,
/// their towns on the outer ring, angular spans proportional to transaction
/// counts. Towns share their county's hue at reduced opacity.
pub fn render_sunburst(
    hierarchy: &LocationHierarchy,
    title: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| backend_err(path, e))?;
    let root = root
        .titled(title, ("sans-serif", 30))
        .map_err(|e| backend_err(path, e))?;

    let (w, h) = root.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let max_r = f64::from(w.min(h)) / 2.0 - 20.0;
    // hole, county ring, town ring
    let rings = [(max_r * 0.22, max_r * 0.60), (max_r * 0.60, max_r * 0.98)];

    for sector in layout_sectors(hierarchy) {
        let (r_inner, r_outer) = rings[usize::from(sector.depth)];
        let color = PALETTE[sector.palette_idx % PALETTE.len()];
        let style = if sector.depth == 0 {
            color.mix(0.9).filled()
        } else {
            color.mix(0.55).filled()
        };

        let pts = annular_sector(center, r_inner, r_outer, sector.start_deg, sector.sweep_deg);
        root.draw(&Polygon::new(pts.clone(), style))
            .map_err(|e| backend_err(path, e))?;
        root.draw(&PathElement::new(pts, WHITE.stroke_width(1)))
            .map_err(|e| backend_err(path, e))?;

        // only label sectors wide enough to carry text
        if sector.sweep_deg >= 10.0 {
            let mid_deg = sector.start_deg + sector.sweep_deg / 2.0;
            let mid_r = (r_inner + r_outer) / 2.0;
            let (x, y) = polar(center, mid_r, mid_deg);
            let size = if sector.depth == 0 { 16 } else { 13 };
            let style = TextStyle::from(("sans-serif", size).into_font())
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(sector.label.clone(), (x, y), style))
                .map_err(|e| backend_err(path, e))?;
        }
    }

    root.present().map_err(|e| backend_err(path, e))
}

fn segment_label(seg: &SegmentValue<i32>, counts: &[CategoryCount]) -> String {
    match seg {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => counts
            .get(*i as usize)
            .map(|c| c.label.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sector {
    pub label: String,
    /// 0 = county ring, 1 = town ring.
    pub depth: u8,
    pub palette_idx: usize,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

/// Angular layout of the sunburst: the full circle is divided among
/// counties by transaction count, and each county's span among its towns.
/// Starts at 12 o'clock and proceeds clockwise.
pub(crate) fn layout_sectors(hierarchy: &LocationHierarchy) -> Vec<Sector> {
    let total = hierarchy.total as f64;
    let mut sectors = Vec::new();
    if total == 0.0 {
        return sectors;
    }

    let mut county_start = -90.0;
    for (ci, county) in hierarchy.counties.iter().enumerate() {
        let county_sweep = 360.0 * county.total as f64 / total;
        sectors.push(Sector {
            label: county.name.clone(),
            depth: 0,
            palette_idx: ci,
            start_deg: county_start,
            sweep_deg: county_sweep,
        });

        let mut town_start = county_start;
        for town in &county.towns {
            let town_sweep = 360.0 * town.count as f64 / total;
            sectors.push(Sector {
                label: town.label.clone(),
                depth: 1,
                palette_idx: ci,
                start_deg: town_start,
                sweep_deg: town_sweep,
            });
            town_start += town_sweep;
        }

        county_start += county_sweep;
    }
    sectors
}

fn annular_sector(
    center: (i32, i32),
    r_inner: f64,
    r_outer: f64,
    start_deg: f64,
    sweep_deg: f64,
) -> Vec<(i32, i32)> {
    let steps = (sweep_deg.abs().ceil() as usize).max(2);
    let mut pts = Vec::with_capacity(2 * steps + 2);
    for k in 0..=steps {
        let deg = start_deg + sweep_deg * k as f64 / steps as f64;
        pts.push(polar(center, r_outer, deg));
    }
    for k in (0..=steps).rev() {
        let deg = start_deg + sweep_deg * k as f64 / steps as f64;
        pts.push(polar(center, r_inner, deg));
    }
    pts
}

fn polar(center: (i32, i32), r: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        center.0 + (r * rad.cos()).round() as i32,
        center.1 + (r * rad.sin()).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{CategoryCount, CountyNode};

    fn hierarchy() -> LocationHierarchy {
        LocationHierarchy {
            total: 8,
            counties: vec![
                CountyNode {
                    name: "WEST YORKSHIRE".into(),
                    total: 6,
                    towns: vec![
                        CategoryCount {
                            label: "LEEDS".into(),
                            count: 4,
                        },
                        CategoryCount {
                            label: "BRADFORD".into(),
                            count: 2,
                        },
                    ],
                },
                CountyNode {
                    name: "SOMERSET".into(),
                    total: 2,
                    towns: vec![CategoryCount {
                        label: "BATH".into(),
                        count: 2,
                    }],
                },
            ],
        }
    }

    #[test]
    fn county_sweeps_cover_the_circle() {
        let sectors = layout_sectors(&hierarchy());
        let sum: f64 = sectors
            .iter()
            .filter(|s| s.depth == 0)
            .map(|s| s.sweep_deg)
            .sum();
        assert!((sum - 360.0).abs() < 1e-9);
    }

    #[test]
    fn town_sweeps_fill_their_county() {
        let sectors = layout_sectors(&hierarchy());
        let county = sectors.iter().find(|s| s.label == "WEST YORKSHIRE").unwrap();
        let towns: f64 = sectors
            .iter()
            .filter(|s| s.depth == 1 && s.palette_idx == county.palette_idx)
            .map(|s| s.sweep_deg)
            .sum();
        assert!((towns - county.sweep_deg).abs() < 1e-9);

        // towns start where their county starts and tile without gaps
        let leeds = sectors.iter().find(|s| s.label == "LEEDS").unwrap();
        let bradford = sectors.iter().find(|s| s.label == "BRADFORD").unwrap();
        assert!((leeds.start_deg - county.start_deg).abs() < 1e-9);
        assert!((bradford.start_deg - (leeds.start_deg + leeds.sweep_deg)).abs() < 1e-9);
    }

    #[test]
    fn empty_hierarchy_lays_out_nothing() {
        let empty = LocationHierarchy {
            total: 0,
            counties: Vec::new(),
        };
        assert!(layout_sectors(&empty).is_empty());
    }
}
