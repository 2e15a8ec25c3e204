//! Charts module - static chart rendering

mod renderer;

use std::path::PathBuf;

use plotters::style::RGBColor;
use thiserror::Error;

pub use renderer::{render_bar_chart, render_pie_chart, render_ranked_bar_chart, render_sunburst};

/// Color palette cycled across categories.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render {path}: {message}")]
    Backend { path: PathBuf, message: String },
}
