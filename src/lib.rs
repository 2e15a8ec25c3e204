//! Landviz - HM Land Registry Price Paid Data analysis
//!
//! A pipeline for exploring the published price paid dataset: load a
//! headerless CSV extract into a typed table, drop transactions without a
//! postcode, attach approximate coordinates from a local postcode reference
//! and render descriptive charts.

pub mod charts;
pub mod data;
pub mod geo;
pub mod reports;
