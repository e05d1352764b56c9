//! Remote-work growth charts.
//!
//! Loads a small table of growth figures by region, country and industry and renders
//! two industry bar charts, a combined sector summary and a world map, either as four
//! PNG files or as one 2x2 figure.

pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod render;

pub use error::{ChartError, Result};
