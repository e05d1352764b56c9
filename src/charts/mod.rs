//! Chart models.
//!
//! Each builder turns the read-only [`Dataset`](crate::data::model::Dataset) into a plain
//! description of what to draw (bars or markers, labels, colours, font sizes). Drawing
//! happens in [`crate::render`], so everything here is deterministic and testable
//! without a canvas.

pub mod industries;
pub mod summary;
pub mod world_map;

use palette::Srgb;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// How the four charts are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Four separate figures, one file each.
    #[default]
    Single,
    /// One 2x2 composite figure.
    Grid,
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Marker shape drawn next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendSymbol {
    Patch,
    Dot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Srgb<u8>,
    pub symbol: LegendSymbol,
}

/// Corner a legend box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub corner: LegendCorner,
    pub font_pt: f64,
    pub entries: Vec<LegendEntry>,
}

/// Chart title; `\n` separates lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    pub font_pt: f64,
}

impl Title {
    pub fn new(text: &str, font_pt: f64) -> Self {
        Title {
            text: text.to_string(),
            font_pt,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

// ---------------------------------------------------------------------------
// Horizontal bar charts
// ---------------------------------------------------------------------------

/// One horizontal bar. Bars are listed bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text drawn just inside the end of the bar.
    pub value_label: String,
    pub color: Srgb<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    pub tick_pt: f64,
    pub axis_pt: f64,
    pub value_pt: f64,
    /// Fraction of a row the bar occupies.
    pub bar_height: f64,
    pub alpha: f64,
    /// Value labels are white inside the bar when set, dark otherwise.
    pub light_value_labels: bool,
    /// Distance (in data units) between the bar end and its value label.
    pub value_offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: Title,
    pub x_label: String,
    pub bars: Vec<Bar>,
    pub style: BarStyle,
    pub legend: Option<Legend>,
    /// Figure size in inches when rendered on its own.
    pub figure_in: (f64, f64),
}

impl BarChart {
    pub fn values(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.value).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// World map
// ---------------------------------------------------------------------------

/// A scaled circle at a fixed longitude/latitude with a boxed label below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub country: String,
    pub lon: f64,
    pub lat: f64,
    pub value: f64,
    /// Marker area in points², as matplotlib's scatter `s`.
    pub area_pt2: f64,
    pub color: Srgb<u8>,
    /// Label text; `\n` separates lines.
    pub label: String,
    pub label_pt: f64,
    /// Latitude offset of the label's top edge from the marker.
    pub label_offset_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapChart {
    pub title: Title,
    pub markers: Vec<Marker>,
    pub legend: Legend,
    /// Keep the 2:1 plate carrée aspect instead of stretching to the panel.
    pub keep_aspect: bool,
    pub marker_edge_pt: f64,
    pub figure_in: (f64, f64),
}

// ---------------------------------------------------------------------------
// Anything renderable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bars(BarChart),
    Map(MapChart),
}

impl Chart {
    pub fn figure_in(&self) -> (f64, f64) {
        match self {
            Chart::Bars(c) => c.figure_in,
            Chart::Map(c) => c.figure_in,
        }
    }
}

/// The 2x2 composite figure: panels in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFigure {
    pub title: Title,
    pub subtitle: Title,
    pub panels: [Chart; 4],
    pub figure_in: (f64, f64),
}
