use super::{Layout, Legend, LegendCorner, LegendEntry, LegendSymbol, MapChart, Marker, Title};
use crate::color::{parse_hex, POLICY_AMBER, REGIONAL_PLUM, US_BLUE};
use crate::data::filter::{mean_value, RowFilter};
use crate::data::model::{
    Dataset, ALL_INDUSTRIES, COUNTRY_GLOBAL, REGION_ASIA, REGION_US,
};
use crate::error::Result;

/// Individual EU members; the EU aggregate stands in for them on the map.
pub const EXCLUDED_COUNTRIES: [&str; 2] = ["Sweden", "Ireland"];

/// Name of the synthetic marker built from the US industry average.
pub const UNITED_STATES: &str = "United States";

/// Marker positions as (longitude, latitude).
const COUNTRY_COORDS: [(&str, (f64, f64)); 7] = [
    ("Colombia", (-74.0, 4.6)),
    ("European Union", (10.0, 54.0)),
    ("Argentina", (-64.0, -34.0)),
    ("United States", (-98.0, 39.5)),
    ("Singapore", (103.8, 1.3)),
    ("Japan", (138.2, 36.2)),
    ("China", (104.2, 35.9)),
];

pub fn coordinates(country: &str) -> Option<(f64, f64)> {
    COUNTRY_COORDS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, lon_lat)| *lon_lat)
}

// ---------------------------------------------------------------------------
// Per-country figures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Percentage points.
    Points,
    Percent,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Points => "pp",
            Unit::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    RegionalGrowth,
    IndustryAverage,
    PolicySurvey,
}

impl MarkerKind {
    const ALL: [MarkerKind; 3] = [
        MarkerKind::RegionalGrowth,
        MarkerKind::IndustryAverage,
        MarkerKind::PolicySurvey,
    ];

    fn hex(self) -> &'static str {
        match self {
            MarkerKind::RegionalGrowth => REGIONAL_PLUM,
            MarkerKind::IndustryAverage => US_BLUE,
            MarkerKind::PolicySurvey => POLICY_AMBER,
        }
    }

    fn legend_label(self) -> &'static str {
        match self {
            MarkerKind::RegionalGrowth => "Regional Growth (pp)",
            MarkerKind::IndustryAverage => "US Industry Avg (pp)",
            MarkerKind::PolicySurvey => "Asia Policy Survey (%)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryFigure {
    pub country: String,
    pub value: f64,
    pub kind: MarkerKind,
    pub unit: Unit,
}

/// Country-level figures shown on the map, before coordinate lookup.
///
/// "All Industries" rows (minus the worldwide row and [`EXCLUDED_COUNTRIES`]) come
/// first in file order, followed by the US industry average when any US rows exist.
pub fn country_figures(dataset: &Dataset) -> Vec<CountryFigure> {
    let mut excluded = vec![COUNTRY_GLOBAL];
    excluded.extend(EXCLUDED_COUNTRIES);

    let mut figures: Vec<CountryFigure> = RowFilter::new()
        .industry(ALL_INDUSTRIES)
        .exclude_countries(&excluded)
        .apply(dataset)
        .into_iter()
        .map(|r| {
            let (kind, unit) = if r.region == REGION_ASIA {
                (MarkerKind::PolicySurvey, Unit::Percent)
            } else {
                (MarkerKind::RegionalGrowth, Unit::Points)
            };
            CountryFigure {
                country: r.country.clone(),
                value: r.value,
                kind,
                unit,
            }
        })
        .collect();

    let us_rows = RowFilter::new().region(REGION_US).apply(dataset);
    match mean_value(&us_rows) {
        Some(avg) => figures.push(CountryFigure {
            country: UNITED_STATES.to_string(),
            value: avg,
            kind: MarkerKind::IndustryAverage,
            unit: Unit::Points,
        }),
        None => log::warn!("No US rows; the US industry average marker is omitted"),
    }

    figures
}

/// Marker area in points², a clamped linear function of the value.
pub fn marker_area(value: f64, unit: Unit, layout: Layout) -> f64 {
    let (per_point, per_percent, lo, hi) = match layout {
        Layout::Single => (40.0, 35.0, 300.0, 3000.0),
        Layout::Grid => (30.0, 25.0, 200.0, 2000.0),
    };
    let k = match unit {
        Unit::Points => per_point,
        Unit::Percent => per_percent,
    };
    (value * k).clamp(lo, hi)
}

/// Label font size and latitude offset; large values get a bigger label.
fn label_metrics(value: f64, layout: Layout) -> (f64, f64) {
    let large = value > 50.0;
    match (layout, large) {
        (Layout::Single, true) => (16.0, -15.0),
        (Layout::Single, false) => (14.0, -12.0),
        (Layout::Grid, true) => (12.0, -12.0),
        (Layout::Grid, false) => (11.0, -10.0),
    }
}

/// World map with one scaled marker per known country.
pub fn world_map(dataset: &Dataset, layout: Layout) -> Result<MapChart> {
    let mut markers = Vec::new();
    for figure in country_figures(dataset) {
        let Some((lon, lat)) = coordinates(&figure.country) else {
            log::debug!("No coordinates for {}, skipping", figure.country);
            continue;
        };
        let (label_pt, label_offset_deg) = label_metrics(figure.value, layout);
        markers.push(Marker {
            lon,
            lat,
            value: figure.value,
            area_pt2: marker_area(figure.value, figure.unit, layout),
            color: parse_hex(figure.kind.hex())?,
            label: format!(
                "{}\n{:.1}{}",
                figure.country,
                figure.value,
                figure.unit.suffix()
            ),
            label_pt,
            label_offset_deg,
            country: figure.country,
        });
    }

    let entries = MarkerKind::ALL
        .iter()
        .map(|kind| {
            Ok(LegendEntry {
                label: kind.legend_label().to_string(),
                color: parse_hex(kind.hex())?,
                symbol: LegendSymbol::Dot,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (title, legend_pt, edge_pt) = match layout {
        Layout::Single => (Title::new("Global Remote Work Growth\n(2023-2024)", 22.0), 16.0, 2.0),
        Layout::Grid => (
            Title::new(
                "Global Remote Work Growth\n(Various Metrics & Time Periods)",
                14.0,
            ),
            12.0,
            1.5,
        ),
    };

    Ok(MapChart {
        title,
        markers,
        legend: Legend {
            corner: LegendCorner::LowerLeft,
            font_pt: legend_pt,
            entries,
        },
        keep_aspect: layout == Layout::Single,
        marker_edge_pt: edge_pt,
        figure_in: (16.0, 10.0),
    })
}
