use super::industries::display_name;
use super::{Bar, BarChart, BarStyle, Layout, Legend, LegendCorner, LegendEntry, LegendSymbol, Title};
use crate::color::{CategoryColors, ASIA_RED, GLOBAL_ORANGE, REGIONAL_PLUM, US_BLUE};
use crate::data::filter::{largest, RowFilter};
use crate::data::model::{
    Dataset, Record, ALL_INDUSTRIES, COUNTRY_GLOBAL, REGION_ASIA, REGION_GLOBAL, REGION_US,
};
use crate::error::Result;

/// How many US industries make it into the summary.
pub const US_TOP_N: usize = 5;

// ---------------------------------------------------------------------------
// Sector categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectorCategory {
    UsIndustries,
    GlobalGrowth,
    Regional,
    AsiaPolicy,
}

impl SectorCategory {
    /// Legend order.
    pub const ALL: [SectorCategory; 4] = [
        SectorCategory::UsIndustries,
        SectorCategory::GlobalGrowth,
        SectorCategory::Regional,
        SectorCategory::AsiaPolicy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectorCategory::UsIndustries => "US Industries",
            SectorCategory::GlobalGrowth => "Global Growth",
            SectorCategory::Regional => "Regional",
            SectorCategory::AsiaPolicy => "Asia Policy",
        }
    }

    fn hex(self) -> &'static str {
        match self {
            SectorCategory::UsIndustries => US_BLUE,
            SectorCategory::GlobalGrowth => GLOBAL_ORANGE,
            SectorCategory::Regional => REGIONAL_PLUM,
            SectorCategory::AsiaPolicy => ASIA_RED,
        }
    }

    /// Category of an "All Industries" row.
    pub fn for_aggregate(record: &Record) -> Self {
        if record.region == REGION_ASIA {
            SectorCategory::AsiaPolicy
        } else {
            SectorCategory::Regional
        }
    }

    pub fn palette() -> Result<CategoryColors> {
        CategoryColors::new(Self::ALL.iter().map(|c| (c.label(), c.hex())))
    }
}

// ---------------------------------------------------------------------------
// Summary rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SectorRow {
    pub sector: String,
    pub value: f64,
    pub category: SectorCategory,
}

/// Collect the summary rows, smallest value first.
///
/// Sources, in concatenation order:
/// 1. the top [`US_TOP_N`] US industries (shortened names)
/// 2. every Global-region industry
/// 3. every "All Industries" row except the worldwide one
pub fn sector_rows(dataset: &Dataset) -> Vec<SectorRow> {
    let us_top = largest(RowFilter::new().region(REGION_US).apply(dataset), US_TOP_N);
    let global = RowFilter::new().region(REGION_GLOBAL).apply(dataset);
    let aggregates = RowFilter::new()
        .industry(ALL_INDUSTRIES)
        .exclude_countries(&[COUNTRY_GLOBAL])
        .apply(dataset);

    let mut rows: Vec<SectorRow> = us_top
        .into_iter()
        .map(|r| SectorRow {
            sector: format!("{} (US)", display_name(&r.industry)),
            value: r.value,
            category: SectorCategory::UsIndustries,
        })
        .chain(global.into_iter().map(|r| SectorRow {
            sector: format!("{} (Global)", r.industry),
            value: r.value,
            category: SectorCategory::GlobalGrowth,
        }))
        .chain(aggregates.into_iter().map(|r| SectorRow {
            sector: format!("All Industries ({})", r.country),
            value: r.value,
            category: SectorCategory::for_aggregate(r),
        }))
        .collect();

    rows.sort_by(|a, b| a.value.total_cmp(&b.value));
    rows
}

/// "Top Remote Work Growth Sectors Worldwide", coloured by category.
pub fn top_growth_sectors(dataset: &Dataset, layout: Layout) -> Result<BarChart> {
    let palette = SectorCategory::palette()?;

    let bars = sector_rows(dataset)
        .into_iter()
        .map(|row| {
            Ok(Bar {
                value_label: format!("{:.1}", row.value),
                color: palette.color_for(row.category.label())?,
                label: row.sector,
                value: row.value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (tick_pt, axis_pt, legend_pt, title, alpha, light_value_labels) = match layout {
        Layout::Single => (14.0, 16.0, 14.0, 22.0, 0.8, true),
        Layout::Grid => (15.0, 15.0, 13.0, 18.0, 1.0, false),
    };

    let legend = Legend {
        corner: LegendCorner::LowerRight,
        font_pt: legend_pt,
        entries: palette
            .legend_entries()
            .into_iter()
            .map(|(label, color)| LegendEntry {
                label,
                color,
                symbol: LegendSymbol::Patch,
            })
            .collect(),
    };

    Ok(BarChart {
        title: Title::new("Top Remote Work Growth Sectors Worldwide", title),
        x_label: "Growth Rate (% or pp)".to_string(),
        bars,
        style: BarStyle {
            tick_pt,
            axis_pt,
            value_pt: 13.0,
            bar_height: 0.7,
            alpha,
            light_value_labels,
            value_offset: 1.0,
        },
        legend: Some(legend),
        figure_in: (16.0, 10.0),
    })
}
