use super::{Bar, BarChart, BarStyle, Layout, Title};
use crate::color::{parse_hex, GLOBAL_ORANGE, US_BLUE};
use crate::data::filter::{sort_ascending, RowFilter};
use crate::data::model::{Dataset, REGION_GLOBAL, REGION_US};
use crate::error::Result;

/// Shortened industry names for the US charts. Anything not listed keeps its name.
const DISPLAY_NAMES: [(&str, &str); 10] = [
    ("Tech & IT", "Tech & IT"),
    ("Publishing", "Publishing"),
    ("Data Processing", "Data Processing"),
    ("Insurance Carriers", "Insurance"),
    ("Securities & Futures", "Securities"),
    ("Funds & Trusts", "Financial Funds"),
    ("Management Companies", "Management"),
    ("Federal Reserve Banks", "Banking"),
    ("Broadcasting & Telecom", "Telecom"),
    ("Professional Services", "Prof. Services"),
];

pub fn display_name(industry: &str) -> &str {
    DISPLAY_NAMES
        .iter()
        .find(|(full, _)| *full == industry)
        .map(|(_, short)| *short)
        .unwrap_or(industry)
}

/// What differs between the US and the Global industry charts.
struct IndustrySpec {
    region: &'static str,
    rename: bool,
    unit: &'static str,
    x_label: &'static str,
    color: &'static str,
    value_offset: f64,
    single_title: &'static str,
    grid_title: &'static str,
}

const US_SPEC: IndustrySpec = IndustrySpec {
    region: REGION_US,
    rename: true,
    unit: "pp",
    x_label: "Percentage Points Increase",
    color: US_BLUE,
    value_offset: 0.5,
    single_title: "US Industries: Remote Work Growth (2019-2022)",
    grid_title: "US Industries: Remote Work Growth\n(2019-2022)",
};

const GLOBAL_SPEC: IndustrySpec = IndustrySpec {
    region: REGION_GLOBAL,
    rename: false,
    unit: "%",
    x_label: "Growth Rate (%)",
    color: GLOBAL_ORANGE,
    value_offset: 1.0,
    single_title: "Global Industries: Notable Industries for Remote Job Growth (2024-2025)",
    grid_title: "Global Industries: Remote Job Growth\n(2024-2025)",
};

/// US industries, smallest growth at the bottom, values in percentage points.
pub fn us_industries(dataset: &Dataset, layout: Layout) -> Result<BarChart> {
    industry_chart(dataset, &US_SPEC, layout)
}

/// Worldwide industries, smallest growth at the bottom, values in percent.
pub fn global_industries(dataset: &Dataset, layout: Layout) -> Result<BarChart> {
    industry_chart(dataset, &GLOBAL_SPEC, layout)
}

fn industry_chart(dataset: &Dataset, spec: &IndustrySpec, layout: Layout) -> Result<BarChart> {
    let color = parse_hex(spec.color)?;

    let mut rows = RowFilter::new().region(spec.region).apply(dataset);
    sort_ascending(&mut rows);

    let bars: Vec<Bar> = rows
        .into_iter()
        .map(|r| {
            let label = if spec.rename {
                display_name(&r.industry)
            } else {
                r.industry.as_str()
            };
            Bar {
                label: label.to_string(),
                value: r.value,
                value_label: format!("{:.1}{}", r.value, spec.unit),
                color,
            }
        })
        .collect();
    log::debug!("{} industries: {} bars", spec.region, bars.len());

    let (title, style) = match layout {
        Layout::Single => (
            Title::new(spec.single_title, 20.0),
            BarStyle {
                tick_pt: 14.0,
                axis_pt: 16.0,
                value_pt: 14.0,
                bar_height: 0.8,
                alpha: 0.8,
                light_value_labels: true,
                value_offset: spec.value_offset,
            },
        ),
        Layout::Grid => (
            Title::new(spec.grid_title, 14.0),
            BarStyle {
                tick_pt: 12.0,
                axis_pt: 12.0,
                value_pt: 12.0,
                bar_height: 0.8,
                alpha: 1.0,
                light_value_labels: false,
                value_offset: spec.value_offset,
            },
        ),
    };

    Ok(BarChart {
        title,
        x_label: spec.x_label.to_string(),
        bars,
        style,
        legend: None,
        figure_in: (12.0, 8.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn example() -> Dataset {
        Dataset::from_records(vec![
            Record::new("US", "United States", "Tech & IT", 20.0),
            Record::new("US", "United States", "Publishing", 15.0),
            Record::new("Global", "Global", "Healthcare", 30.0),
        ])
    }

    #[test]
    fn us_chart_sorted_ascending_with_pp_labels() {
        let chart = us_industries(&example(), Layout::Single).unwrap();
        assert_eq!(chart.labels(), ["Publishing", "Tech & IT"]);
        assert_eq!(chart.values(), [15.0, 20.0]);
        let value_labels: Vec<_> = chart.bars.iter().map(|b| b.value_label.as_str()).collect();
        assert_eq!(value_labels, ["15.0pp", "20.0pp"]);
    }

    #[test]
    fn global_chart_uses_percent_labels() {
        let chart = global_industries(&example(), Layout::Single).unwrap();
        assert_eq!(chart.labels(), ["Healthcare"]);
        assert_eq!(chart.bars[0].value_label, "30.0%");
        assert_eq!(chart.bars[0].color, parse_hex(GLOBAL_ORANGE).unwrap());
    }

    #[test]
    fn us_names_are_shortened() {
        let ds = Dataset::from_records(vec![
            Record::new("US", "United States", "Federal Reserve Banks", 9.0),
            Record::new("US", "United States", "Mining", 3.0),
        ]);
        let chart = us_industries(&ds, Layout::Grid).unwrap();
        assert_eq!(chart.labels(), ["Mining", "Banking"]);
    }

    #[test]
    fn global_names_are_not_shortened() {
        let ds = Dataset::from_records(vec![Record::new(
            "Global",
            "Global",
            "Insurance Carriers",
            9.0,
        )]);
        let chart = global_industries(&ds, Layout::Single).unwrap();
        assert_eq!(chart.labels(), ["Insurance Carriers"]);
    }

    #[test]
    fn bars_never_decrease() {
        let ds = Dataset::from_records(
            [7.5, 3.0, 12.0, 3.0, 9.9, 0.5]
                .iter()
                .enumerate()
                .map(|(i, v)| Record::new("US", "United States", &format!("I{i}"), *v))
                .collect(),
        );
        let values = us_industries(&ds, Layout::Single).unwrap().values();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty_region_gives_empty_chart() {
        let ds = Dataset::from_records(vec![Record::new("Asia", "Japan", "All Industries", 4.0)]);
        assert!(us_industries(&ds, Layout::Single).unwrap().bars.is_empty());
    }

    #[test]
    fn layouts_differ_only_in_style() {
        let single = us_industries(&example(), Layout::Single).unwrap();
        let grid = us_industries(&example(), Layout::Grid).unwrap();
        assert_eq!(single.bars, grid.bars);
        assert!(single.style.light_value_labels);
        assert!(!grid.style.light_value_labels);
        assert_eq!(grid.title.lines().count(), 2);
    }
}
