use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use plotters_backend::DrawingBackend;

use super::{draw_legend, draw_title, font, rgb, Scale};
use crate::charts::{Bar, BarChart};
use crate::error::Result;

/// Horizontal extent of the value axis, always including zero.
fn value_range(bars: &[Bar]) -> (f64, f64) {
    let lo = bars.iter().map(|b| b.value).fold(0.0, f64::min);
    let hi = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    if hi - lo <= f64::EPSILON {
        (lo, lo + 1.0)
    } else {
        (lo, hi + (hi - lo) * 0.05)
    }
}

/// Tick label for row `y`, or nothing between rows.
fn row_label(labels: &[&str], y: f64) -> String {
    let row = y.round();
    if (y - row).abs() > 1e-6 || row < 0.0 {
        return String::new();
    }
    labels
        .get(row as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

pub(super) fn draw_bar_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &BarChart,
    scale: Scale,
) -> Result<()> {
    let body = draw_title(area, &chart.title, scale)?;
    let style = &chart.style;

    let rows = chart.bars.len().max(1);
    let (lo, hi) = value_range(&chart.bars);
    let labels = chart.labels();

    let tick_font = font(scale, style.tick_pt, FontStyle::Normal);
    let tick_style = TextStyle::from(tick_font.clone());
    let mut label_width = 0;
    for label in &labels {
        let (w, _) = body.estimate_text_size(label, &tick_style)?;
        label_width = label_width.max(w);
    }

    let mut cc = ChartBuilder::on(&body)
        .margin(scale.px_u(10.0))
        .x_label_area_size(scale.px_u(style.tick_pt * 1.6 + style.axis_pt * 1.6))
        .y_label_area_size(label_width + scale.px_u(style.tick_pt))
        .build_cartesian_2d(lo..hi, -0.5..(rows as f64 - 0.5))?;

    let y_formatter = |y: &f64| row_label(&labels, *y);
    cc.configure_mesh()
        .disable_y_mesh()
        .y_labels(rows)
        .y_label_formatter(&y_formatter)
        .x_desc(chart.x_label.as_str())
        .label_style(tick_font)
        .axis_desc_style(font(scale, style.axis_pt, FontStyle::Normal))
        .bold_line_style(&BLACK.mix(0.3))
        .light_line_style(&WHITE.mix(0.0))
        .draw()?;

    let half = style.bar_height / 2.0;
    let alpha = style.alpha;
    let bar_rect = |(row, bar): (usize, &Bar)| {
        Rectangle::new(
            [(0.0, row as f64 - half), (bar.value, row as f64 + half)],
            rgb(bar.color).mix(alpha).filled(),
        )
    };

    cc.draw_series(chart.bars.iter().enumerate().map(bar_rect))?;

    let value_color = if style.light_value_labels {
        WHITE
    } else {
        RGBColor(0x26, 0x26, 0x26)
    };
    let value_style = font(scale, style.value_pt, FontStyle::Bold)
        .color(&value_color)
        .pos(Pos::new(HPos::Right, VPos::Center));
    cc.draw_series(chart.bars.iter().enumerate().map(|(row, bar)| {
        Text::new(
            bar.value_label.clone(),
            (bar.value - style.value_offset, row as f64),
            value_style.clone(),
        )
    }))?;

    if let Some(legend) = &chart.legend {
        draw_legend(&cc.plotting_area().strip_coord_spec(), legend, alpha, scale)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    fn bar(value: f64) -> Bar {
        Bar {
            label: String::new(),
            value,
            value_label: String::new(),
            color: Srgb::new(0, 0, 0),
        }
    }

    #[test]
    fn range_includes_zero_and_headroom() {
        assert_eq!(value_range(&[bar(10.0), bar(20.0)]), (0.0, 21.0));
        assert_eq!(value_range(&[bar(-4.0), bar(6.0)]), (-4.0, 6.5));
    }

    #[test]
    fn empty_chart_has_unit_range() {
        assert_eq!(value_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn labels_only_on_whole_rows() {
        let labels = ["a", "b"];
        assert_eq!(row_label(&labels, 0.0), "a");
        assert_eq!(row_label(&labels, 0.9999999999), "b");
        assert_eq!(row_label(&labels, 0.5), "");
        assert_eq!(row_label(&labels, -1.0), "");
        assert_eq!(row_label(&labels, 2.0), "");
    }
}
