use std::iter;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use plotters_backend::DrawingBackend;

use super::land::LandOutline;
use super::{draw_legend, draw_title, font, rgb, Scale};
use crate::charts::{MapChart, Marker};
use crate::error::Result;

const OCEAN: RGBColor = RGBColor(0xAD, 0xD8, 0xE6);
const LAND: RGBColor = RGBColor(0xD3, 0xD3, 0xD3);

/// Spacing of the graticule lines in degrees.
const GRATICULE_STEP: usize = 30;

/// Margins that shrink `area` to the largest centred box with the given
/// width/height ratio.
fn aspect_margins((width, height): (u32, u32), ratio: f64) -> (i32, i32) {
    let (w, h) = (width as f64, height as f64);
    if w / h > ratio {
        (0, ((w - h * ratio) / 2.0).round() as i32)
    } else {
        (((h - w / ratio) / 2.0).round() as i32, 0)
    }
}

/// Marker radius in pixels for an area given in points².
fn marker_radius(area_pt2: f64, scale: Scale) -> i32 {
    (scale.px(area_pt2.sqrt()) / 2.0).round().max(1.0) as i32
}

pub(super) fn draw_map_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &MapChart,
    land: Option<&LandOutline>,
    scale: Scale,
) -> Result<()> {
    let body = draw_title(area, &chart.title, scale)?;
    let body = if chart.keep_aspect {
        let (v, h) = aspect_margins(body.dim_in_pixel(), 2.0);
        body.margin(v, v, h, h)
    } else {
        body
    };

    let mut cc = ChartBuilder::on(&body)
        .margin(scale.px_u(6.0))
        .build_cartesian_2d(-180.0..180.0, -90.0..90.0)?;

    // ---- Background ----
    cc.draw_series(iter::once(Rectangle::new(
        [(-180.0, -90.0), (180.0, 90.0)],
        OCEAN.mix(0.3).filled(),
    )))?;

    if let Some(land) = land {
        cc.draw_series(
            land.rings()
                .iter()
                .map(|ring| Polygon::new(ring.clone(), LAND.mix(0.5).filled())),
        )?;
        let outline = BLACK.stroke_width(scale.px_u(0.5).max(1));
        cc.draw_series(
            land.rings()
                .iter()
                .map(|ring| PathElement::new(ring.clone(), outline)),
        )?;
    }

    let grid_line = BLACK.mix(0.15).stroke_width(1);
    cc.draw_series((-180..=180).step_by(GRATICULE_STEP).map(|lon| {
        PathElement::new(vec![(lon as f64, -90.0), (lon as f64, 90.0)], grid_line)
    }))?;
    cc.draw_series((-90..=90).step_by(GRATICULE_STEP).map(|lat| {
        PathElement::new(vec![(-180.0, lat as f64), (180.0, lat as f64)], grid_line)
    }))?;
    cc.draw_series(iter::once(PathElement::new(
        vec![
            (-180.0, -90.0),
            (180.0, -90.0),
            (180.0, 90.0),
            (-180.0, 90.0),
            (-180.0, -90.0),
        ],
        BLACK.stroke_width(1),
    )))?;

    // ---- Markers ----
    let edge = BLACK.stroke_width(scale.px_u(chart.marker_edge_pt).max(1));
    for marker in &chart.markers {
        let center = (marker.lon, marker.lat);
        let radius = marker_radius(marker.area_pt2, scale);
        cc.draw_series(iter::once(Circle::new(
            center,
            radius,
            rgb(marker.color).mix(0.8).filled(),
        )))?;
        cc.draw_series(iter::once(Circle::new(center, radius, edge)))?;
    }
    for marker in &chart.markers {
        draw_marker_label(&mut cc, &body, marker, chart.marker_edge_pt, scale)?;
    }

    // ---- Legend ----
    draw_legend(&cc.plotting_area().strip_coord_spec(), &chart.legend, 1.0, scale)?;

    Ok(())
}

/// White box with the country name and value, hanging below the marker.
fn draw_marker_label<DB: DrawingBackend>(
    cc: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    body: &DrawingArea<DB, Shift>,
    marker: &Marker,
    edge_pt: f64,
    scale: Scale,
) -> Result<()> {
    let style = font(scale, marker.label_pt, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let lines: Vec<&str> = marker.label.lines().collect();
    let line_h = scale.px(marker.label_pt) * 1.2;
    let pad = scale.px(marker.label_pt * 0.5);

    let mut text_w = 0;
    for line in &lines {
        let (w, _) = body.estimate_text_size(line, &style)?;
        text_w = text_w.max(w);
    }
    let half_w = (text_w as f64 / 2.0 + pad).round() as i32;
    let box_h = (lines.len() as f64 * line_h + 2.0 * pad).round() as i32;
    let anchor = (marker.lon, marker.lat + marker.label_offset_deg);
    let corners = [(-half_w, 0), (half_w, box_h)];

    cc.draw_series(iter::once(
        EmptyElement::at(anchor) + Rectangle::new(corners, WHITE.mix(0.95).filled()),
    ))?;
    cc.draw_series(iter::once(
        EmptyElement::at(anchor)
            + Rectangle::new(corners, BLACK.stroke_width(scale.px_u(edge_pt).max(1))),
    ))?;
    for (i, line) in lines.iter().enumerate() {
        let y = (pad + i as f64 * line_h).round() as i32;
        cc.draw_series(iter::once(
            EmptyElement::at(anchor) + Text::new(line.to_string(), (0, y), style.clone()),
        ))?;
    }
    Ok(())
}
