//! Drawing chart models onto a bitmap and encoding them as PNG.
//!
//! Every figure is drawn into an in-memory RGB buffer through
//! [`TextSafeBackend`](text_safe::TextSafeBackend) and written once with `image`.

mod bars;
pub mod fonts;
pub mod land;
mod map;
pub mod text_safe;

use std::path::Path;

use palette::Srgb;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_backend::DrawingBackend;

use crate::charts::{Chart, GridFigure, Legend, LegendCorner, LegendSymbol, Title};
use crate::error::{ChartError, Result};
use land::LandOutline;
use text_safe::TextSafeBackend;

// ---------------------------------------------------------------------------
// Points → pixels
// ---------------------------------------------------------------------------

/// Upper bound on the pixel count of one figure (RGB buffer of about 450 MB).
const MAX_FIGURE_PIXELS: f64 = 150_000_000.0;

/// Converts typographic points to pixels at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    dpi: f64,
}

impl Scale {
    pub fn new(dpi: u32) -> Self {
        Scale { dpi: dpi as f64 }
    }

    pub fn px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    pub fn px_i(&self, pt: f64) -> i32 {
        self.px(pt).round() as i32
    }

    pub fn px_u(&self, pt: f64) -> u32 {
        self.px(pt).round().max(0.0) as u32
    }

    /// Pixel size of a figure given in inches.
    pub fn figure_px(&self, (w_in, h_in): (f64, f64)) -> Result<(u32, u32)> {
        let w = (w_in * self.dpi).round();
        let h = (h_in * self.dpi).round();
        if w < 1.0 || h < 1.0 {
            return Err(ChartError::Render(format!(
                "figure of {w_in}x{h_in} in at {} dpi has zero size",
                self.dpi
            )));
        }
        if w * h > MAX_FIGURE_PIXELS {
            return Err(ChartError::Render(format!(
                "figure of {w_in}x{h_in} in at {} dpi is too large ({w}x{h} px)",
                self.dpi
            )));
        }
        Ok((w as u32, h as u32))
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

pub(crate) fn rgb(color: Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

pub(crate) fn font(scale: Scale, pt: f64, style: FontStyle) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, scale.px(pt), style)
}

/// Draw a bold, centred, possibly multi-line title at the top of `area` and
/// return the area below it.
pub(crate) fn draw_title<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &Title,
    scale: Scale,
) -> Result<DrawingArea<DB, Shift>> {
    let line_h = scale.px(title.font_pt) * 1.25;
    let pad = scale.px(title.font_pt * 0.5);
    let lines: Vec<&str> = title.lines().collect();
    let header_h = (lines.len() as f64 * line_h + 2.0 * pad).round() as i32;

    let (header, body) = area.split_vertically(header_h);
    let (width, _) = header.dim_in_pixel();
    let style = font(scale, title.font_pt, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));

    for (i, line) in lines.iter().enumerate() {
        let y = (pad + i as f64 * line_h).round() as i32;
        header.draw(&Text::new(line.to_string(), (width as i32 / 2, y), style.clone()))?;
    }
    Ok(body)
}

/// Boxed legend in the lower corner of `area`. Labels are measured through the
/// backend, so without a font only the text is lost.
pub(crate) fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    legend: &Legend,
    alpha: f64,
    scale: Scale,
) -> Result<()> {
    if legend.entries.is_empty() {
        return Ok(());
    }
    let style = font(scale, legend.font_pt, FontStyle::Normal)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let swatch = scale.px_i(legend.font_pt * 0.5).max(1);
    let pad = scale.px_i(legend.font_pt * 0.4).max(1);

    let (mut text_w, mut text_h) = (0, 0);
    for entry in &legend.entries {
        let (w, h) = area.estimate_text_size(&entry.label, &style)?;
        text_w = text_w.max(w as i32);
        text_h = text_h.max(h as i32);
    }
    let row_h = text_h.max(2 * swatch) + pad;
    let box_w = 4 * pad + 2 * swatch + text_w;
    let box_h = legend.entries.len() as i32 * row_h + pad;

    let (width, height) = area.dim_in_pixel();
    let margin = scale.px_i(8.0);
    let left = match legend.corner {
        LegendCorner::LowerLeft => margin,
        LegendCorner::LowerRight => width as i32 - margin - box_w,
    };
    let bottom = height as i32 - margin;
    let top = bottom - box_h;
    let corners = [(left, top), (left + box_w, bottom)];
    area.draw(&Rectangle::new(corners, WHITE.mix(0.9).filled()))?;
    area.draw(&Rectangle::new(corners, BLACK.mix(0.4).stroke_width(1)))?;

    let x = left + 2 * pad;
    for (i, entry) in legend.entries.iter().enumerate() {
        let y = top + pad + i as i32 * row_h + (row_h - pad) / 2;
        let fill = rgb(entry.color).mix(alpha).filled();
        match entry.symbol {
            LegendSymbol::Patch => area.draw(&Rectangle::new(
                [(x, y - swatch), (x + 2 * swatch, y + swatch)],
                fill,
            ))?,
            LegendSymbol::Dot => area.draw(&Circle::new((x + swatch, y), swatch, fill))?,
        }
        area.draw(&Text::new(
            entry.label.clone(),
            (x + 2 * swatch + pad, y),
            style.clone(),
        ))?;
    }
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &Chart,
    land: Option<&LandOutline>,
    scale: Scale,
) -> Result<()> {
    match chart {
        Chart::Bars(c) => bars::draw_bar_chart(area, c, scale),
        Chart::Map(c) => map::draw_map_chart(area, c, land, scale),
    }
}

fn draw_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &GridFigure,
    land: Option<&LandOutline>,
    scale: Scale,
) -> Result<()> {
    let (width, height) = root.dim_in_pixel();
    let (header, body) = root.split_vertically((height as f64 * 0.13).round() as i32);

    let center = width as i32 / 2;
    let title_style = font(scale, grid.title.font_pt, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let subtitle_style = font(scale, grid.subtitle.font_pt, FontStyle::Italic)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    header.draw(&Text::new(
        grid.title.text.clone(),
        (center, (height as f64 * 0.05).round() as i32),
        title_style,
    ))?;
    header.draw(&Text::new(
        grid.subtitle.text.clone(),
        (center, (height as f64 * 0.09).round() as i32),
        subtitle_style,
    ))?;

    let body = body.margin(
        0,
        (height as f64 * 0.04).round() as i32,
        (width as f64 * 0.03).round() as i32,
        (width as f64 * 0.03).round() as i32,
    );
    let gap = scale.px_i(18.0);
    for (area, chart) in body.split_evenly((2, 2)).iter().zip(grid.panels.iter()) {
        let panel = area.margin(gap / 2, gap / 2, gap / 2, gap / 2);
        draw_chart(&panel, chart, land, scale)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

enum Figure<'f> {
    Single(&'f Chart),
    Grid(&'f GridFigure),
}

/// Renders chart models to PNG files at a fixed resolution.
pub struct Renderer {
    scale: Scale,
    land: Option<LandOutline>,
}

impl Renderer {
    pub fn new(dpi: u32, land: Option<LandOutline>) -> Self {
        Renderer {
            scale: Scale::new(dpi),
            land,
        }
    }

    /// Write one chart as its own figure.
    pub fn write_chart(&self, chart: &Chart, path: &Path) -> Result<()> {
        let size = self.scale.figure_px(chart.figure_in())?;
        self.write_png(Figure::Single(chart), size, path)
    }

    /// Write the 2x2 composite figure.
    pub fn write_grid(&self, grid: &GridFigure, path: &Path) -> Result<()> {
        let size = self.scale.figure_px(grid.figure_in)?;
        self.write_png(Figure::Grid(grid), size, path)
    }

    fn write_png(&self, figure: Figure<'_>, (w, h): (u32, u32), path: &Path) -> Result<()> {
        let mut buffer = vec![255u8; w as usize * h as usize * 3];
        {
            let backend = TextSafeBackend::new(BitMapBackend::with_buffer(&mut buffer, (w, h)));
            let root = backend.into_drawing_area();
            root.fill(&WHITE)?;
            match figure {
                Figure::Single(chart) => draw_chart(&root, chart, self.land.as_ref(), self.scale)?,
                Figure::Grid(grid) => draw_grid(&root, grid, self.land.as_ref(), self.scale)?,
            }
            root.present()?;
        }

        let image = image::RgbImage::from_raw(w, h, buffer)
            .ok_or_else(|| ChartError::Render("pixel buffer does not match figure size".into()))?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| ChartError::Render(format!("writing {}: {e}", path.display())))?;

        log::info!("Wrote {} ({w}x{h} px)", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_scale_with_dpi() {
        let scale = Scale::new(144);
        assert_eq!(scale.px(12.0), 24.0);
        assert_eq!(scale.px_u(7.0), 14);
        assert_eq!(scale.figure_px((12.0, 8.0)).unwrap(), (1728, 1152));
    }

    #[test]
    fn default_resolution_matches_300_dpi() {
        assert_eq!(Scale::new(300).figure_px((16.0, 10.0)).unwrap(), (4800, 3000));
    }

    #[test]
    fn oversized_figures_are_rejected() {
        assert!(Scale::new(600).figure_px((24.0, 16.0)).is_ok());
        assert!(matches!(
            Scale::new(1200).figure_px((24.0, 16.0)),
            Err(ChartError::Render(_))
        ));
    }

    #[test]
    fn zero_size_figure_is_render_error() {
        let err = Scale::new(300).figure_px((0.0, 8.0)).unwrap_err();
        assert!(matches!(err, ChartError::Render(_)));
    }
}
