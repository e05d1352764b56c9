use std::path::PathBuf;

use crate::charts::industries::{global_industries, us_industries};
use crate::charts::summary::top_growth_sectors;
use crate::charts::world_map::world_map;
use crate::charts::{Chart, GridFigure, Layout, Title};
use crate::config::{
    ChartConfig, GLOBAL_INDUSTRIES_FILE, GRID_FILE, TOP_SECTORS_FILE, US_INDUSTRIES_FILE,
    WORLD_MAP_FILE,
};
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::error::Result;
use crate::render::fonts::register_fonts;
use crate::render::land::LandOutline;
use crate::render::Renderer;

// ---------------------------------------------------------------------------
// The four charts, in generation order
// ---------------------------------------------------------------------------

type BuildFn = fn(&Dataset, Layout) -> Result<Chart>;

struct ChartJob {
    name: &'static str,
    file: &'static str,
    build: BuildFn,
}

fn us_chart(dataset: &Dataset, layout: Layout) -> Result<Chart> {
    us_industries(dataset, layout).map(Chart::Bars)
}

fn global_chart(dataset: &Dataset, layout: Layout) -> Result<Chart> {
    global_industries(dataset, layout).map(Chart::Bars)
}

fn summary_chart(dataset: &Dataset, layout: Layout) -> Result<Chart> {
    top_growth_sectors(dataset, layout).map(Chart::Bars)
}

fn map_chart(dataset: &Dataset, layout: Layout) -> Result<Chart> {
    world_map(dataset, layout).map(Chart::Map)
}

const JOBS: [ChartJob; 4] = [
    ChartJob {
        name: "US Industries chart",
        file: US_INDUSTRIES_FILE,
        build: us_chart,
    },
    ChartJob {
        name: "Global Industries chart",
        file: GLOBAL_INDUSTRIES_FILE,
        build: global_chart,
    },
    ChartJob {
        name: "Top Growth Sectors summary chart",
        file: TOP_SECTORS_FILE,
        build: summary_chart,
    },
    ChartJob {
        name: "World Map",
        file: WORLD_MAP_FILE,
        build: map_chart,
    },
];

/// Build the 2x2 composite: US, Global, summary, map in reading order.
pub fn build_grid(dataset: &Dataset) -> Result<GridFigure> {
    Ok(GridFigure {
        title: Title::new(
            "Remote Work Industry Migration: Global Trends & Sector Analysis",
            24.0,
        ),
        subtitle: Title::new(
            "Which sectors are going remote and regional differences in remote work adoption",
            17.0,
        ),
        panels: [
            us_chart(dataset, Layout::Grid)?,
            global_chart(dataset, Layout::Grid)?,
            summary_chart(dataset, Layout::Grid)?,
            map_chart(dataset, Layout::Grid)?,
        ],
        figure_in: (24.0, 16.0),
    })
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Load the dataset once, then write every chart for the configured layout.
/// Returns the written files. The first failure aborts the run; files written
/// before it stay on disk.
pub fn run(config: &ChartConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;

    let dataset = load_file(&config.input)?;
    if dataset.is_empty() {
        log::warn!(
            "{} has no data rows; charts will be empty",
            config.input.display()
        );
    }
    register_fonts(config.font.as_deref())?;
    let land = config
        .land
        .as_deref()
        .map(LandOutline::load)
        .transpose()?;
    if land.as_ref().is_some_and(LandOutline::is_empty) {
        log::warn!("Land file contains no polygons; the map has no land background");
    }
    let renderer = Renderer::new(config.dpi, land);

    std::fs::create_dir_all(&config.output_dir)?;

    let mut written = Vec::new();
    match config.layout {
        Layout::Single => {
            for job in &JOBS {
                println!("Generating {}...", job.name);
                let chart = (job.build)(&dataset, Layout::Single)?;
                let path = config.output_path(job.file);
                renderer.write_chart(&chart, &path)?;
                written.push(path);
            }
            println!("All four charts generated successfully!");
            println!("Generated files:");
            for path in &written {
                println!("- {}", path.display());
            }
        }
        Layout::Grid => {
            println!("Generating combined analysis figure...");
            let grid = build_grid(&dataset)?;
            let path = config.output_path(GRID_FILE);
            renderer.write_grid(&grid, &path)?;
            println!("Clean remote work analysis saved as '{}'", path.display());
            written.push(path);
        }
    }

    Ok(written)
}
