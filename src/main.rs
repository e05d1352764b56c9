use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueHint};

use remote_work_charts::app;
use remote_work_charts::charts::Layout;
use remote_work_charts::config::ChartConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render remote-work growth charts", long_about = None)]
struct Cli {
    /// JSON configuration file; command line flags take precedence over it
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Dataset to read (.csv, .json or .parquet)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Directory for the generated PNG files
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Four separate figures or one 2x2 composite
    #[arg(short, long, value_enum)]
    layout: Option<Layout>,

    /// Output resolution
    #[arg(long)]
    dpi: Option<u32>,

    /// GeoJSON file with land polygons for the map background
    #[arg(long, value_hint = ValueHint::FilePath)]
    land: Option<PathBuf>,

    /// TTF font used for all text
    #[arg(long, value_hint = ValueHint::FilePath)]
    font: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => ChartConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if self.land.is_some() {
            config.land = self.land;
        }
        if self.font.is_some() {
            config.font = self.font;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config()?;
    log::debug!("{config:?}");

    app::run(&config)
        .with_context(|| format!("generating charts from {}", config.input.display()))?;
    Ok(())
}
