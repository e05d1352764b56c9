use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::charts::Layout;
use crate::error::{ChartError, Result};

pub const DEFAULT_INPUT: &str = "remote_work_comprehensive_data.csv";
pub const DEFAULT_DPI: u32 = 300;
const MAX_DPI: u32 = 600;

pub const US_INDUSTRIES_FILE: &str = "us_industries_chart.png";
pub const GLOBAL_INDUSTRIES_FILE: &str = "global_industries_chart.png";
pub const TOP_SECTORS_FILE: &str = "top_growth_sectors_chart.png";
pub const WORLD_MAP_FILE: &str = "world_map_chart.png";
pub const GRID_FILE: &str = "remote_work_clean_analysis.png";

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Settings for one generation run. Every field has a default, so an empty JSON
/// object (or no file at all) reproduces the standard output set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Dataset to read (`.csv`, `.json` or `.parquet`).
    pub input: PathBuf,
    /// Directory the PNG files are written to.
    pub output_dir: PathBuf,
    pub layout: Layout,
    pub dpi: u32,
    /// Optional GeoJSON with land polygons for the map background.
    pub land: Option<PathBuf>,
    /// Optional TTF used for all text.
    pub font: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            layout: Layout::default(),
            dpi: DEFAULT_DPI,
            land: None,
            font: None,
        }
    }
}

impl ChartConfig {
    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ChartError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ChartError::Io(e),
        })?;
        let config: ChartConfig = serde_json::from_str(&text)
            .map_err(|e| ChartError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(ChartError::Config(format!(
                "dpi must be between 1 and {MAX_DPI}, got {}",
                self.dpi
            )));
        }
        Ok(())
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: ChartConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.dpi, 300);
        assert_eq!(config.layout, Layout::Single);
        assert_eq!(
            config.output_path(WORLD_MAP_FILE),
            Path::new(".").join("world_map_chart.png")
        );
    }

    #[test]
    fn fields_override_defaults() {
        let config: ChartConfig = serde_json::from_str(
            r#"{"input":"data.json","layout":"grid","dpi":150,"land":"land.geojson"}"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("data.json"));
        assert_eq!(config.layout, Layout::Grid);
        assert_eq!(config.dpi, 150);
        assert_eq!(config.land, Some(PathBuf::from("land.geojson")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<ChartConfig>(r#"{"colour":"red"}"#).is_err());
    }

    #[test]
    fn dpi_bounds_are_checked() {
        let mut config = ChartConfig::default();
        config.dpi = 0;
        assert!(matches!(config.validate(), Err(ChartError::Config(_))));
        config.dpi = 1200;
        assert!(config.validate().is_err());
        config.dpi = 600;
        assert!(config.validate().is_ok());
        config.dpi = 72;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");
        std::fs::write(&path, r#"{"dpi": 0}"#).unwrap();
        assert!(matches!(
            ChartConfig::from_file(&path),
            Err(ChartError::Config(_))
        ));
        assert!(matches!(
            ChartConfig::from_file(&dir.path().join("missing.json")),
            Err(ChartError::NotFound { .. })
        ));
    }
}
