use std::path::Path;

use remote_work_charts::app;
use remote_work_charts::charts::Layout;
use remote_work_charts::config::ChartConfig;
use remote_work_charts::ChartError;

const DATA: &str = "\
region,country,industry,value
US,United States,Tech & IT,21.4
US,United States,Publishing,17.8
US,United States,Insurance Carriers,12.3
US,United States,Professional Services,7.4
Global,Global,Software Development,35.0
Global,Global,Marketing,28.0
Global,Global,All Industries,22.0
Latin America,Colombia,All Industries,12.5
Latin America,Argentina,All Industries,9.8
Europe,European Union,All Industries,8.4
Europe,Sweden,All Industries,6.1
Asia,Singapore,All Industries,44.0
Asia,China,All Industries,38.0
";

fn config_for(dir: &Path, layout: Layout) -> ChartConfig {
    let input = dir.join("data.csv");
    std::fs::write(&input, DATA).unwrap();
    ChartConfig {
        input,
        output_dir: dir.join("out"),
        layout,
        dpi: 50,
        ..ChartConfig::default()
    }
}

#[test]
fn single_layout_writes_four_charts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), Layout::Single);

    let written = app::run(&config).unwrap();

    let expected = [
        ("us_industries_chart.png", (600, 400)),
        ("global_industries_chart.png", (600, 400)),
        ("top_growth_sectors_chart.png", (800, 500)),
        ("world_map_chart.png", (800, 500)),
    ];
    assert_eq!(written.len(), expected.len());
    for (path, (name, size)) in written.iter().zip(expected) {
        assert_eq!(path, &config.output_dir.join(name));
        assert_eq!(image::image_dimensions(path).unwrap(), size, "{name}");
    }
}

#[test]
fn grid_layout_writes_one_figure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), Layout::Grid);

    let written = app::run(&config).unwrap();

    assert_eq!(written, [config.output_dir.join("remote_work_clean_analysis.png")]);
    assert_eq!(image::image_dimensions(&written[0]).unwrap(), (1200, 800));
    assert!(!config.output_dir.join("us_industries_chart.png").exists());
}

#[test]
fn grid_layout_with_land_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let land = dir.path().join("land.geojson");
    std::fs::write(
        &land,
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"block"},
             "geometry":{"type":"Polygon","coordinates":[[[-120,30],[-80,30],[-80,50],[-120,50],[-120,30]]]}}
        ]}"#,
    )
    .unwrap();
    let config = ChartConfig {
        land: Some(land),
        ..config_for(dir.path(), Layout::Grid)
    };

    let written = app::run(&config).unwrap();

    assert_eq!(image::image_dimensions(&written[0]).unwrap(), (1200, 800));
}

#[test]
fn infinite_value_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(
        &input,
        "region,country,industry,value\nUS,United States,Tech & IT,inf\n",
    )
    .unwrap();
    let config = ChartConfig {
        input,
        output_dir: dir.path().join("out"),
        dpi: 50,
        ..ChartConfig::default()
    };

    let err = app::run(&config).unwrap_err();
    assert!(matches!(err, ChartError::Load { .. }), "{err}");
}

#[test]
fn charts_are_not_blank() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), Layout::Single);

    app::run(&config).unwrap();

    let img = image::open(config.output_dir.join("us_industries_chart.png"))
        .unwrap()
        .to_rgb8();
    let colored = img.pixels().filter(|p| p.0 != [255, 255, 255]).count();
    assert!(colored > 1000, "only {colored} non-white pixels");
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = ChartConfig {
        input: dir.path().join("absent.csv"),
        output_dir: dir.path().join("out"),
        dpi: 50,
        ..ChartConfig::default()
    };

    let err = app::run(&config).unwrap_err();
    assert!(matches!(err, ChartError::NotFound { .. }), "{err}");
    assert!(!config.output_dir.exists());
}

#[test]
fn missing_column_stops_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "region,country,value\nUS,United States,1.0\n").unwrap();
    let config = ChartConfig {
        input,
        output_dir: dir.path().join("out"),
        dpi: 50,
        ..ChartConfig::default()
    };

    let err = app::run(&config).unwrap_err();
    assert!(matches!(err, ChartError::Schema { ref column, .. } if column == "industry"));
}
