use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value as JsonValue;

use crate::error::{ChartError, Result};

/// A closed ring of (longitude, latitude) points.
pub type Ring = Vec<(f64, f64)>;

// ---------------------------------------------------------------------------
// Land polygons for the map background
// ---------------------------------------------------------------------------

/// Exterior rings of land (or country) polygons, e.g. Natural Earth admin-0
/// boundaries exported as GeoJSON. Holes are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandOutline {
    rings: Vec<Ring>,
}

impl LandOutline {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ChartError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ChartError::Io(e),
        })?;
        let outline =
            Self::from_geojson(&text).map_err(|e| ChartError::load(path, format!("{e:#}")))?;
        log::info!(
            "Loaded {} land polygons from {}",
            outline.rings.len(),
            path.display()
        );
        Ok(outline)
    }

    /// Parse a GeoJSON FeatureCollection, Feature or bare geometry.
    pub fn from_geojson(text: &str) -> anyhow::Result<Self> {
        let root: JsonValue = serde_json::from_str(text).context("parsing GeoJSON")?;
        let mut rings = Vec::new();
        collect_rings(&root, &mut rings)?;
        Ok(LandOutline { rings })
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

fn collect_rings(value: &JsonValue, rings: &mut Vec<Ring>) -> anyhow::Result<()> {
    let kind = value
        .get("type")
        .and_then(JsonValue::as_str)
        .context("GeoJSON object without 'type'")?;

    match kind {
        "FeatureCollection" => {
            let features = value
                .get("features")
                .and_then(JsonValue::as_array)
                .context("FeatureCollection without 'features' array")?;
            for (i, feature) in features.iter().enumerate() {
                collect_rings(feature, rings).with_context(|| format!("feature {i}"))?;
            }
        }
        "Feature" => match value.get("geometry") {
            Some(JsonValue::Null) | None => {}
            Some(geometry) => collect_rings(geometry, rings)?,
        },
        "GeometryCollection" => {
            let geometries = value
                .get("geometries")
                .and_then(JsonValue::as_array)
                .context("GeometryCollection without 'geometries' array")?;
            for geometry in geometries {
                collect_rings(geometry, rings)?;
            }
        }
        "Polygon" => {
            let polygon = coordinates(value)?;
            if let Some(exterior) = polygon.first() {
                rings.push(ring(exterior)?);
            }
        }
        "MultiPolygon" => {
            for polygon in coordinates(value)? {
                let polygon = polygon.as_array().context("polygon is not an array")?;
                if let Some(exterior) = polygon.first() {
                    rings.push(ring(exterior)?);
                }
            }
        }
        // Points and lines carry no land area.
        _ => {}
    }
    Ok(())
}

fn coordinates(geometry: &JsonValue) -> anyhow::Result<&Vec<JsonValue>> {
    geometry
        .get("coordinates")
        .and_then(JsonValue::as_array)
        .context("geometry without 'coordinates' array")
}

fn ring(value: &JsonValue) -> anyhow::Result<Ring> {
    let points = value.as_array().context("ring is not an array")?;
    points
        .iter()
        .enumerate()
        .map(|(j, p)| {
            let pair = p.as_array().filter(|a| a.len() >= 2);
            match pair.map(|a| (a[0].as_f64(), a[1].as_f64())) {
                Some((Some(lon), Some(lat))) => Ok((lon, lat)),
                _ => bail!("position {j} is not a [lon, lat] pair"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_polygons_and_multipolygons() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Polygon",
                    "coordinates": [[[0,0],[10,0],[10,10],[0,0]], [[2,2],[3,2],[3,3],[2,2]]] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "MultiPolygon",
                    "coordinates": [[[[20,20],[30,20],[30,30],[20,20]]], [[[-5,-5],[-1,-5],[-1,-1],[-5,-5]]]] } },
                { "type": "Feature", "properties": {}, "geometry": null },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Point", "coordinates": [1, 2] } }
            ]
        }"#;
        let outline = LandOutline::from_geojson(text).unwrap();
        assert_eq!(outline.rings().len(), 3);
        assert_eq!(outline.rings()[0][1], (10.0, 0.0));
        assert_eq!(outline.rings()[2][0], (-5.0, -5.0));
    }

    #[test]
    fn points_only_give_empty_outline() {
        let outline = LandOutline::from_geojson(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1,2]}}
            ]}"#,
        )
        .unwrap();
        assert!(outline.is_empty());
        assert!(!LandOutline::from_geojson(
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#
        )
        .unwrap()
        .is_empty());
    }

    #[test]
    fn bare_geometry_is_accepted() {
        let outline = LandOutline::from_geojson(
            r#"{"type":"Polygon","coordinates":[[[1.5,2.5,100],[3,4],[5,6],[1.5,2.5]]]}"#,
        )
        .unwrap();
        assert_eq!(outline.rings()[0][0], (1.5, 2.5));
    }

    #[test]
    fn malformed_positions_are_rejected() {
        let err = LandOutline::from_geojson(r#"{"type":"Polygon","coordinates":[[[1],[2,3]]]}"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("position 0"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = LandOutline::load(Path::new("/no/such/land.geojson")).unwrap_err();
        assert!(matches!(err, ChartError::NotFound { .. }));
    }
}
