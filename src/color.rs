use std::collections::BTreeMap;

use palette::Srgb;

use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// Fixed colours used across the charts
// ---------------------------------------------------------------------------

pub const US_BLUE: &str = "#2E86AB";
pub const GLOBAL_ORANGE: &str = "#F4A261";
pub const REGIONAL_PLUM: &str = "#A23B72";
pub const ASIA_RED: &str = "#C73E1D";
pub const POLICY_AMBER: &str = "#F18F01";

/// Parse a `#rrggbb` (or bare `rrggbb`) string into an 8-bit sRGB colour.
pub fn parse_hex(hex: &str) -> Result<Srgb<u8>> {
    hex.parse::<Srgb<u8>>()
        .map_err(|e| ChartError::Render(format!("invalid colour '{hex}': {e}")))
}

// ---------------------------------------------------------------------------
// Category → colour mapping
// ---------------------------------------------------------------------------

/// Maps category labels to colours, remembering the order they were declared in
/// so legends list them the same way every run.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    order: Vec<String>,
    mapping: BTreeMap<String, Srgb<u8>>,
}

impl CategoryColors {
    /// Build the mapping from `(label, hex)` pairs.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut order = Vec::new();
        let mut mapping = BTreeMap::new();
        for (label, hex) in entries {
            let color = parse_hex(hex)?;
            if mapping.insert(label.to_string(), color).is_none() {
                order.push(label.to_string());
            }
        }
        Ok(CategoryColors { order, mapping })
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, label: &str) -> Result<Srgb<u8>> {
        self.mapping
            .get(label)
            .copied()
            .ok_or_else(|| ChartError::Render(format!("no colour assigned to '{label}'")))
    }

    /// Return the legend entries (label → colour) in declaration order.
    pub fn legend_entries(&self) -> Vec<(String, Srgb<u8>)> {
        self.order
            .iter()
            .map(|label| (label.clone(), self.mapping[label]))
            .collect()
    }
}
