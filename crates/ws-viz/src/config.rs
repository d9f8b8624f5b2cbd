//! Plot style (YAML or programmatic).

use std::path::Path;

use serde::{Deserialize, Serialize};
use ws_core::{Error, Result};

use crate::color::{Color, PARTITION_PALETTE};

/// Canvas geometry, header texts and stack colors.
///
/// Margins are fractions of the canvas, as pad margins are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub font_size: f64,
    pub tick_size: f64,
    /// Bold header at the top left; empty disables it.
    pub experiment: String,
    /// Header at the top right.
    pub energy: String,
    /// Lower edge of the log-y axis.
    pub y_min: f64,
    /// The y axis reaches the stack maximum times this factor.
    pub headroom: f64,
    pub legend_columns: usize,
    /// `#rrggbb` fill per partition, in partition order.
    pub palette: Vec<String>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            margin_left: 0.16,
            margin_right: 0.05,
            margin_top: 0.08,
            margin_bottom: 0.13,
            font_size: 20.0,
            tick_size: 16.0,
            experiment: "CMS Simulation".to_string(),
            energy: "(13.6 TeV)".to_string(),
            y_min: 1e-11,
            headroom: 50.0,
            legend_columns: 2,
            palette: PARTITION_PALETTE.map(String::from).to_vec(),
        }
    }
}

impl PlotStyle {
    /// Check geometry and parse the palette.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::Validation("plot width and height must be positive".into()));
        }
        let margins = [self.margin_left, self.margin_right, self.margin_top, self.margin_bottom];
        if margins.iter().any(|m| !(0.0..0.5).contains(m)) {
            return Err(Error::Validation("plot margins must lie in [0, 0.5)".into()));
        }
        if !(self.y_min > 0.0) {
            return Err(Error::Validation(format!(
                "y_min must be positive on a log axis, got {}",
                self.y_min
            )));
        }
        if self.legend_columns == 0 {
            return Err(Error::Validation("legend_columns must be at least 1".into()));
        }
        self.palette_colors().map(|_| ())
    }

    /// Parsed palette. Partitions beyond its length are drawn grey.
    pub fn palette_colors(&self) -> Result<Vec<Color>> {
        self.palette.iter().map(|c| c.parse()).collect()
    }
}

/// Read a plot style from YAML, or JSON when the extension is `.json`.
pub fn read_plot_style(path: &Path) -> Result<PlotStyle> {
    let bytes = std::fs::read(path)?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let style: PlotStyle = if ext == "json" {
        serde_json::from_slice(&bytes)?
    } else {
        serde_yaml_ng::from_slice(&bytes)?
    };
    style.validate()?;
    Ok(style)
}
