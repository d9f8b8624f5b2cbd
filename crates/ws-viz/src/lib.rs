//! # ws-viz
//!
//! Stacked per-partition plots of a channel's histograms.
//!
//! [`stack`] turns a [`ws_hist::HistogramSet`] into one [`StackArtifact`] per
//! booked variable; [`render`] draws an artifact as a log-y SVG. The
//! artifacts can be written as JSON instead, for drawing elsewhere.

pub mod axes;
pub mod canvas;
pub mod color;
pub mod config;
pub mod legend;
pub mod primitives;
pub mod render;
pub mod stack;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ws_core::{Channel, Error, Result};
use ws_hist::HistogramSet;

pub use config::{PlotStyle, read_plot_style};
pub use render::render_stack;
pub use stack::{StackArtifact, build_stack, build_stacks};

/// Output format of `plot_channel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    /// Rendered figure.
    Svg,
    /// The stack artifact itself.
    Json,
}

impl PlotFormat {
    /// File extension.
    pub fn extension(self) -> &'static str {
        match self {
            PlotFormat::Svg => "svg",
            PlotFormat::Json => "json",
        }
    }
}

impl fmt::Display for PlotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PlotFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(PlotFormat::Svg),
            "json" => Ok(PlotFormat::Json),
            other => {
                Err(Error::Validation(format!("unknown plot format '{other}' (expected svg or json)")))
            }
        }
    }
}

/// Output file name of a variable's plot: `<variable>_<m|t>.<ext>`.
pub fn plot_file_name(channel: Channel, variable: &str, format: PlotFormat) -> String {
    format!("{variable}_{}.{}", channel.tag(), format.extension())
}

/// Plot every selected variable of `channel` into `out_dir`.
///
/// All stacks are built (and their histograms checked) before the first
/// file is written.
pub fn plot_channel(
    set: &HistogramSet,
    channel: Channel,
    partitions: &[String],
    variables: &[String],
    style: &PlotStyle,
    format: PlotFormat,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    style.validate()?;
    let stacks = build_stacks(set, channel, partitions, variables)?;

    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(stacks.len());
    for art in &stacks {
        let body = match format {
            PlotFormat::Svg => render_stack(art, style)?,
            PlotFormat::Json => serde_json::to_string_pretty(art)?,
        };
        let path = out_dir.join(plot_file_name(channel, &art.variable, format));
        std::fs::write(&path, body)?;
        tracing::info!(variable = %art.variable, path = %path.display(), "plot written");
        written.push(path);
    }
    Ok(written)
}
