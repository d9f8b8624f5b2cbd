//! `wskim plot`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use ws_core::Channel;
use ws_viz::{PlotFormat, PlotStyle};

use crate::skim::load_config;

pub fn cmd_plot(
    channel: Channel,
    config: Option<&PathBuf>,
    input: Option<PathBuf>,
    out_dir: &Path,
    variables: &[String],
    format: PlotFormat,
    style: Option<&PathBuf>,
) -> Result<()> {
    let cfg = load_config(channel, config)?;
    let input = input.unwrap_or_else(|| PathBuf::from(channel.histogram_file_name(&cfg.tag)));
    let style = match style {
        Some(path) => ws_viz::read_plot_style(path)
            .with_context(|| format!("failed to read plot style {}", path.display()))?,
        None => PlotStyle::default(),
    };

    tracing::info!(path = %input.display(), "loading histograms");
    let set = ws_hist::read_histograms(&input)
        .with_context(|| format!("failed to read histograms from {}", input.display()))?;

    let written =
        ws_viz::plot_channel(&set, channel, &cfg.partitions, variables, &style, format, out_dir)?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
