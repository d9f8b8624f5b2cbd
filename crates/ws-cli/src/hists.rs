//! `wskim hists`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use ws_core::Channel;

use crate::skim::load_config;

pub fn cmd_hists(
    channel: Channel,
    config: Option<&PathBuf>,
    skim_dir: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = load_config(channel, config)?;
    let output = output.unwrap_or_else(|| skim_dir.join(channel.histogram_file_name(&cfg.tag)));

    let histograms = ws_hist::fill_channel(channel, &cfg.partitions, &cfg.tag, skim_dir)
        .with_context(|| format!("failed to fill histograms from {}", skim_dir.display()))?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    ws_hist::write_histograms(&output, &histograms)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(histograms = histograms.len(), path = %output.display(), "histograms written");
    Ok(())
}
