//! `wskim export`.

use anyhow::{Context, Result};
use std::path::Path;
use ws_core::Channel;
use ws_hist::ExportConfig;

/// Command-line overrides of the default export config.
pub struct Overrides {
    pub prefix: Option<String>,
    pub variable: Option<String>,
    pub series_prefix: Option<String>,
    pub reference: Option<String>,
    pub tag: Option<String>,
    pub partitions: Vec<String>,
}

impl Overrides {
    fn apply(self, mut cfg: ExportConfig) -> ExportConfig {
        if let Some(v) = self.prefix {
            cfg.prefix = v;
        }
        if let Some(v) = self.variable {
            cfg.variable = v;
        }
        if let Some(v) = self.series_prefix {
            cfg.series_prefix = v;
        }
        if let Some(v) = self.reference {
            cfg.reference = v;
        }
        if let Some(v) = self.tag {
            cfg.tag = v;
        }
        if !self.partitions.is_empty() {
            cfg.partitions = self.partitions;
        }
        cfg
    }
}

pub fn cmd_export(
    channel: Option<Channel>,
    input: &Path,
    out_dir: &Path,
    overrides: Overrides,
) -> Result<()> {
    let base = channel.map(ExportConfig::for_channel).unwrap_or_default();
    let cfg = overrides.apply(base);

    tracing::info!(path = %input.display(), "loading histograms");
    let set = ws_hist::read_histograms(input)
        .with_context(|| format!("failed to read histograms from {}", input.display()))?;

    let written = ws_hist::export_histograms(&set, &cfg, out_dir)?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
