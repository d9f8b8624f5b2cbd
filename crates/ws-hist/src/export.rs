//! Plain-text export of `(bin_center, bin_content)` pairs.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ws_core::{Channel, Error, Result};

use crate::histogram::Histogram;
use crate::results::HistogramSet;

/// Which histograms to export and how to name the text files.
///
/// Histogram `{prefix}_{partition}_{variable}` is written to
/// `out_{series_prefix}{lower edge}_{tag}.txt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Histogram label prefix.
    pub prefix: String,
    /// Variable part of the histogram name.
    pub variable: String,
    /// Prefix of the series name.
    pub series_prefix: String,
    /// Partitions to export, in order.
    pub partitions: Vec<String>,
    /// Partition whose bin count every other histogram must match.
    pub reference: String,
    /// Tag appended to output file names.
    pub tag: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            prefix: "enu".to_string(),
            variable: "lhe_m_inv".to_string(),
            series_prefix: "e".to_string(),
            partitions: [
                "120to200",
                "400to800",
                "800to1500",
                "1500to2500",
                "2500to4000",
                "4000to6000",
                "6000",
            ]
            .map(String::from)
            .to_vec(),
            reference: "400to800".to_string(),
            tag: "mg".to_string(),
        }
    }
}

impl ExportConfig {
    /// Defaults with names matching the histograms `wskim hists` books for
    /// `channel`: `<mnu|tnu>_<partition>_<mass column>` into `out_<m|t>...`.
    pub fn for_channel(channel: Channel) -> Self {
        Self {
            prefix: channel.label_prefix().to_string(),
            variable: channel.mass_column().to_string(),
            series_prefix: channel.tag().to_string(),
            ..Self::default()
        }
    }

    /// Histogram name of a partition.
    pub fn histogram_name(&self, partition: &str) -> String {
        format!("{}_{partition}_{}", self.prefix, self.variable)
    }

    /// Series name of a partition: the series prefix plus the lower edge of
    /// the partition range (`400to800` → `e400`).
    pub fn series_name(&self, partition: &str) -> String {
        let lower = partition.split("to").next().unwrap_or(partition);
        format!("{}{lower}", self.series_prefix)
    }

    /// Output file name of a partition.
    pub fn file_name(&self, partition: &str) -> String {
        format!("out_{}_{}.txt", self.series_name(partition), self.tag)
    }
}

/// Render bins `1..=n_bins` as `"<center> <content>"` lines.
pub fn render_bins(h: &Histogram, n_bins: usize) -> String {
    let mut out = String::new();
    for i in 1..=n_bins {
        // Infallible for String.
        let _ = writeln!(out, "{} {}", h.bin_center(i), h.bin_content(i));
    }
    out
}

/// Export the configured histograms of `set` into `out_dir`.
///
/// Every histogram is resolved and checked against the reference bin count
/// before the first file is written.
pub fn export_histograms(
    set: &HistogramSet,
    config: &ExportConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let reference = set.get(&config.histogram_name(&config.reference))?;
    let n_bins = reference.n_bins();
    tracing::info!(reference = %reference.name, bins = n_bins, "reference histogram");

    let mut resolved = Vec::with_capacity(config.partitions.len());
    for partition in &config.partitions {
        let h = set.get(&config.histogram_name(partition))?;
        if h.n_bins() != n_bins {
            return Err(Error::BinCountMismatch {
                name: h.name.clone(),
                expected: n_bins,
                actual: h.n_bins(),
            });
        }
        resolved.push((partition, h));
    }

    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(resolved.len());
    for (partition, h) in resolved {
        let path = out_dir.join(config.file_name(partition));
        std::fs::write(&path, render_bins(h, n_bins))?;
        tracing::info!(histogram = %h.name, path = %path.display(), "exported");
        written.push(path);
    }
    Ok(written)
}
