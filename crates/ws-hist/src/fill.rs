//! Histogramming step: skim outputs of a channel → booked histograms.

use std::path::Path;

use rayon::prelude::*;

use ws_core::{Channel, Error, Result};
use ws_io::META_KEY_CHANNEL;

use crate::booking::bookings;
use crate::filler::{HistogramSpec, fill_histograms};
use crate::histogram::Histogram;

/// Column holding the per-event weight.
pub const WEIGHT_COLUMN: &str = "weight";

/// Fill the bookings of one partition's skim.
pub fn fill_partition(
    channel: Channel,
    partition: &str,
    tag: &str,
    skim_dir: &Path,
) -> Result<Vec<Histogram>> {
    let path = skim_dir.join(channel.skim_file_name(partition, tag));
    let metadata = ws_io::skim_metadata(&path)?;
    if let Some(found) = metadata.get(META_KEY_CHANNEL) {
        if found != channel.name() {
            return Err(Error::SchemaMismatch(format!(
                "{} was skimmed for channel '{found}', expected '{channel}'",
                path.display()
            )));
        }
    }

    let label = channel.label(partition);
    let specs: Vec<HistogramSpec> = bookings(channel).iter().map(|b| b.spec(&label)).collect();
    let mut names: Vec<&str> = bookings(channel).iter().map(|b| b.variable).collect();
    names.push(WEIGHT_COLUMN);

    let (n_rows, columns) = ws_io::read_skim_columns(&path, &names)?;
    let histograms = fill_histograms(&specs, &columns, Some(WEIGHT_COLUMN))?;
    tracing::info!(partition, label = %label, events = n_rows, "histograms filled");
    Ok(histograms)
}

/// Fill every partition of a channel.
///
/// Histograms come out grouped by partition (in the given order), then by
/// booking order.
pub fn fill_channel(
    channel: Channel,
    partitions: &[String],
    tag: &str,
    skim_dir: &Path,
) -> Result<Vec<Histogram>> {
    let per_partition: Vec<Vec<Histogram>> = partitions
        .par_iter()
        .map(|p| fill_partition(channel, p, tag, skim_dir))
        .collect::<Result<_>>()?;
    Ok(per_partition.into_iter().flatten().collect())
}
