//! Skim pipeline: load → select → derive → weight & project → write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use ws_core::{Channel, GenEvent, Result, SkimRow};

use crate::config::SkimConfig;
use crate::cutflow::CutFlow;
use crate::derive::derive_row;
use crate::select::{MuonPairSelector, PairSelector, TauSlotSelector, Verdict};
use crate::weights::WeightTable;

/// Selector of a channel.
pub fn selector_for(channel: Channel) -> Box<dyn PairSelector> {
    match channel {
        Channel::Muon => Box::new(MuonPairSelector),
        Channel::Tau => Box::new(TauSlotSelector::default()),
    }
}

/// Rows and cut-flow of one batch of events.
#[derive(Debug, Clone)]
pub struct SkimOutcome {
    /// Output rows, in input order.
    pub rows: Vec<SkimRow>,
    /// Cut-flow of the batch.
    pub cutflow: CutFlow,
}

/// Select and derive over `events` in parallel, preserving input order.
///
/// Any selector error aborts the batch.
pub fn process_events(
    selector: &dyn PairSelector,
    events: &[GenEvent],
    weight: f64,
) -> Result<SkimOutcome> {
    let verdicts: Vec<Verdict> =
        events.par_iter().map(|ev| selector.select(ev)).collect::<Result<_>>()?;

    let mut cutflow = CutFlow::new(selector.cuts());
    for v in &verdicts {
        cutflow.record(v);
    }

    let rows: Vec<SkimRow> = events
        .par_iter()
        .zip(verdicts.par_iter())
        .filter_map(|(ev, v)| v.selected().map(|s| derive_row(ev, s, weight)))
        .collect();

    Ok(SkimOutcome { rows, cutflow })
}

/// Result of skimming one partition.
#[derive(Debug, Clone)]
pub struct PartitionSummary {
    /// Partition name.
    pub partition: String,
    /// Events read.
    pub events: usize,
    /// Events written.
    pub selected: usize,
    /// Weight attached to every row.
    pub weight: f64,
    /// Output file.
    pub output: PathBuf,
    /// Cut-flow.
    pub cutflow: CutFlow,
    /// Wall time of the partition.
    pub elapsed: Duration,
}

/// Skim one partition into `out_dir`.
pub fn run_partition(
    config: &SkimConfig,
    weights: &WeightTable,
    partition: &str,
    out_dir: &Path,
) -> Result<PartitionSummary> {
    let start = Instant::now();
    let channel = config.channel;
    let weight = weights.weight(partition)?;
    tracing::info!(channel = %channel, partition, "processing partition");

    let events = ws_io::read_partition(&config.partition_dir(partition), channel.collection())?;
    tracing::info!(partition, events = events.len(), "events loaded");

    let selector = selector_for(channel);
    let outcome = process_events(selector.as_ref(), &events, weight)?;

    let output = out_dir.join(channel.skim_file_name(partition, &config.tag));
    ws_io::write_skim(&output, channel, partition, &outcome.rows)?;

    let elapsed = start.elapsed();
    tracing::info!(
        partition,
        selected = outcome.rows.len(),
        elapsed_s = elapsed.as_secs_f64(),
        output = %output.display(),
        "partition done"
    );

    Ok(PartitionSummary {
        partition: partition.to_string(),
        events: events.len(),
        selected: outcome.rows.len(),
        weight,
        output,
        cutflow: outcome.cutflow,
        elapsed,
    })
}

/// Skim every configured partition, one at a time.
///
/// The weight table is built before any input is read, so a partition
/// missing from the sample table fails the job up front. `on_partition`
/// is called after each partition is written.
pub fn run_skim(
    config: &SkimConfig,
    out_dir: &Path,
    mut on_partition: impl FnMut(&PartitionSummary),
) -> Result<Vec<PartitionSummary>> {
    let weights = WeightTable::from_config(config)?;
    std::fs::create_dir_all(out_dir)?;

    let mut summaries = Vec::with_capacity(config.partitions.len());
    for partition in &config.partitions {
        let summary = run_partition(config, &weights, partition, out_dir)?;
        on_partition(&summary);
        summaries.push(summary);
    }
    Ok(summaries)
}
