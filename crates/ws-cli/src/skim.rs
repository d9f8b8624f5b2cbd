//! `wskim skim` and `wskim config`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use ws_core::Channel;
use ws_skim::{SkimConfig, read_skim_config};

/// Built-in config of `channel`, or the file at `path` checked against it.
pub fn load_config(channel: Channel, path: Option<&PathBuf>) -> Result<SkimConfig> {
    let Some(path) = path else {
        return Ok(SkimConfig::builtin(channel));
    };
    let cfg = read_skim_config(path)
        .with_context(|| format!("failed to read skim config {}", path.display()))?;
    if cfg.channel != channel {
        anyhow::bail!(
            "config {} is for channel '{}', but --channel {} was given",
            path.display(),
            cfg.channel,
            channel
        );
    }
    Ok(cfg)
}

pub fn cmd_skim(
    channel: Channel,
    config: Option<&PathBuf>,
    base_path: Option<PathBuf>,
    out_dir: &Path,
    partitions: Vec<String>,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        // Best-effort; if a global pool already exists, keep going.
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    let mut cfg = load_config(channel, config)?;
    if let Some(base_path) = base_path {
        cfg.base_path = base_path;
    }
    if !partitions.is_empty() {
        cfg.partitions = partitions;
    }

    tracing::info!(
        channel = %channel,
        base_path = %cfg.base_path.display(),
        partitions = cfg.partitions.len(),
        "starting skim"
    );

    let summaries = ws_skim::run_skim(&cfg, out_dir, |s| {
        println!(">>> Process sample {}:", s.partition);
        println!("Number of events: {}", s.events);
        print!("{}", s.cutflow);
        println!("Weight: {:e}  Elapsed: {:.3} s", s.weight, s.elapsed.as_secs_f64());
    })
    .with_context(|| format!("skim of channel '{channel}' failed"))?;

    let selected: usize = summaries.iter().map(|s| s.selected).sum();
    tracing::info!(partitions = summaries.len(), selected, "skim complete");
    Ok(())
}

pub fn cmd_config(channel: Channel) -> Result<()> {
    let yaml = SkimConfig::builtin(channel).to_yaml()?;
    print!("{yaml}");
    Ok(())
}
