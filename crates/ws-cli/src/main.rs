//! wskim CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ws_core::Channel;
use ws_viz::PlotFormat;

mod export;
mod hists;
mod plot;
mod skim;

#[derive(Parser)]
#[command(name = "wskim")]
#[command(about = "wskim - generator-level W → ℓν skimming, histogramming and plotting")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Skim the partitions of a channel
    Skim {
        /// Channel (muon | tau)
        #[arg(long)]
        channel: Channel,

        /// Skim config (YAML, or JSON by extension). Defaults to the built-in channel config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the directory holding the partition directories.
        #[arg(long)]
        base_path: Option<PathBuf>,

        /// Output directory for skim files.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Restrict to these partitions (repeatable).
        #[arg(long = "partition")]
        partitions: Vec<String>,

        /// Threads (0 = auto).
        #[arg(long, default_value = "0")]
        threads: usize,
    },

    /// Fill the booked histograms of a channel from its skims
    Hists {
        /// Channel (muon | tau)
        #[arg(long)]
        channel: Channel,

        /// Skim config supplying partitions and tag. Defaults to the built-in channel config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the skim files.
        #[arg(long, default_value = ".")]
        skim_dir: PathBuf,

        /// Results file. Defaults to `histograms_<m|t>_<tag>.parquet` in the skim directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump (bin_center, bin_content) pairs of named histograms to text files
    Export {
        /// Take name defaults from the histograms booked for this channel
        /// (muon | tau) instead of the enu/lhe_m_inv/e set.
        #[arg(long)]
        channel: Option<Channel>,

        /// Histogram results file.
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for text files.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Histogram label prefix (default: enu, or the channel label prefix).
        #[arg(long)]
        prefix: Option<String>,

        /// Variable part of the histogram name (default: lhe_m_inv, or the channel mass column).
        #[arg(long)]
        variable: Option<String>,

        /// Prefix of the series names (default: e, or the channel tag).
        #[arg(long)]
        series_prefix: Option<String>,

        /// Partition providing the reference bin count (default: 400to800).
        #[arg(long)]
        reference: Option<String>,

        /// Tag appended to output file names (default: mg).
        #[arg(long)]
        tag: Option<String>,

        /// Partitions to export (repeatable).
        #[arg(long = "partition")]
        partitions: Vec<String>,
    },

    /// Stack the partitions of each booked variable into one plot per variable
    Plot {
        /// Channel (muon | tau)
        #[arg(long)]
        channel: Channel,

        /// Skim config supplying partitions and tag. Defaults to the built-in channel config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Histogram results file. Defaults to `histograms_<m|t>_<tag>.parquet`.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for plots.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Restrict to these variables (repeatable). Defaults to every booked variable.
        #[arg(long = "variable")]
        variables: Vec<String>,

        /// Output format (svg | json).
        #[arg(long, default_value = "svg")]
        format: PlotFormat,

        /// Plot style (YAML, or JSON by extension).
        #[arg(long)]
        style: Option<PathBuf>,
    },

    /// Print the built-in config of a channel as YAML
    Config {
        /// Channel (muon | tau)
        #[arg(long)]
        channel: Channel,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Skim { channel, config, base_path, out_dir, partitions, threads } => {
            skim::cmd_skim(channel, config.as_ref(), base_path, &out_dir, partitions, threads)
        }
        Commands::Hists { channel, config, skim_dir, output } => {
            hists::cmd_hists(channel, config.as_ref(), &skim_dir, output)
        }
        Commands::Export {
            channel,
            input,
            out_dir,
            prefix,
            variable,
            series_prefix,
            reference,
            tag,
            partitions,
        } => {
            let overrides =
                export::Overrides { prefix, variable, series_prefix, reference, tag, partitions };
            export::cmd_export(channel, &input, &out_dir, overrides)
        }
        Commands::Plot { channel, config, input, out_dir, variables, format, style } => {
            plot::cmd_plot(
                channel,
                config.as_ref(),
                input,
                &out_dir,
                &variables,
                format,
                style.as_ref(),
            )
        }
        Commands::Config { channel } => skim::cmd_config(channel),
    }
}
