//! # ws-hist
//!
//! Weighted 1-D histograms over skim outputs.
//!
//! - [`booking`]: per-channel variable bookings (bins, range).
//! - [`filler`]: single-pass filling from column data.
//! - [`fill`]: the histogramming step over all partitions of a channel.
//! - [`results`]: histogram results file (Parquet).
//! - [`export`]: `(bin_center, bin_content)` text dumps.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod booking;
pub mod export;
pub mod fill;
pub mod filler;
pub mod histogram;
pub mod results;

pub use booking::{Booking, bookings};
pub use export::{ExportConfig, export_histograms};
pub use fill::fill_channel;
pub use histogram::Histogram;
pub use results::{HistogramSet, read_histograms, write_histograms};
