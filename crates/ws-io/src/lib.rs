//! # ws-io
//!
//! Apache Arrow / Parquet I/O for wskim.
//!
//! - [`events`]: flat generator ntuples (`<C>_pdgId`, `<C>_pt`, ..., `GenMET_pt`)
//!   → [`GenEvent`](ws_core::GenEvent) records, one directory per partition.
//! - [`skim`]: [`SkimRow`](ws_core::SkimRow) projections → one Parquet file per
//!   partition, and column reads back for histogramming.
//! - [`parquet`]: shared read/write helpers.
//! - [`columns`]: typed column extraction with widening casts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod columns;
pub mod events;
pub mod parquet;
pub mod skim;

pub use events::{read_event_file, read_partition, write_event_file};
pub use skim::{read_skim_columns, skim_metadata, write_skim};

/// Parquet metadata key for the schema version.
pub const META_KEY_SCHEMA_VERSION: &str = "wskim.schema_version";

/// Parquet metadata key for the channel name.
pub const META_KEY_CHANNEL: &str = "wskim.channel";

/// Parquet metadata key for the partition name.
pub const META_KEY_PARTITION: &str = "wskim.partition";
