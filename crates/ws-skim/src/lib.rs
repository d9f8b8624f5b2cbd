//! # ws-skim
//!
//! Generator-level W → ℓν skimming.
//!
//! A skim job walks the configured partitions one at a time. For each it
//! loads the events ([`ws_io::read_partition`]), runs the channel's
//! [`PairSelector`] over them in parallel, derives the kinematic columns
//! ([`derive::derive_row`]), attaches the partition weight from the
//! [`WeightTable`] and writes the projection with [`ws_io::write_skim`].
//!
//! ```
//! use ws_core::Channel;
//! use ws_skim::{SkimConfig, WeightTable};
//!
//! let config = SkimConfig::builtin(Channel::Muon);
//! let weights = WeightTable::from_config(&config).unwrap();
//! let w = weights.weight("400to800").unwrap();
//! assert_eq!(w, 7.78643 / 3598198.0 * 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod cutflow;
pub mod derive;
pub mod pipeline;
pub mod select;
pub mod weights;

pub use config::{SampleInfo, SkimConfig, read_skim_config};
pub use cutflow::CutFlow;
pub use pipeline::{
    PartitionSummary, SkimOutcome, process_events, run_partition, run_skim, selector_for,
};
pub use select::{LeptonPair, MuonPairSelector, PairSelector, Selected, TauSlotSelector, Verdict};
pub use weights::WeightTable;
