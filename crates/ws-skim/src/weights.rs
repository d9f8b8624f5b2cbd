//! Per-partition event weights.

use std::collections::BTreeMap;

use ws_core::{Channel, Error, Result};

use crate::config::SkimConfig;

/// Partition → `cross_section / generated_events * luminosity`.
///
/// Built once per job; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    channel: Channel,
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    /// Build the table for every configured partition.
    ///
    /// A partition without a sample entry fails with
    /// [`Error::UnknownPartition`] before any input is touched.
    pub fn from_config(config: &SkimConfig) -> Result<Self> {
        config.validate()?;
        let mut weights = BTreeMap::new();
        for partition in &config.partitions {
            let sample = config.samples.get(partition).ok_or_else(|| Error::UnknownPartition {
                channel: config.channel.name().to_string(),
                partition: partition.clone(),
            })?;
            let weight = sample.cross_section / sample.generated_events as f64 * config.luminosity;
            weights.insert(partition.clone(), weight);
        }
        Ok(Self { channel: config.channel, weights })
    }

    /// Weight of a partition.
    pub fn weight(&self, partition: &str) -> Result<f64> {
        self.weights.get(partition).copied().ok_or_else(|| Error::UnknownPartition {
            channel: self.channel.name().to_string(),
            partition: partition.to_string(),
        })
    }

    /// Number of partitions in the table.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
