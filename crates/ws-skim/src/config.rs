//! Skim job configuration.
//!
//! A config names the channel, where the partitions live, which partitions to
//! process and the cross section / generated event count of each sample.
//! Built-in defaults reproduce the 2022 post-EE `WtoLNu-4Jets` production.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ws_core::{Channel, Error, Result};

/// Cross section and generated event count of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleInfo {
    /// Cross section (pb).
    pub cross_section: f64,
    /// Number of generated events before any selection.
    pub generated_events: u64,
}

/// Configuration of one skim job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkimConfig {
    /// Decay channel.
    pub channel: Channel,
    /// Directory holding one sub-directory per partition.
    pub base_path: PathBuf,
    /// Tag appended to output file names.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Integrated luminosity multiplying every weight.
    #[serde(default = "default_luminosity")]
    pub luminosity: f64,
    /// Partitions to process, in order.
    pub partitions: Vec<String>,
    /// Sample table keyed by partition name.
    #[serde(default)]
    pub samples: BTreeMap<String, SampleInfo>,
}

fn default_tag() -> String {
    "mgmlm".to_string()
}

fn default_luminosity() -> f64 {
    1.0
}

const DEFAULT_BASE_PATH: &str = "WtoLNu-4Jets_mgmlm/EE";

/// Generated events per partition, shared by both channels.
const GENERATED_EVENTS: [(&str, u64); 7] = [
    ("120to200", 123_093_091),
    ("400to800", 3_598_198),
    ("800to1500", 3_295_801),
    ("1500to2500", 3_302_117),
    ("2500to4000", 3_351_427),
    ("4000to6000", 3_222_531),
    ("6000", 3_668_638),
];

const MUON_CROSS_SECTIONS: [(&str, f64); 7] = [
    ("120to200", 471.507),
    ("400to800", 7.78643),
    ("800to1500", 0.690298),
    ("1500to2500", 0.0482412),
    ("2500to4000", 0.00298857),
    ("4000to6000", 0.00011405),
    ("6000", 0.0000046658),
];

const TAU_CROSS_SECTIONS: [(&str, f64); 6] = [
    ("400to800", 1.600e+00),
    ("800to1500", 1.091e-01),
    ("1500to2500", 6.536e-03),
    ("2500to4000", 3.484e-04),
    ("4000to6000", 1.077e-05),
    ("6000", 4.209e-07),
];

impl SkimConfig {
    /// Built-in configuration of a channel.
    pub fn builtin(channel: Channel) -> Self {
        let cross_sections: &[(&str, f64)] = match channel {
            Channel::Muon => &MUON_CROSS_SECTIONS,
            Channel::Tau => &TAU_CROSS_SECTIONS,
        };
        let mut partitions = Vec::with_capacity(cross_sections.len());
        let mut samples = BTreeMap::new();
        for &(name, cross_section) in cross_sections {
            let generated_events = GENERATED_EVENTS
                .iter()
                .find(|(p, _)| *p == name)
                .map(|&(_, n)| n)
                .unwrap_or_default();
            partitions.push(name.to_string());
            samples.insert(name.to_string(), SampleInfo { cross_section, generated_events });
        }
        Self {
            channel,
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            tag: default_tag(),
            luminosity: default_luminosity(),
            partitions,
            samples,
        }
    }

    /// Check values that would make every weight meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.luminosity.is_finite() && self.luminosity > 0.0) {
            return Err(Error::Validation(format!(
                "luminosity must be finite and > 0, got {}",
                self.luminosity
            )));
        }
        if self.partitions.is_empty() {
            return Err(Error::Validation("no partitions configured".to_string()));
        }
        if self.tag.is_empty() {
            return Err(Error::Validation("tag must not be empty".to_string()));
        }
        for (name, sample) in &self.samples {
            if sample.generated_events == 0 {
                return Err(Error::Validation(format!("sample '{name}': generated_events is 0")));
            }
            if !sample.cross_section.is_finite() || sample.cross_section < 0.0 {
                return Err(Error::Validation(format!(
                    "sample '{name}': cross_section must be finite and >= 0, got {}",
                    sample.cross_section
                )));
            }
        }
        Ok(())
    }

    /// Directory of one partition.
    pub fn partition_dir(&self, partition: &str) -> PathBuf {
        self.base_path.join(partition)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

/// Read a skim config from YAML, or JSON when the extension is `.json`.
pub fn read_skim_config(path: &Path) -> Result<SkimConfig> {
    let bytes = std::fs::read(path)?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let cfg: SkimConfig = if ext == "json" {
        serde_json::from_slice(&bytes)?
    } else {
        serde_yaml_ng::from_slice(&bytes)?
    };
    cfg.validate()?;
    Ok(cfg)
}
