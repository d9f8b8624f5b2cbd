//! Analysis channels and their naming conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of columns in a skim row.
pub const SKIM_COLUMN_COUNT: usize = 20;

const MUON_COLUMNS: [&str; SKIM_COLUMN_COUNT] = [
    "pt_l",
    "eta_l",
    "phi_l",
    "mass_l",
    "pdgId_l",
    "pt_n",
    "eta_n",
    "phi_n",
    "mass_n",
    "pdgId_n",
    "pt_genmet",
    "phi_genmet",
    "p4_l",
    "p4_n",
    "p4",
    "m_inv",
    "scalePDF",
    "mt",
    "mt_met",
    "weight",
];

const TAU_COLUMNS: [&str; SKIM_COLUMN_COUNT] = [
    "lhe_pt_l",
    "lhe_eta_l",
    "lhe_phi_l",
    "lhe_m_l",
    "lhe_pdgId_l",
    "lhe_pt_n",
    "lhe_eta_n",
    "lhe_phi_n",
    "lhe_m_n",
    "lhe_pdgId_n",
    "pt_genmet",
    "phi_genmet",
    "lhe_p4_l",
    "lhe_p4_n",
    "lhe_p4",
    "lhe_m_inv",
    "scalePDF",
    "lhe_mt",
    "lhe_mt_met",
    "weight",
];

/// Decay channel of the W candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// W → μν, selected from the `GenPart` collection.
    Muon,
    /// W → τν, read from the `LHEPart` collection.
    Tau,
}

impl Channel {
    /// Channel name as used on the command line and in metadata.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Muon => "muon",
            Channel::Tau => "tau",
        }
    }

    /// Single-letter tag used in file names (`_Skim_m_`, `histograms_t_`).
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Muon => "m",
            Channel::Tau => "t",
        }
    }

    /// Particle collection the channel reads (`<collection>_pt`, ...).
    pub fn collection(self) -> &'static str {
        match self {
            Channel::Muon => "GenPart",
            Channel::Tau => "LHEPart",
        }
    }

    /// Prefix of histogram labels (`mnu_400to800`).
    pub fn label_prefix(self) -> &'static str {
        match self {
            Channel::Muon => "mnu",
            Channel::Tau => "tnu",
        }
    }

    /// Column holding the invariant mass of the pair.
    pub fn mass_column(self) -> &'static str {
        self.columns()[15]
    }

    /// Output column names in projection order.
    pub fn columns(self) -> &'static [&'static str; SKIM_COLUMN_COUNT] {
        match self {
            Channel::Muon => &MUON_COLUMNS,
            Channel::Tau => &TAU_COLUMNS,
        }
    }

    /// Skim file name for a partition.
    pub fn skim_file_name(self, partition: &str, tag: &str) -> String {
        format!("{partition}_Skim_{}_{tag}.parquet", self.tag())
    }

    /// Histogram results file name.
    pub fn histogram_file_name(self, tag: &str) -> String {
        format!("histograms_{}_{tag}.parquet", self.tag())
    }

    /// Histogram label of a partition.
    pub fn label(self, partition: &str) -> String {
        format!("{}_{partition}", self.label_prefix())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "muon" | "mu" | "m" => Ok(Channel::Muon),
            "tau" | "t" => Ok(Channel::Tau),
            other => Err(Error::Validation(format!(
                "unknown channel '{other}' (expected 'muon' or 'tau')"
            ))),
        }
    }
}
