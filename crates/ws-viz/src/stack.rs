//! Stacked per-partition distributions of one variable (numbers-first).
//!
//! The artifact carries everything the renderer draws, so it can also be
//! written out as JSON and drawn elsewhere.

use serde::Serialize;

use ws_core::{Channel, Error, Result};
use ws_hist::{HistogramSet, bookings};

/// Schema version string of the JSON artifact.
pub const STACK_SCHEMA_V1: &str = "wskim_stack_v1";

/// One variable of one channel, every partition stacked.
#[derive(Debug, Clone, Serialize)]
pub struct StackArtifact {
    pub schema_version: String,
    pub channel: Channel,
    pub variable: String,
    pub x_label: String,
    pub y_label: String,
    pub bin_edges: Vec<f64>,
    /// Bottom of the stack first.
    pub samples: Vec<StackSample>,
    pub total_y: Vec<f64>,
}

/// One partition's contribution.
#[derive(Debug, Clone, Serialize)]
pub struct StackSample {
    pub partition: String,
    pub histogram: String,
    pub label: String,
    pub y: Vec<f64>,
    #[serde(rename = "yield")]
    pub yield_: f64,
}

impl StackArtifact {
    /// Largest stacked bin content.
    pub fn max_total(&self) -> f64 {
        self.total_y.iter().copied().fold(0.0_f64, f64::max)
    }
}

fn level_and_lepton(channel: Channel) -> (&'static str, &'static str) {
    match channel {
        Channel::Muon => ("Gen-level", "muon"),
        Channel::Tau => ("LHE-level", "tau"),
    }
}

/// Axis title of a skim variable.
pub fn axis_label(channel: Channel, variable: &str) -> String {
    let (level, lepton) = level_and_lepton(channel);
    let base = variable.strip_prefix("lhe_").unwrap_or(variable);
    match base {
        "pt_l" => format!("{level} {lepton} pT / GeV"),
        "pt_n" => format!("{level} neutrino pT / GeV"),
        "eta_l" => format!("{level} {lepton} η"),
        "eta_n" => format!("{level} neutrino η"),
        "phi_l" => format!("{level} {lepton} φ"),
        "phi_n" => format!("{level} neutrino φ"),
        "mass_l" | "m_l" => format!("{level} {lepton} mass / GeV"),
        "mass_n" | "m_n" => format!("{level} neutrino mass / GeV"),
        "pdgId_l" | "pdgId_n" => "pdgId".to_string(),
        "pt_genmet" => "GenMET pT / GeV".to_string(),
        "phi_genmet" => "GenMET φ".to_string(),
        "mt" => format!("{level} MT / GeV"),
        "mt_met" => "Gen-level transverse mass / GeV".to_string(),
        "m_inv" => format!("{level} invariant M(ℓν) / GeV"),
        "scalePDF" => "invariant M(ℓν) / GeV".to_string(),
        _ => variable.to_string(),
    }
}

/// Legend entry of a partition: `400to800` → `W→μν (M400-800)`,
/// an open-ended `6000` → `W→μν (M6000-inf)`.
pub fn partition_label(channel: Channel, partition: &str) -> String {
    let lepton = match channel {
        Channel::Muon => "μ",
        Channel::Tau => "τ",
    };
    let range = match partition.split_once("to") {
        Some((lo, hi)) => format!("{lo}-{hi}"),
        None => format!("{partition}-inf"),
    };
    format!("W→{lepton}ν (M{range})")
}

/// Stack `variable` over `partitions` (first partition at the bottom).
///
/// Every partition's histogram must exist and share the first one's binning.
pub fn build_stack(
    set: &HistogramSet,
    channel: Channel,
    partitions: &[String],
    variable: &str,
) -> Result<StackArtifact> {
    let Some(first) = partitions.first() else {
        return Err(Error::Validation("no partitions to stack".to_string()));
    };
    let reference = set.get(&format!("{}_{variable}", channel.label(first)))?;
    let n_bins = reference.n_bins();

    let mut samples = Vec::with_capacity(partitions.len());
    let mut total_y = vec![0.0; n_bins];
    for partition in partitions {
        let h = set.get(&format!("{}_{variable}", channel.label(partition)))?;
        if h.n_bins() != n_bins {
            return Err(Error::BinCountMismatch {
                name: h.name.clone(),
                expected: n_bins,
                actual: h.n_bins(),
            });
        }
        for (t, y) in total_y.iter_mut().zip(&h.bin_content) {
            *t += y;
        }
        samples.push(StackSample {
            partition: partition.clone(),
            histogram: h.name.clone(),
            label: partition_label(channel, partition),
            y: h.bin_content.clone(),
            yield_: h.integral(),
        });
    }

    Ok(StackArtifact {
        schema_version: STACK_SCHEMA_V1.to_string(),
        channel,
        variable: variable.to_string(),
        x_label: axis_label(channel, variable),
        y_label: "Events".to_string(),
        bin_edges: reference.bin_edges.clone(),
        samples,
        total_y,
    })
}

/// Stacks of `variables`, or of every booked variable of the channel when
/// `variables` is empty, in booking order.
pub fn build_stacks(
    set: &HistogramSet,
    channel: Channel,
    partitions: &[String],
    variables: &[String],
) -> Result<Vec<StackArtifact>> {
    let booked: Vec<&str> = bookings(channel).iter().map(|b| b.variable).collect();
    let selected: Vec<&str> = if variables.is_empty() {
        booked
    } else {
        for v in variables {
            if !booked.contains(&v.as_str()) {
                return Err(Error::Validation(format!(
                    "variable '{v}' is not booked for channel '{channel}'"
                )));
            }
        }
        variables.iter().map(String::as_str).collect()
    };
    selected.into_iter().map(|v| build_stack(set, channel, partitions, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_hist::Histogram;

    fn filled(name: &str, n_bins: usize, fills: &[(f64, f64)]) -> Histogram {
        let mut h = Histogram::uniform(name, n_bins, 0.0, 8000.0).unwrap();
        for &(x, w) in fills {
            h.fill(x, w);
        }
        h
    }

    fn parts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn stacks_in_partition_order() {
        let set = HistogramSet::new(vec![
            filled("tnu_400to800_lhe_m_inv", 4, &[(500.0, 2.0), (9000.0, 7.0)]),
            filled("tnu_6000_lhe_m_inv", 4, &[(500.0, 0.5), (6500.0, 1.0)]),
        ]);
        let art =
            build_stack(&set, Channel::Tau, &parts(&["400to800", "6000"]), "lhe_m_inv").unwrap();
        assert_eq!(art.bin_edges, vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0]);
        assert_eq!(art.samples[0].partition, "400to800");
        assert_eq!(art.samples[0].label, "W→τν (M400-800)");
        assert_eq!(art.samples[1].label, "W→τν (M6000-inf)");
        // Overflow stays out of the stack.
        assert_eq!(art.samples[0].yield_, 2.0);
        assert_eq!(art.total_y, vec![2.5, 0.0, 0.0, 1.0]);
        assert_eq!(art.max_total(), 2.5);
        assert_eq!(art.x_label, "LHE-level invariant M(ℓν) / GeV");
    }

    #[test]
    fn missing_partition_histogram() {
        let set = HistogramSet::new(vec![filled("mnu_400to800_m_inv", 4, &[])]);
        let err = build_stack(&set, Channel::Muon, &parts(&["400to800", "6000"]), "m_inv")
            .unwrap_err();
        assert!(matches!(err, Error::MissingHistogram(ref n) if n == "mnu_6000_m_inv"));
    }

    #[test]
    fn binning_must_agree() {
        let set = HistogramSet::new(vec![
            filled("mnu_400to800_m_inv", 4, &[]),
            filled("mnu_6000_m_inv", 8, &[]),
        ]);
        let err = build_stack(&set, Channel::Muon, &parts(&["400to800", "6000"]), "m_inv")
            .unwrap_err();
        assert!(matches!(err, Error::BinCountMismatch { expected: 4, actual: 8, .. }));
    }

    #[test]
    fn unbooked_variable_rejected() {
        let set = HistogramSet::default();
        let err = build_stacks(&set, Channel::Muon, &parts(&["6000"]), &parts(&["lhe_m_inv"]))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn labels() {
        assert_eq!(axis_label(Channel::Muon, "pt_l"), "Gen-level muon pT / GeV");
        assert_eq!(axis_label(Channel::Tau, "lhe_eta_n"), "LHE-level neutrino η");
        assert_eq!(axis_label(Channel::Tau, "scalePDF"), "invariant M(ℓν) / GeV");
        assert_eq!(partition_label(Channel::Muon, "120to200"), "W→μν (M120-200)");
    }
}
