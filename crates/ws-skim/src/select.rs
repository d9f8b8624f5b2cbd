//! Lepton/neutrino pair selection.
//!
//! Each channel has its own [`PairSelector`]. A selector names its cuts in
//! order and, per event, either returns the selected pair or the index of the
//! first cut the event failed. Failing a cut drops the event; errors are
//! reserved for input that does not have the expected shape.

use ws_core::{GenEvent, Particle, Result};

/// PDG code of the muon.
pub const MUON: i32 = 13;
/// PDG code of the muon neutrino.
pub const MUON_NEUTRINO: i32 = 14;
/// PDG code of the tau.
pub const TAU: i32 = 15;
/// PDG code of the tau neutrino.
pub const TAU_NEUTRINO: i32 = 16;

/// Indices of the selected lepton and neutrino in the particle arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeptonPair {
    /// Lepton index, if one was found.
    pub lepton: Option<usize>,
    /// Neutrino index, if one was found.
    pub neutrino: Option<usize>,
}

impl LeptonPair {
    /// Integer view with `-1` for "not found".
    pub fn indices(&self) -> (i32, i32) {
        let as_i32 = |i: Option<usize>| i.map_or(-1, |i| i as i32);
        (as_i32(self.lepton), as_i32(self.neutrino))
    }
}

/// A pair that passed every cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selected {
    /// Where the pair sits in the particle arrays.
    pub pair: LeptonPair,
    /// The charged lepton.
    pub lepton: Particle,
    /// The neutrino.
    pub neutrino: Particle,
}

/// Outcome of selecting one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// The event passed all cuts.
    Pass(Selected),
    /// The event failed the cut at this index of [`PairSelector::cuts`].
    Fail {
        /// Index of the first failed cut.
        cut: usize,
    },
}

impl Verdict {
    /// The selected pair, if the event passed.
    pub fn selected(&self) -> Option<&Selected> {
        match self {
            Verdict::Pass(s) => Some(s),
            Verdict::Fail { .. } => None,
        }
    }
}

/// Channel-specific event selection.
pub trait PairSelector: Sync {
    /// Cut names in application order.
    fn cuts(&self) -> &'static [&'static str];

    /// Select the pair of one event.
    fn select(&self, event: &GenEvent) -> Result<Verdict>;
}

/// Muon channel: first final-state muon and first final-state muon neutrino,
/// required to carry opposite-sign identity codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuonPairSelector;

impl MuonPairSelector {
    /// Cut names.
    pub const CUTS: [&'static str; 3] =
        ["valid lepton index", "valid neutrino index", "opposite-sign pdgId"];

    /// Locate the pair without applying any cut.
    pub fn find_pair(&self, event: &GenEvent) -> LeptonPair {
        let parts = &event.particles;
        LeptonPair {
            lepton: parts.position(|p| p.is_final_state(MUON)),
            neutrino: parts.position(|p| p.is_final_state(MUON_NEUTRINO)),
        }
    }
}

impl PairSelector for MuonPairSelector {
    fn cuts(&self) -> &'static [&'static str] {
        &Self::CUTS
    }

    fn select(&self, event: &GenEvent) -> Result<Verdict> {
        let pair = self.find_pair(event);
        let Some(lepton) = pair.lepton.and_then(|i| event.particles.get(i)) else {
            return Ok(Verdict::Fail { cut: 0 });
        };
        let Some(neutrino) = pair.neutrino.and_then(|i| event.particles.get(i)) else {
            return Ok(Verdict::Fail { cut: 1 });
        };
        // i64 so extreme codes cannot overflow the product.
        if (lepton.pdg_id as i64) * (neutrino.pdg_id as i64) >= 0 {
            return Ok(Verdict::Fail { cut: 2 });
        }
        Ok(Verdict::Pass(Selected { pair, lepton, neutrino }))
    }
}

/// Tau channel: gate on a final-state tau and tau neutrino anywhere in the
/// LHE record, then take the pair from fixed slots.
#[derive(Debug, Clone, Copy)]
pub struct TauSlotSelector {
    collection: &'static str,
    lepton_slot: usize,
    neutrino_slot: usize,
}

impl Default for TauSlotSelector {
    fn default() -> Self {
        Self { collection: "LHEPart", lepton_slot: 2, neutrino_slot: 3 }
    }
}

impl TauSlotSelector {
    /// Cut names.
    pub const CUTS: [&'static str; 2] =
        ["event has final-state tau", "event has final-state tau neutrino"];
}

impl PairSelector for TauSlotSelector {
    fn cuts(&self) -> &'static [&'static str] {
        &Self::CUTS
    }

    fn select(&self, event: &GenEvent) -> Result<Verdict> {
        let parts = &event.particles;
        if parts.position(|p| p.is_final_state(TAU)).is_none() {
            return Ok(Verdict::Fail { cut: 0 });
        }
        if parts.position(|p| p.is_final_state(TAU_NEUTRINO)).is_none() {
            return Ok(Verdict::Fail { cut: 1 });
        }
        let lepton = parts.slot(self.collection, self.lepton_slot)?;
        let neutrino = parts.slot(self.collection, self.neutrino_slot)?;
        let pair =
            LeptonPair { lepton: Some(self.lepton_slot), neutrino: Some(self.neutrino_slot) };
        Ok(Verdict::Pass(Selected { pair, lepton, neutrino }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ws_core::{Error, MissingEt, ParticleArrays};

    fn event(ids: &[(i32, i32)]) -> GenEvent {
        let particles: ParticleArrays = ids
            .iter()
            .map(|&(pdg_id, status)| Particle { pdg_id, status, pt: 50.0, ..Default::default() })
            .collect();
        GenEvent { particles, met: MissingEt::default(), scale_pdf: 0.0 }
    }

    #[test]
    fn muon_pair_found_at_first_matches() {
        let ev = event(&[(2, 21), (21, 21), (13, 1), (13, 2), (-14, 2), (-14, 1), (13, 1)]);
        let sel = MuonPairSelector;
        assert_eq!(sel.find_pair(&ev).indices(), (2, 5));
        let v = sel.select(&ev).unwrap();
        let s = v.selected().unwrap();
        assert_eq!(s.lepton.pdg_id, 13);
        assert_eq!(s.neutrino.pdg_id, -14);
    }

    #[test]
    fn muon_missing_lepton() {
        let ev = event(&[(13, 2), (-14, 1)]);
        let sel = MuonPairSelector;
        assert_eq!(sel.find_pair(&ev).indices(), (-1, 1));
        assert_eq!(sel.select(&ev).unwrap(), Verdict::Fail { cut: 0 });
    }

    #[test]
    fn muon_missing_neutrino() {
        let ev = event(&[(-13, 1), (12, 1)]);
        assert_eq!(MuonPairSelector.select(&ev).unwrap(), Verdict::Fail { cut: 1 });
    }

    #[test]
    fn muon_same_sign_rejected() {
        let ev = event(&[(13, 1), (14, 1)]);
        assert_eq!(MuonPairSelector.select(&ev).unwrap(), Verdict::Fail { cut: 2 });
        let ev = event(&[(-13, 1), (14, 1)]);
        assert!(MuonPairSelector.select(&ev).unwrap().selected().is_some());
    }

    #[test]
    fn tau_gate_ignores_slots() {
        // Slots 2 and 3 are populated but there is no final-state tau.
        let ev = event(&[(2, -1), (-1, -1), (15, 2), (-16, 1)]);
        assert_eq!(TauSlotSelector::default().select(&ev).unwrap(), Verdict::Fail { cut: 0 });
        let ev = event(&[(2, -1), (-1, -1), (15, 1), (-12, 1)]);
        assert_eq!(TauSlotSelector::default().select(&ev).unwrap(), Verdict::Fail { cut: 1 });
    }

    #[test]
    fn tau_reads_fixed_slots() {
        let ev = event(&[(2, -1), (-1, -1), (-16, 1), (15, 1), (21, 1)]);
        let v = TauSlotSelector::default().select(&ev).unwrap();
        let s = v.selected().unwrap();
        assert_eq!(s.pair.indices(), (2, 3));
        assert_eq!(s.lepton.pdg_id, -16);
        assert_eq!(s.neutrino.pdg_id, 15);
    }

    #[test]
    fn tau_short_record_is_schema_mismatch() {
        let ev = event(&[(15, 1), (16, 1), (21, -1)]);
        let err = TauSlotSelector::default().select(&ev).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(ref m) if m.contains("LHEPart")));
    }
}
