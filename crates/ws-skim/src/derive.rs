//! Derived skim columns.

use ws_core::{GenEvent, SkimRow, invariant_mass, transverse_mass};

use crate::select::Selected;

/// Build the output row of a selected event.
pub fn derive_row(event: &GenEvent, selected: &Selected, weight: f64) -> SkimRow {
    let lepton = selected.lepton;
    let neutrino = selected.neutrino;
    let met = event.met;

    let p4_l = lepton.p4();
    let p4_n = neutrino.p4();
    let (v_l, v_n) = (p4_l.to_four_vector(), p4_n.to_four_vector());

    SkimRow {
        lepton,
        neutrino,
        met,
        p4_l,
        p4_n,
        p4: (v_l + v_n).into(),
        m_inv: invariant_mass(&v_l, &v_n),
        scale_pdf: event.scale_pdf,
        mt: transverse_mass(lepton.pt, lepton.phi, neutrino.pt, neutrino.phi),
        mt_met: transverse_mass(lepton.pt, lepton.phi, met.pt, met.phi),
        weight,
    }
}
