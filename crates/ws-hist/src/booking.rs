//! Histogram bookings per channel.

use ws_core::Channel;

use crate::filler::HistogramSpec;
use crate::histogram::uniform_edges;

/// Binning of one skim variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Booking {
    /// Skim column.
    pub variable: &'static str,
    /// Number of bins.
    pub bins: usize,
    /// Lower edge.
    pub low: f64,
    /// Upper edge.
    pub high: f64,
}

const fn book(variable: &'static str, bins: usize, low: f64, high: f64) -> Booking {
    Booking { variable, bins, low, high }
}

const MUON_BOOKINGS: [Booking; 16] = [
    book("pt_l", 100, 0.0, 5000.0),
    book("pt_n", 100, 0.0, 5000.0),
    book("eta_l", 30, -2.5, 2.5),
    book("eta_n", 30, -2.5, 2.5),
    book("phi_l", 30, -3.14, 3.14),
    book("phi_n", 30, -3.14, 3.14),
    book("pdgId_l", 40, -20.0, 20.0),
    book("pdgId_n", 40, -20.0, 20.0),
    book("pt_genmet", 100, 0.0, 5000.0),
    book("phi_genmet", 30, -3.14, 3.14),
    book("mass_l", 30, 0.0, 2.0),
    book("mass_n", 30, 0.0, 2.0),
    book("mt", 400, 0.0, 8000.0),
    book("mt_met", 400, 0.0, 8000.0),
    book("m_inv", 400, 0.0, 8000.0),
    book("scalePDF", 400, 0.0, 8000.0),
];

const TAU_BOOKINGS: [Booking; 16] = [
    book("lhe_pt_l", 100, 0.0, 5000.0),
    book("lhe_pt_n", 100, 0.0, 5000.0),
    book("lhe_eta_l", 30, -3.0, 3.0),
    book("lhe_eta_n", 30, -3.0, 3.0),
    book("lhe_phi_l", 30, -3.14, 3.14),
    book("lhe_phi_n", 30, -3.14, 3.14),
    book("lhe_pdgId_l", 40, -20.0, 20.0),
    book("lhe_pdgId_n", 40, -20.0, 20.0),
    book("pt_genmet", 100, 0.0, 5000.0),
    book("phi_genmet", 30, -3.14, 3.14),
    book("lhe_m_l", 30, 0.0, 2.0),
    book("lhe_m_n", 30, 0.0, 2.0),
    book("lhe_mt", 200, 0.0, 8000.0),
    book("lhe_mt_met", 200, 0.0, 8000.0),
    book("lhe_m_inv", 200, 0.0, 8000.0),
    book("scalePDF", 200, 0.0, 8000.0),
];

/// Bookings of a channel, in output order.
pub fn bookings(channel: Channel) -> &'static [Booking] {
    match channel {
        Channel::Muon => &MUON_BOOKINGS,
        Channel::Tau => &TAU_BOOKINGS,
    }
}

impl Booking {
    /// Histogram name under a label: `<label>_<variable>`.
    pub fn histogram_name(&self, label: &str) -> String {
        format!("{label}_{}", self.variable)
    }

    /// Fill spec for this booking under `label`.
    pub fn spec(&self, label: &str) -> HistogramSpec {
        HistogramSpec {
            name: self.histogram_name(label),
            variable: self.variable.to_string(),
            bin_edges: uniform_edges(self.bins, self.low, self.high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookings_cover_scalar_columns() {
        for channel in [Channel::Muon, Channel::Tau] {
            let columns = channel.columns();
            for b in bookings(channel) {
                assert!(columns.contains(&b.variable), "{channel}: {}", b.variable);
            }
        }
    }

    #[test]
    fn tau_mass_binning() {
        let b = bookings(Channel::Tau).iter().find(|b| b.variable == "lhe_m_inv").unwrap();
        let spec = b.spec(&Channel::Tau.label("400to800"));
        assert_eq!(spec.name, "tnu_400to800_lhe_m_inv");
        assert_eq!(spec.bin_edges.len(), 201);
        assert_eq!(spec.bin_edges[1], 40.0);
    }
}
