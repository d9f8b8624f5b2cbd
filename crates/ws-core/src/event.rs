//! Generator-level event records and the skim row projection.

use crate::error::{Error, Result};
use crate::kinematics::PtEtaPhiM;

/// One generator particle, gathered from the parallel arrays of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    /// PDG identity code (signed).
    pub pdg_id: i32,
    /// Generator status code (`1` = final state).
    pub status: i32,
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth.
    pub phi: f64,
    /// Mass.
    pub mass: f64,
}

impl Particle {
    /// Whether the particle is final state with `|pdg_id| == abs_id`.
    #[inline]
    pub fn is_final_state(&self, abs_id: i32) -> bool {
        self.pdg_id.abs() == abs_id && self.status == 1
    }

    /// Four-vector in `(pt, eta, phi, m)` form.
    pub fn p4(&self) -> PtEtaPhiM {
        PtEtaPhiM::new(self.pt, self.eta, self.phi, self.mass)
    }
}

/// Variable-length particle collection stored as parallel arrays.
///
/// All arrays have the same length; this is checked on construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticleArrays {
    pdg_id: Vec<i32>,
    status: Vec<i32>,
    pt: Vec<f64>,
    eta: Vec<f64>,
    phi: Vec<f64>,
    mass: Vec<f64>,
}

impl ParticleArrays {
    /// Build from parallel arrays, rejecting ragged input.
    pub fn new(
        pdg_id: Vec<i32>,
        status: Vec<i32>,
        pt: Vec<f64>,
        eta: Vec<f64>,
        phi: Vec<f64>,
        mass: Vec<f64>,
    ) -> Result<Self> {
        let n = pdg_id.len();
        let lens = [status.len(), pt.len(), eta.len(), phi.len(), mass.len()];
        if lens.iter().any(|&l| l != n) {
            return Err(Error::SchemaMismatch(format!(
                "particle arrays have inconsistent lengths: pdgId={n}, status/pt/eta/phi/mass={lens:?}"
            )));
        }
        Ok(Self { pdg_id, status, pt, eta, phi, mass })
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.pdg_id.len()
    }

    /// Whether the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pdg_id.is_empty()
    }

    /// Particle at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Particle> {
        if index >= self.len() {
            return None;
        }
        Some(Particle {
            pdg_id: self.pdg_id[index],
            status: self.status[index],
            pt: self.pt[index],
            eta: self.eta[index],
            phi: self.phi[index],
            mass: self.mass[index],
        })
    }

    /// Particle at a fixed slot the caller relies on being present.
    ///
    /// A collection too short for `index` is a schema mismatch of the input,
    /// reported with the collection name.
    pub fn slot(&self, collection: &str, index: usize) -> Result<Particle> {
        self.get(index).ok_or_else(|| {
            Error::SchemaMismatch(format!(
                "{collection} has {} entries, slot {index} requested",
                self.len()
            ))
        })
    }

    /// Iterate particles in array order.
    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Index of the first particle matching `pred`.
    pub fn position(&self, pred: impl Fn(&Particle) -> bool) -> Option<usize> {
        self.iter().position(|p| pred(&p))
    }

    /// Identity codes.
    pub fn pdg_ids(&self) -> &[i32] {
        &self.pdg_id
    }

    /// Status codes.
    pub fn statuses(&self) -> &[i32] {
        &self.status
    }
}

impl FromIterator<Particle> for ParticleArrays {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        let mut out = ParticleArrays::default();
        for p in iter {
            out.pdg_id.push(p.pdg_id);
            out.status.push(p.status);
            out.pt.push(p.pt);
            out.eta.push(p.eta);
            out.phi.push(p.phi);
            out.mass.push(p.mass);
        }
        out
    }
}

/// Generator-level missing transverse momentum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MissingEt {
    /// Magnitude.
    pub pt: f64,
    /// Azimuth.
    pub phi: f64,
}

/// One event of an input partition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenEvent {
    /// Particle collection of the channel (`GenPart` or `LHEPart`).
    pub particles: ParticleArrays,
    /// Generator MET.
    pub met: MissingEt,
    /// PDF scale of the hard process.
    pub scale_pdf: f64,
}

/// Projected output row of a skim, one per surviving event.
///
/// Field order matches [`Channel::columns`](crate::Channel::columns).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkimRow {
    /// Selected charged lepton.
    pub lepton: Particle,
    /// Selected neutrino.
    pub neutrino: Particle,
    /// Generator MET.
    pub met: MissingEt,
    /// Lepton four-vector.
    pub p4_l: PtEtaPhiM,
    /// Neutrino four-vector.
    pub p4_n: PtEtaPhiM,
    /// Sum of lepton and neutrino.
    pub p4: PtEtaPhiM,
    /// Invariant mass of the pair.
    pub m_inv: f64,
    /// PDF scale of the hard process.
    pub scale_pdf: f64,
    /// Transverse mass of the lepton and the neutrino.
    pub mt: f64,
    /// Transverse mass of the lepton and the generator MET.
    pub mt_met: f64,
    /// Per-partition event weight.
    pub weight: f64,
}
