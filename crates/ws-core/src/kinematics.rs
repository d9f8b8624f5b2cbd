//! Four-vector kinematics used to derive skim variables.
//!
//! All functions are pure and operate on `f64`. The conventions follow the
//! usual collider parameterization: transverse momentum `pt`, pseudorapidity
//! `eta`, azimuth `phi` and mass `m`, with the energy fixed by the mass shell.

use std::f64::consts::PI;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Pseudorapidity assigned to vectors along the beam axis (`pt == 0`), offset by `pz`.
const ETA_MAX: f64 = 22756.0;

/// Azimuth difference `phi2 - phi1` folded into `(-π, π]`.
///
/// The raw difference is reduced with a truncated remainder (sign of the
/// dividend) and then corrected once by `±2π`. The correction is applied a
/// single time, so inputs are expected to be proper azimuths.
#[inline]
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let mut r = (phi2 - phi1) % (2.0 * PI);
    if r <= -PI {
        r += 2.0 * PI;
    } else if r > PI {
        r -= 2.0 * PI;
    }
    r
}

/// Transverse mass of two objects: `sqrt(2 pt1 pt2 (1 - cos Δφ))`.
#[inline]
pub fn transverse_mass(pt1: f64, phi1: f64, pt2: f64, phi2: f64) -> f64 {
    let dphi = delta_phi(phi1, phi2);
    (2.0 * pt1 * pt2 * (1.0 - dphi.cos())).sqrt()
}

/// Invariant mass of the sum of two four-vectors.
#[inline]
pub fn invariant_mass(a: &FourVector, b: &FourVector) -> f64 {
    (*a + *b).m()
}

/// Lorentz vector in Cartesian components `(px, py, pz, E)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FourVector {
    /// x component of the momentum.
    pub px: f64,
    /// y component of the momentum.
    pub py: f64,
    /// z component of the momentum.
    pub pz: f64,
    /// Energy.
    pub e: f64,
}

impl FourVector {
    /// Build from Cartesian components.
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Build from `(pt, eta, phi, m)`; the energy is taken from the mass shell.
    ///
    /// A negative mass is treated as space-like (`m² = -m·m`), and the energy
    /// is clamped at zero.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        let m2 = if m >= 0.0 { m * m } else { -m * m };
        let e2 = p2 + m2;
        let e = if e2 > 0.0 { e2.sqrt() } else { 0.0 };
        Self { px, py, pz, e }
    }

    /// Squared momentum magnitude.
    #[inline]
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Transverse momentum.
    #[inline]
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Azimuth in `(-π, π]`, zero for vectors along the beam axis.
    #[inline]
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 { 0.0 } else { self.py.atan2(self.px) }
    }

    /// Pseudorapidity.
    pub fn eta(&self) -> f64 {
        let rho = self.pt();
        if rho > 0.0 {
            (self.pz / rho).asinh()
        } else if self.pz == 0.0 {
            0.0
        } else if self.pz > 0.0 {
            self.pz + ETA_MAX
        } else {
            self.pz - ETA_MAX
        }
    }

    /// Squared invariant mass `E² - p²`.
    #[inline]
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass; space-like vectors return `-sqrt(-m²)`.
    pub fn m(&self) -> f64 {
        let mm = self.m2();
        if mm >= 0.0 { mm.sqrt() } else { -(-mm).sqrt() }
    }

    /// Convert to the `(pt, eta, phi, m)` parameterization.
    pub fn to_pt_eta_phi_m(&self) -> PtEtaPhiM {
        PtEtaPhiM { pt: self.pt(), eta: self.eta(), phi: self.phi(), m: self.m() }
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

/// Four-vector stored as `(pt, eta, phi, m)`, the form written to skims.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PtEtaPhiM {
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth in `(-π, π]`.
    pub phi: f64,
    /// Mass.
    pub m: f64,
}

impl PtEtaPhiM {
    /// Construct, restricting `phi` to `(-π, π]`.
    ///
    /// A negative `pt` is flipped: the vector is mirrored (`eta → -eta`,
    /// `phi → phi - π`).
    pub fn new(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let (pt, eta, phi) = if pt < 0.0 { (-pt, -eta, phi - PI) } else { (pt, eta, phi) };
        Self { pt, eta, phi: restrict_phi(phi), m }
    }

    /// Cartesian form.
    pub fn to_four_vector(&self) -> FourVector {
        FourVector::from_pt_eta_phi_m(self.pt, self.eta, self.phi, self.m)
    }
}

impl From<FourVector> for PtEtaPhiM {
    fn from(v: FourVector) -> Self {
        v.to_pt_eta_phi_m()
    }
}

impl Add for PtEtaPhiM {
    type Output = PtEtaPhiM;

    fn add(self, rhs: PtEtaPhiM) -> PtEtaPhiM {
        (self.to_four_vector() + rhs.to_four_vector()).into()
    }
}

fn restrict_phi(phi: f64) -> f64 {
    if phi > -PI && phi <= PI {
        return phi;
    }
    let r = phi - ((phi / (2.0 * PI)) + 0.5).floor() * 2.0 * PI;
    if r <= -PI { r + 2.0 * PI } else { r }
}
