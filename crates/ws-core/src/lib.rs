//! # ws-core
//!
//! Core types for wskim: the generator-level event model, the skim row
//! projection, channel definitions, four-vector kinematics and the shared
//! error type.
//!
//! ## Example
//!
//! ```
//! use ws_core::kinematics::{FourVector, invariant_mass, transverse_mass};
//!
//! let l = FourVector::from_pt_eta_phi_m(40.0, 0.3, 1.2, 0.105);
//! let n = FourVector::from_pt_eta_phi_m(35.0, -0.8, -1.9, 0.0);
//! let m = invariant_mass(&l, &n);
//! let mt = transverse_mass(40.0, 1.2, 35.0, -1.9);
//! assert!(m > 0.0 && mt > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod error;
pub mod event;
pub mod kinematics;

pub use channel::Channel;
pub use error::{Error, Result};
pub use event::{GenEvent, MissingEt, Particle, ParticleArrays, SkimRow};
pub use kinematics::{FourVector, PtEtaPhiM, delta_phi, invariant_mass, transverse_mass};
