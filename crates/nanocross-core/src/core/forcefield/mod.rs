//! # Force Field Module
//!
//! Coefficients handed to the MD engine alongside the geometry. The core does not
//! evaluate energies itself; it only carries the carbon parameters used by the
//! crossed-tube runs:
//!
//! - **Pairwise (non-bonded)** interaction between all carbon atoms, `(epsilon, sigma)`
//! - **Quartic bond** around the equilibrium C–C length, `(r0, k2, k3, k4)`
//! - **Atomic mass** of carbon
//!
//! The defaults reproduce the reference parameter set; [`params::ForcefieldParams::load`]
//! reads an alternative set from TOML.

pub mod params;
