//! # Engine Module
//!
//! The stateful layer between the stateless [`crate::core`] building blocks and the
//! end-to-end [`crate::workflows`].
//!
//! - **Configuration** ([`config`]) - Validated sweep and analysis settings with builders
//! - **Separation Sweep** ([`sweep`]) - Lazily yields two-tube geometries at increasing separation
//! - **Load Analysis** ([`analysis`]) - Net force and torque per tube from a dumped frame
//! - **Progress Reporting** ([`progress`]) - Callback-based progress events for front ends
//! - **Errors** ([`error`]) - The error type shared by engine operations and workflows

pub mod analysis;
pub mod config;
pub mod error;
pub mod progress;
pub mod sweep;
