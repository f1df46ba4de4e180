// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Coordinate engine for Vista camera views.
//!
//! Everything in this crate is pure and deterministic: no engine handles,
//! no clocks, no I/O. It converts between spherical orbits and world-space
//! points, formats orbits into their canonical text, and normalizes the
//! heterogeneous orbit shapes found in persisted view files and live
//! readbacks.
//!
//! # Conventions
//!
//! - Angles are radians in [`Orbit`], degrees in canonical text.
//! - The polar angle is measured from +Y.
//! - Lengths are meters.

use thiserror::Error;

mod orbit;
mod parse;
mod point;
mod token;

pub use orbit::{
    current_camera_position, format_degrees, format_meters, format_orbit, spherical_offset,
    wrap_degrees, Orbit,
};
pub use parse::{parse_orbit, OrbitInput, OrbitTokens};
pub use point::Point3;
pub use token::{Angle, Length, OrbitSpec};

/// Error type for orbit parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrbitError {
    /// Input shape is not one of the accepted orbit forms, or the textual
    /// form carries fewer than three tokens.
    #[error("invalid orbit format: {0}")]
    InvalidOrbitFormat(String),
    /// A single token could not be read as an angle or length.
    #[error("invalid {expected} token `{token}`")]
    InvalidToken {
        /// What the token was expected to be (`angle` or `length`).
        expected: &'static str,
        /// The offending token, verbatim.
        token: String,
    },
}
