// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Orbit input normalization.
//!
//! Persisted view files and live readbacks use different orbit shapes and
//! units. [`OrbitInput`] names each shape explicitly and [`parse_orbit`]
//! turns any of them into the same verbatim token triple.

use core::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::{Angle, Length, Orbit, OrbitError, OrbitSpec};

/// Accepted orbit shapes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum OrbitInput {
    /// `"THETA PHI RADIUS"`, whitespace-delimited.
    Text(String),
    /// `["THETA", "PHI", "RADIUS"]`; joined with spaces, then split.
    Tokens(Vec<String>),
    /// `{ thetaDeg, phiDeg, radiusM }`.
    Degrees {
        /// Azimuth in degrees.
        theta_deg: f64,
        /// Polar angle in degrees.
        phi_deg: f64,
        /// Radius in meters.
        radius_m: f64,
    },
    /// `{ theta, phi, radius }` in radians and meters (live readback shape).
    Radians(Orbit),
}

impl From<Orbit> for OrbitInput {
    fn from(orbit: Orbit) -> Self {
        Self::Radians(orbit)
    }
}

impl From<&str> for OrbitInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl TryFrom<Value> for OrbitInput {
    type Error = OrbitError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl TryFrom<&Value> for OrbitInput {
    type Error = OrbitError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(invalid(format!("orbit array element {other} is not a token"))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Tokens),
            Value::Object(map) => {
                let num = |key: &str| map.get(key).and_then(Value::as_f64);
                if let (Some(theta_deg), Some(phi_deg), Some(radius_m)) =
                    (num("thetaDeg"), num("phiDeg"), num("radiusM"))
                {
                    return Ok(Self::Degrees {
                        theta_deg,
                        phi_deg,
                        radius_m,
                    });
                }
                if let (Some(theta), Some(phi), Some(radius)) =
                    (num("theta"), num("phi"), num("radius"))
                {
                    return Ok(Self::Radians(Orbit::new(theta, phi, radius)));
                }
                Err(invalid("orbit object needs {thetaDeg, phiDeg, radiusM} or {theta, phi, radius}"))
            }
            other => Err(invalid(format!("unsupported orbit value {other}"))),
        }
    }
}

/// Canonical orbit token triple, each token kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrbitTokens {
    /// Azimuth token.
    pub theta: String,
    /// Polar angle token.
    pub phi: String,
    /// Radius token (may be a deferred `%`/`auto`).
    pub radius: String,
}

impl OrbitTokens {
    /// Build from three tokens.
    pub fn new(theta: impl Into<String>, phi: impl Into<String>, radius: impl Into<String>) -> Self {
        Self {
            theta: theta.into(),
            phi: phi.into(),
            radius: radius.into(),
        }
    }

    /// Interpret the tokens. Fails on the first unreadable token.
    pub fn spec(&self) -> Result<OrbitSpec, OrbitError> {
        Ok(OrbitSpec {
            theta: Angle::parse(&self.theta)?,
            phi: Angle::parse(&self.phi)?,
            radius: Length::parse(&self.radius)?,
        })
    }
}

impl fmt::Display for OrbitTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.theta, self.phi, self.radius)
    }
}

/// Normalize any accepted orbit shape into its token triple.
///
/// Text and array forms need at least three whitespace-separated tokens;
/// anything after the third is ignored. Object forms get unit suffixes:
/// degrees verbatim, radians converted to degrees with 6 decimals.
pub fn parse_orbit(input: &OrbitInput) -> Result<OrbitTokens, OrbitError> {
    match input {
        OrbitInput::Text(text) => split_tokens(text),
        OrbitInput::Tokens(tokens) => split_tokens(&tokens.join(" ")),
        OrbitInput::Degrees {
            theta_deg,
            phi_deg,
            radius_m,
        } => Ok(OrbitTokens::new(
            format!("{theta_deg}deg"),
            format!("{phi_deg}deg"),
            format!("{radius_m}m"),
        )),
        OrbitInput::Radians(o) => Ok(OrbitTokens::new(
            format!("{:.6}deg", o.theta.to_degrees()),
            format!("{:.6}deg", o.phi.to_degrees()),
            format!("{:.6}m", o.radius),
        )),
    }
}

fn split_tokens(text: &str) -> Result<OrbitTokens, OrbitError> {
    let mut it = text.split_whitespace();
    match (it.next(), it.next(), it.next()) {
        (Some(theta), Some(phi), Some(radius)) => Ok(OrbitTokens::new(theta, phi, radius)),
        _ => Err(invalid("orbit must be 'theta phi radius'")),
    }
}

fn invalid(msg: impl Into<String>) -> OrbitError {
    OrbitError::InvalidOrbitFormat(msg.into())
}
