// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Angle and length tokens as they appear in orbit, target and FOV text.
//!
//! Tokens stay verbatim in views; these types only answer "what does this
//! token mean". A unitless angle is degrees, a unitless length is meters.

use crate::OrbitError;

/// A single angle token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Angle {
    /// `"<n>deg"` or a bare number.
    Degrees(f64),
    /// `"<n>rad"`.
    Radians(f64),
    /// `"auto"`: the engine picks.
    Auto,
}

impl Angle {
    /// Parse an angle token.
    pub fn parse(token: &str) -> Result<Self, OrbitError> {
        let t = token.trim();
        if t.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let parsed = if let Some(n) = t.strip_suffix("deg") {
            parse_number(n).map(Self::Degrees)
        } else if let Some(n) = t.strip_suffix("rad") {
            parse_number(n).map(Self::Radians)
        } else {
            parse_number(t).map(Self::Degrees)
        };
        parsed.ok_or_else(|| OrbitError::InvalidToken {
            expected: "angle",
            token: token.to_owned(),
        })
    }

    /// Resolve to radians; `Auto` takes `auto_radians`.
    pub fn to_radians(self, auto_radians: f64) -> f64 {
        match self {
            Self::Degrees(d) => d.to_radians(),
            Self::Radians(r) => r,
            Self::Auto => auto_radians,
        }
    }
}

/// A single length token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute meters (`m`, `cm`, `mm` or bare number), already scaled.
    Meters(f64),
    /// `"<n>%"` of the engine's auto-framing distance; resolved after layout.
    Percent(f64),
    /// `"auto"`: 100 % of the auto-framing distance.
    Auto,
}

impl Length {
    /// Parse a length token.
    pub fn parse(token: &str) -> Result<Self, OrbitError> {
        let t = token.trim();
        if t.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let parsed = if let Some(n) = t.strip_suffix('%') {
            parse_number(n).map(Self::Percent)
        } else if let Some(n) = t.strip_suffix("mm") {
            parse_number(n).map(|v| Self::Meters(v / 1_000.0))
        } else if let Some(n) = t.strip_suffix("cm") {
            parse_number(n).map(|v| Self::Meters(v / 100.0))
        } else if let Some(n) = t.strip_suffix('m') {
            parse_number(n).map(Self::Meters)
        } else {
            parse_number(t).map(Self::Meters)
        };
        parsed.ok_or_else(|| OrbitError::InvalidToken {
            expected: "length",
            token: token.to_owned(),
        })
    }

    /// True when the value can only be known after engine layout.
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::Percent(_) | Self::Auto)
    }

    /// Resolve to meters against the auto-framing distance.
    pub fn to_meters(self, framing_radius: f64) -> f64 {
        match self {
            Self::Meters(m) => m,
            Self::Percent(p) => framing_radius * p / 100.0,
            Self::Auto => framing_radius,
        }
    }
}

/// The three orbit tokens, interpreted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSpec {
    /// Azimuth.
    pub theta: Angle,
    /// Polar angle.
    pub phi: Angle,
    /// Radius.
    pub radius: Length,
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
