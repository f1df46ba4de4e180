// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted view-set format.
//!
//! ```json
//! {
//!   "schemaVersion": 4,
//!   "coordSpace": "position+orbit",
//!   "units": "meters",
//!   "views": [
//!     { "id": "front", "label": "Front", "position": [0, 1.6, 3],
//!       "orbit": "0deg 75deg 105%", "fov": "30deg" }
//!   ]
//! }
//! ```
//!
//! On load, `orbit` may take any shape [`vista_geom::OrbitInput`] accepts
//! and a numeric `fov` becomes `"<n>deg"`. On save, orbits are written as
//! text and a missing position is written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use vista_app_core::config::{ConfigError, ConfigStore};
use vista_geom::{parse_orbit, OrbitError, OrbitInput, Point3};

use crate::view::{View, ViewCollection};

/// Schema version written on export.
pub const SCHEMA_VERSION: u32 = 4;
/// Coordinate space tag written on export.
pub const COORD_SPACE: &str = "position+orbit";
/// Units tag written on export.
pub const UNITS: &str = "meters";

/// Why a view set could not be loaded.
#[derive(Debug, Error)]
pub enum CollectionLoadFailure {
    /// The payload is not JSON.
    #[error("view set is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level `views` array is absent (or not an array).
    #[error("missing 'views' array")]
    MissingViews,
    /// A view entry is malformed.
    #[error("view #{index}: {reason}")]
    InvalidView {
        /// Position in the `views` array.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
    /// A view's orbit could not be parsed.
    #[error("view `{id}`: {source}")]
    InvalidOrbit {
        /// Offending view id.
        id: String,
        /// Parser error.
        #[source]
        source: OrbitError,
    },
    /// Two views share an id.
    #[error("duplicate view id `{0}`")]
    DuplicateId(String),
    /// The backing store failed.
    #[error("view set unavailable: {0}")]
    Store(#[from] ConfigError),
}

/// One persisted view, as written on export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Unique key.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Absolute camera position, or `null`.
    pub position: Option<[f64; 3]>,
    /// Orbit text.
    pub orbit: String,
    /// Field-of-view token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<String>,
}

impl From<&View> for ViewRecord {
    fn from(v: &View) -> Self {
        Self {
            id: v.id().to_owned(),
            label: v.label().to_owned(),
            position: v.position().map(Point3::to_array),
            orbit: v.orbit().to_string(),
            fov: v.fov().map(str::to_owned),
        }
    }
}

/// Whole persisted view set, as written on export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSetFile {
    /// Format version.
    pub schema_version: u32,
    /// Coordinate space tag.
    pub coord_space: String,
    /// Length units tag.
    pub units: String,
    /// Views in order.
    pub views: Vec<ViewRecord>,
}

impl ViewSetFile {
    /// Wrap records with the current header.
    pub fn new(views: Vec<ViewRecord>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            coord_space: COORD_SPACE.to_owned(),
            units: UNITS.to_owned(),
            views,
        }
    }

    /// Records for every view of `collection`.
    pub fn from_collection(collection: &ViewCollection) -> Self {
        Self::new(collection.iter().map(ViewRecord::from).collect())
    }

    /// Pretty JSON (2-space indent).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Deserialize)]
struct RawView {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    position: Option<Value>,
    orbit: Value,
    #[serde(default)]
    fov: Option<Value>,
}

impl ViewCollection {
    /// Parse a persisted view set.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CollectionLoadFailure> {
        let root: Value = serde_json::from_slice(bytes)?;
        let Some(entries) = root.get("views").and_then(Value::as_array) else {
            return Err(CollectionLoadFailure::MissingViews);
        };
        let views = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| view_from_value(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(views)
    }

    /// Load the view set stored under `key`.
    pub fn from_store<S: ConfigStore>(store: &S, key: &str) -> Result<Self, CollectionLoadFailure> {
        let bytes = store.load_raw(key)?;
        Self::from_json(&bytes)
    }
}

fn view_from_value(index: usize, entry: &Value) -> Result<View, CollectionLoadFailure> {
    let raw = RawView::deserialize(entry).map_err(|e| CollectionLoadFailure::InvalidView {
        index,
        reason: e.to_string(),
    })?;
    let invalid_orbit = |source| CollectionLoadFailure::InvalidOrbit {
        id: raw.id.clone(),
        source,
    };
    let orbit = OrbitInput::try_from(&raw.orbit)
        .and_then(|input| parse_orbit(&input))
        .map_err(invalid_orbit)?;
    let position = parse_position(raw.position.as_ref()).map_err(|reason| {
        CollectionLoadFailure::InvalidView { index, reason }
    })?;
    let fov = parse_fov(raw.fov.as_ref()).map_err(|reason| CollectionLoadFailure::InvalidView {
        index,
        reason,
    })?;
    let view = View::new(raw.id.clone(), orbit).map_err(invalid_orbit)?;
    Ok(view
        .with_label(raw.label.unwrap_or_default())
        .with_position(position)
        .with_fov(fov))
}

fn parse_position(value: Option<&Value>) -> Result<Option<Point3>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) if items.len() == 3 => {
            let mut coords = [0.0; 3];
            for (slot, item) in coords.iter_mut().zip(items) {
                *slot = item
                    .as_f64()
                    .ok_or_else(|| format!("position component {item} is not a number"))?;
            }
            Ok(Some(Point3::from(coords)))
        }
        Some(other) => Err(format!("position must be [x, y, z] or null, got {other}")),
    }
}

fn parse_fov(value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(d) if d == 0.0 => Ok(None),
            Some(d) => Ok(Some(format!("{d}deg"))),
            None => Err(format!("fov {n} is not a finite number")),
        },
        Some(other) => Err(format!("fov must be a token or a number, got {other}")),
    }
}
