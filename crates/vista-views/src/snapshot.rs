// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Capture of the live camera as a persistable view, and the export merge.

use vista_geom::{current_camera_position, format_orbit};
use vista_port::CameraEngine;

use crate::file::{ViewRecord, ViewSetFile};
use crate::view::ViewCollection;

/// Id given to the live snapshot on export.
pub const CURRENT_VIEW_ID: &str = "current";
/// Label given to the live snapshot on export.
pub const CURRENT_VIEW_LABEL: &str = "Current";

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6 + 0.0
}

/// Record the engine's current camera as a view.
///
/// The position is the derived camera position rounded to 6 decimals, the
/// orbit is canonical orbit text and the FOV is the engine's token.
pub fn snapshot_record<E: CameraEngine + ?Sized>(engine: &E, id: &str, label: &str) -> ViewRecord {
    let orbit = engine.camera_orbit();
    let camera = current_camera_position(&orbit, engine.camera_target());
    let label = if label.is_empty() { id } else { label };
    ViewRecord {
        id: id.to_owned(),
        label: label.to_owned(),
        position: Some(camera.to_array().map(round6)),
        orbit: format_orbit(&orbit),
        fov: Some(engine.field_of_view().token()),
    }
}

/// Export records for `collection` with `current` merged in by id.
///
/// An existing record with the same id is replaced in place; otherwise
/// `current` is appended. `collection` itself is untouched.
pub fn merge_for_export(collection: &ViewCollection, current: ViewRecord) -> ViewSetFile {
    let mut records: Vec<ViewRecord> = collection.iter().map(ViewRecord::from).collect();
    match records.iter_mut().find(|r| r.id == current.id) {
        Some(slot) => *slot = current,
        None => records.push(current),
    }
    ViewSetFile::new(records)
}
