// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Display projection of live engine state.

use vista_geom::{current_camera_position, format_orbit, Point3};
use vista_port::CameraEngine;

/// Display fields derived from the engine: orbit text, FOV token, target
/// and camera position with 6 decimals per axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    /// Canonical orbit text.
    pub orbit: String,
    /// Field-of-view token.
    pub fov: String,
    /// Target `[x, y, z]`.
    pub target: [String; 3],
    /// Camera position `[x, y, z]`.
    pub camera: [String; 3],
}

impl Readout {
    /// Read orbit, target and FOV from `engine` and format them.
    ///
    /// Pure with respect to the engine: only getters are called.
    pub fn project<E: CameraEngine + ?Sized>(engine: &E) -> Self {
        let orbit = engine.camera_orbit();
        let target = engine.camera_target();
        Self {
            orbit: format_orbit(&orbit),
            fov: engine.field_of_view().token(),
            target: axes(target),
            camera: axes(current_camera_position(&orbit, target)),
        }
    }
}

fn axes(p: Point3) -> [String; 3] {
    p.to_array()
        .map(|v| format!("{:.6}", (v * 1_000_000.0).round() / 1_000_000.0 + 0.0))
}
