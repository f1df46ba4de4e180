// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera engine port trait.

use vista_geom::{Orbit, Point3};

/// Field of view as read back from the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldOfView {
    /// The engine chooses the field of view.
    Auto,
    /// A textual token exactly as the engine reports it.
    Token(String),
    /// A bare numeric value in degrees.
    Degrees(f64),
}

impl FieldOfView {
    /// Display/persist token: `"auto"`, the verbatim token, or `"<n>deg"`.
    pub fn token(&self) -> String {
        match self {
            Self::Auto => "auto".to_owned(),
            Self::Token(t) => t.clone(),
            Self::Degrees(d) => format!("{d}deg"),
        }
    }
}

/// Notifications emitted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// The camera moved (user interaction or a realized mutation).
    CameraChange,
    /// Content finished loading.
    Load,
}

/// Camera engine port.
///
/// Implementors expose the engine's native camera representation. All
/// setters take attribute text verbatim; none of them are observable through
/// the getters until [`CameraEngine::update_complete`] resolves, and a
/// deferred radius (`%`, `auto`) additionally needs
/// [`CameraEngine::next_frame`].
///
/// Methods take `&mut self`, so one apply sequence at a time holds the
/// engine.
#[allow(async_fn_in_trait)]
pub trait CameraEngine {
    /// Current numeric orbit (radians, meters).
    fn camera_orbit(&self) -> Orbit;

    /// Current look-at target.
    fn camera_target(&self) -> Point3;

    /// Current field of view.
    fn field_of_view(&self) -> FieldOfView;

    /// Set the orbit attribute from `"THETA PHI RADIUS"` text.
    fn set_camera_orbit(&mut self, orbit: &str);

    /// Set the minimum orbit attribute (bounds on theta, phi, radius).
    fn set_min_camera_orbit(&mut self, orbit: &str);

    /// Set the target attribute from `"X Y Z"` meter tokens.
    fn set_camera_target(&mut self, target: &str);

    /// Set the field-of-view attribute.
    fn set_field_of_view(&mut self, fov: &str);

    /// Skip the animated transition toward the current goal.
    fn jump_camera_to_goal(&mut self);

    /// Resolves once pending mutations have been applied.
    ///
    /// There is no timeout; an engine that never settles stalls the caller.
    async fn update_complete(&mut self);

    /// Resolves at the next rendering-frame boundary.
    async fn next_frame(&mut self);

    /// Drain up to `max` pending notifications.
    fn drain_events(&mut self, max: usize) -> Vec<EngineEvent>;
}
