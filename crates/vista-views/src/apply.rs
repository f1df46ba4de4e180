// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! View applicator.
//!
//! Realizes a [`View`] on a [`CameraEngine`] in a fixed order:
//!
//! ```text
//! Idle → OrbitSet → OrbitSettled → [TargetSet → TargetSettled] → [FovSet → FovSettled] → Idle
//! ```
//!
//! The orbit goes first and is awaited twice (settlement, then one frame)
//! because a percentage radius resolves during layout. Only then is the
//! realized orbit read back and a desired camera position turned into a
//! target. Nothing here times out: an engine that never settles stalls the
//! call.

use tracing::{debug, instrument};
use vista_geom::{format_meters, parse_orbit, Angle, Orbit, OrbitError, OrbitInput, Point3};
use vista_port::CameraEngine;

use crate::readout::Readout;
use crate::view::View;

/// Animated or instant transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    /// Jump straight to each goal.
    Instant,
    /// Let the engine animate toward each goal.
    Animated,
}

impl ApplyMode {
    /// `Instant` when `instant` is set.
    pub const fn from_instant(instant: bool) -> Self {
        if instant {
            Self::Instant
        } else {
            Self::Animated
        }
    }

    /// True for `Instant`.
    pub const fn is_instant(self) -> bool {
        matches!(self, Self::Instant)
    }
}

/// States of one apply call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyPhase {
    /// Not applying.
    Idle,
    /// Orbit attribute written.
    OrbitSet,
    /// Orbit settled and one frame elapsed; radius is resolved.
    OrbitSettled,
    /// Derived target written.
    TargetSet,
    /// Target settled.
    TargetSettled,
    /// Field of view written.
    FovSet,
    /// Field of view settled.
    FovSettled,
}

/// What an apply call did.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplyReport {
    /// Every phase entered, starting and ending with `Idle`.
    pub phases: Vec<ApplyPhase>,
    /// Orbit read back after the orbit settled.
    pub resolved_orbit: Orbit,
    /// Target derived from the view's position, if it had one.
    pub derived_target: Option<Point3>,
    /// Readout after the last settlement.
    pub readout: Readout,
}

struct PhaseTrail(Vec<ApplyPhase>);

impl PhaseTrail {
    fn new() -> Self {
        Self(vec![ApplyPhase::Idle])
    }

    fn enter(&mut self, phase: ApplyPhase) {
        debug!(?phase, "apply phase");
        self.0.push(phase);
    }
}

async fn settle<E: CameraEngine>(engine: &mut E, mode: ApplyMode) {
    if mode.is_instant() {
        engine.jump_camera_to_goal();
    }
    engine.update_complete().await;
}

/// Settle, then wait one frame so a deferred radius is resolved.
async fn settle_resolved<E: CameraEngine>(engine: &mut E, mode: ApplyMode) {
    settle(engine, mode).await;
    engine.next_frame().await;
}

/// Target text for an engine: three 6-decimal meter tokens.
pub fn target_text(p: Point3) -> String {
    format!(
        "{} {} {}",
        format_meters(p.x),
        format_meters(p.y),
        format_meters(p.z)
    )
}

/// Apply `view` to `engine`.
///
/// Orbit tokens are written verbatim. When the view has a position the
/// target becomes `position − offset(resolved orbit)`.
#[instrument(skip(engine, view), fields(view = %view.id()))]
pub async fn apply_view<E: CameraEngine>(engine: &mut E, view: &View, mode: ApplyMode) -> ApplyReport {
    let mut trail = PhaseTrail::new();

    engine.set_camera_orbit(&view.orbit().to_string());
    trail.enter(ApplyPhase::OrbitSet);
    settle_resolved(engine, mode).await;
    trail.enter(ApplyPhase::OrbitSettled);

    let resolved_orbit = engine.camera_orbit();

    let derived_target = match view.position() {
        Some(position) => {
            let target = position - resolved_orbit.offset();
            engine.set_camera_target(&target_text(target));
            trail.enter(ApplyPhase::TargetSet);
            settle(engine, mode).await;
            trail.enter(ApplyPhase::TargetSettled);
            Some(target)
        }
        None => None,
    };

    if let Some(fov) = view.fov() {
        engine.set_field_of_view(fov);
        trail.enter(ApplyPhase::FovSet);
        settle(engine, mode).await;
        trail.enter(ApplyPhase::FovSettled);
    }

    trail.enter(ApplyPhase::Idle);
    ApplyReport {
        phases: trail.0,
        resolved_orbit,
        derived_target,
        readout: Readout::project(&*engine),
    }
}

/// Apply orbit text typed by the user. Rejected before reaching the engine
/// when it is not a resolvable orbit.
pub async fn apply_orbit_text<E: CameraEngine>(
    engine: &mut E,
    text: &str,
    mode: ApplyMode,
) -> Result<Readout, OrbitError> {
    let text = text.trim();
    parse_orbit(&OrbitInput::from(text))?.spec()?;
    engine.set_camera_orbit(text);
    settle_resolved(engine, mode).await;
    Ok(Readout::project(&*engine))
}

/// Apply a field-of-view token typed by the user.
pub async fn apply_fov_text<E: CameraEngine>(
    engine: &mut E,
    text: &str,
    mode: ApplyMode,
) -> Result<Readout, OrbitError> {
    let text = text.trim();
    Angle::parse(text)?;
    engine.set_field_of_view(text);
    settle(engine, mode).await;
    Ok(Readout::project(&*engine))
}

/// Move the target to `target`.
pub async fn apply_target<E: CameraEngine>(
    engine: &mut E,
    target: Point3,
    mode: ApplyMode,
) -> Readout {
    engine.set_camera_target(&target_text(target));
    settle(engine, mode).await;
    Readout::project(&*engine)
}

/// Put the camera at `position` by moving the target, keeping the orbit.
///
/// Pending engine work is awaited first so a percentage radius is resolved
/// before the offset is computed. Returns the derived target.
pub async fn apply_camera_position<E: CameraEngine>(
    engine: &mut E,
    position: Point3,
    mode: ApplyMode,
) -> (Point3, Readout) {
    engine.update_complete().await;
    engine.next_frame().await;
    let target = position - engine.camera_orbit().offset();
    let readout = apply_target(engine, target, mode).await;
    (target, readout)
}
