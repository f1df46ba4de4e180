// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless simulated camera engine.
//!
//! `SimulatedEngine` queues attribute mutations and realizes them only when
//! `update_complete` is awaited. A percentage or `auto` radius is realized
//! one `next_frame` later, which is exactly the lag that makes reading the
//! orbit straight after settlement unreliable. Every call is journaled so
//! tests can check ordering.

use std::collections::VecDeque;

use tracing::{debug, warn};
use vista_geom::{Angle, Length, Orbit, OrbitInput, OrbitSpec, Point3};

use crate::{CameraEngine, EngineEvent, FieldOfView};

/// Auto-framing distance used when none is given (meters).
pub const DEFAULT_FRAMING_RADIUS: f64 = 4.0;

/// Azimuth used for an `auto` theta (degrees).
const AUTO_THETA_DEG: f64 = 0.0;
/// Polar angle used for an `auto` phi (degrees).
const AUTO_PHI_DEG: f64 = 75.0;
/// Undrained notifications kept; the oldest is dropped past this.
pub const MAX_QUEUED_EVENTS: usize = 32;
/// Radius used before any orbit is set (percent of framing distance).
const DEFAULT_RADIUS_PERCENT: f64 = 105.0;

/// One entry of the engine call journal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineCall {
    /// `set_camera_orbit` with its text.
    SetOrbit(String),
    /// `set_min_camera_orbit` with its text.
    SetMinOrbit(String),
    /// `set_camera_target` with its text.
    SetTarget(String),
    /// `set_field_of_view` with its text.
    SetFov(String),
    /// `jump_camera_to_goal`.
    Jump,
    /// `update_complete` was awaited.
    UpdateComplete,
    /// `next_frame` was awaited.
    NextFrame,
}

#[derive(Clone, Debug)]
enum Mutation {
    Orbit(OrbitSpec),
    Target(Point3),
    Fov(FieldOfView),
}

/// Deterministic in-memory camera engine.
#[derive(Debug)]
pub struct SimulatedEngine {
    framing_radius: f64,
    orbit: Orbit,
    target: Point3,
    fov: FieldOfView,
    min_orbit: Option<String>,
    pending: Vec<Mutation>,
    deferred_radius: Option<Length>,
    events: VecDeque<EngineEvent>,
    journal: Vec<EngineCall>,
    jumps: usize,
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMING_RADIUS)
    }
}

impl SimulatedEngine {
    /// Create an engine whose auto-framing distance is `framing_radius`
    /// meters. A `Load` event is queued, as if content just finished loading.
    pub fn new(framing_radius: f64) -> Self {
        let mut events = VecDeque::new();
        events.push_back(EngineEvent::Load);
        Self {
            framing_radius,
            orbit: Orbit::from_degrees(
                AUTO_THETA_DEG,
                AUTO_PHI_DEG,
                framing_radius * DEFAULT_RADIUS_PERCENT / 100.0,
            ),
            target: Point3::ORIGIN,
            fov: FieldOfView::Auto,
            min_orbit: None,
            pending: Vec::new(),
            deferred_radius: None,
            events,
            journal: Vec::new(),
            jumps: 0,
        }
    }

    /// Auto-framing distance (what `100%` resolves to).
    pub fn framing_radius(&self) -> f64 {
        self.framing_radius
    }

    /// Every call received so far, in order.
    pub fn journal(&self) -> &[EngineCall] {
        &self.journal
    }

    /// Clear the call journal.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Number of `jump_camera_to_goal` calls.
    pub fn jump_count(&self) -> usize {
        self.jumps
    }

    /// Last minimum-orbit text, if any.
    pub fn min_camera_orbit(&self) -> Option<&str> {
        self.min_orbit.as_deref()
    }

    /// True while a percentage/auto radius waits for the next frame.
    pub fn has_deferred_radius(&self) -> bool {
        self.deferred_radius.is_some()
    }

    /// Simulate user interaction: move the camera and emit `CameraChange`.
    pub fn drag_to(&mut self, orbit: Orbit) {
        self.orbit = orbit;
        self.push_event(EngineEvent::CameraChange);
    }

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn realize_orbit(&mut self, spec: OrbitSpec) {
        self.orbit.theta = spec.theta.to_radians(AUTO_THETA_DEG.to_radians());
        self.orbit.phi = spec.phi.to_radians(AUTO_PHI_DEG.to_radians());
        if spec.radius.is_deferred() {
            self.deferred_radius = Some(spec.radius);
        } else {
            self.deferred_radius = None;
            self.orbit.radius = spec.radius.to_meters(self.framing_radius);
        }
    }
}

fn parse_target(text: &str) -> Option<Point3> {
    let mut coords = [0.0; 3];
    let mut tokens = text.split_whitespace();
    for slot in &mut coords {
        *slot = match Length::parse(tokens.next()?).ok()? {
            Length::Meters(m) => m,
            // Model center sits at the origin.
            Length::Auto => 0.0,
            Length::Percent(_) => return None,
        };
    }
    Some(Point3::from(coords))
}

impl CameraEngine for SimulatedEngine {
    fn camera_orbit(&self) -> Orbit {
        self.orbit
    }

    fn camera_target(&self) -> Point3 {
        self.target
    }

    fn field_of_view(&self) -> FieldOfView {
        self.fov.clone()
    }

    fn set_camera_orbit(&mut self, orbit: &str) {
        self.journal.push(EngineCall::SetOrbit(orbit.to_owned()));
        match vista_geom::parse_orbit(&OrbitInput::from(orbit)).and_then(|t| t.spec()) {
            Ok(spec) => self.pending.push(Mutation::Orbit(spec)),
            Err(err) => warn!(%err, orbit, "ignoring camera-orbit"),
        }
    }

    fn set_min_camera_orbit(&mut self, orbit: &str) {
        self.journal.push(EngineCall::SetMinOrbit(orbit.to_owned()));
        self.min_orbit = Some(orbit.to_owned());
    }

    fn set_camera_target(&mut self, target: &str) {
        self.journal.push(EngineCall::SetTarget(target.to_owned()));
        match parse_target(target) {
            Some(p) => self.pending.push(Mutation::Target(p)),
            None => warn!(target, "ignoring camera-target"),
        }
    }

    fn set_field_of_view(&mut self, fov: &str) {
        self.journal.push(EngineCall::SetFov(fov.to_owned()));
        match Angle::parse(fov) {
            Ok(Angle::Auto) => self.pending.push(Mutation::Fov(FieldOfView::Auto)),
            Ok(_) => self
                .pending
                .push(Mutation::Fov(FieldOfView::Token(fov.trim().to_owned()))),
            Err(err) => warn!(%err, fov, "ignoring field-of-view"),
        }
    }

    fn jump_camera_to_goal(&mut self) {
        self.journal.push(EngineCall::Jump);
        self.jumps += 1;
    }

    async fn update_complete(&mut self) {
        self.journal.push(EngineCall::UpdateComplete);
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        for m in pending {
            match m {
                Mutation::Orbit(spec) => self.realize_orbit(spec),
                Mutation::Target(p) => self.target = p,
                Mutation::Fov(f) => self.fov = f,
            }
        }
        debug!(orbit = ?self.orbit, target = ?self.target, "engine settled");
        self.push_event(EngineEvent::CameraChange);
    }

    async fn next_frame(&mut self) {
        self.journal.push(EngineCall::NextFrame);
        if let Some(radius) = self.deferred_radius.take() {
            self.orbit.radius = radius.to_meters(self.framing_radius);
            debug!(radius = self.orbit.radius, "deferred radius resolved");
            self.push_event(EngineEvent::CameraChange);
        }
    }

    fn drain_events(&mut self, max: usize) -> Vec<EngineEvent> {
        let n = max.min(self.events.len());
        self.events.drain(..n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[tokio::test]
    async fn mutations_wait_for_settlement() {
        let mut engine = SimulatedEngine::new(2.0);
        engine.set_camera_orbit("90deg 45deg 3m");
        assert_abs_diff_eq!(engine.camera_orbit().theta, 0.0);
        engine.update_complete().await;
        assert_abs_diff_eq!(engine.camera_orbit().theta, core::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(engine.camera_orbit().radius, 3.0);
    }

    #[tokio::test]
    async fn percent_radius_lags_one_frame() {
        let mut engine = SimulatedEngine::new(2.0);
        engine.set_camera_orbit("0deg 90deg 3m");
        engine.update_complete().await;
        engine.set_camera_orbit("0deg 90deg 50%");
        engine.update_complete().await;
        assert!(engine.has_deferred_radius());
        assert_abs_diff_eq!(engine.camera_orbit().radius, 3.0);
        engine.next_frame().await;
        assert_abs_diff_eq!(engine.camera_orbit().radius, 1.0);
        assert!(!engine.has_deferred_radius());
    }

    #[tokio::test]
    async fn target_and_fov_apply_on_settle() {
        let mut engine = SimulatedEngine::default();
        engine.set_camera_target("1.000000m -2m 300cm");
        engine.set_field_of_view("30deg");
        assert_eq!(engine.camera_target(), Point3::ORIGIN);
        engine.update_complete().await;
        assert_eq!(engine.camera_target(), Point3::new(1.0, -2.0, 3.0));
        assert_eq!(engine.field_of_view(), FieldOfView::Token("30deg".into()));
    }

    #[tokio::test]
    async fn invalid_attributes_are_ignored() {
        let mut engine = SimulatedEngine::default();
        let before = engine.camera_orbit();
        engine.set_camera_orbit("nope");
        engine.set_camera_target("1m 2m");
        engine.set_field_of_view("wide");
        engine.update_complete().await;
        assert_eq!(engine.camera_orbit(), before);
        assert_eq!(engine.camera_target(), Point3::ORIGIN);
        assert_eq!(engine.field_of_view(), FieldOfView::Auto);
    }

    #[tokio::test]
    async fn events_and_journal() {
        let mut engine = SimulatedEngine::default();
        assert_eq!(engine.drain_events(8), vec![EngineEvent::Load]);
        engine.set_camera_orbit("0deg 90deg 1m");
        engine.jump_camera_to_goal();
        engine.update_complete().await;
        assert_eq!(engine.drain_events(8), vec![EngineEvent::CameraChange]);
        assert_eq!(engine.jump_count(), 1);
        assert_eq!(
            engine.journal(),
            &[
                EngineCall::SetOrbit("0deg 90deg 1m".into()),
                EngineCall::Jump,
                EngineCall::UpdateComplete,
            ]
        );
        engine.clear_journal();
        assert!(engine.journal().is_empty());
    }

    #[test]
    fn drag_emits_camera_change() {
        let mut engine = SimulatedEngine::default();
        let _ = engine.drain_events(8);
        engine.drag_to(Orbit::new(1.0, 1.0, 1.0));
        assert_eq!(engine.drain_events(1), vec![EngineEvent::CameraChange]);
        assert_eq!(engine.camera_orbit(), Orbit::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn undrained_events_are_bounded() {
        let mut engine = SimulatedEngine::default();
        for i in 0..100 {
            engine.drag_to(Orbit::new(f64::from(i), 1.0, 1.0));
        }
        let events = engine.drain_events(usize::MAX);
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        assert!(events.iter().all(|e| *e == EngineEvent::CameraChange));
    }
}
