// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewer session state and effect runner.
//!
//! `ViewerController` owns what a viewer surface remembers between events:
//! the loaded collection, the navigation state, the last readout, saved
//! preferences and pending notices. Engines, clipboards and config ports
//! are passed in per call, so the same controller drives a real viewer or
//! the simulated engine.

use std::time::Instant;

use tracing::{debug, error, info, warn};
use vista_app_core::clipboard::ClipboardPort;
use vista_app_core::config::ConfigStore;
use vista_app_core::config_port::ConfigPort;
use vista_app_core::notice::{NoticeKind, NoticeService};
use vista_app_core::prefs::ViewerPrefs;
use vista_geom::{OrbitError, Point3};
use vista_port::CameraEngine;

use crate::apply::{self, ApplyMode, ApplyReport};
use crate::file::{CollectionLoadFailure, ViewRecord, ViewSetFile};
use crate::readout::Readout;
use crate::snapshot::{merge_for_export, snapshot_record, CURRENT_VIEW_ID, CURRENT_VIEW_LABEL};
use crate::ui_state::{reduce, NavState, UiEffect, UiEvent};
use crate::view::{Direction, View, ViewCollection};

/// Minimum orbit set on attach: any angle, radius down to zero.
pub const MIN_CAMERA_ORBIT: &str = "auto auto 0m";

/// Most engine events handled per drain.
const EVENT_BATCH: usize = 64;

/// Where copied view text ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Written to the clipboard.
    Copied(String),
    /// Clipboard unavailable; the text must be shown to the user.
    Presented(String),
}

impl CopyOutcome {
    /// The copied JSON fragment.
    pub fn text(&self) -> &str {
        match self {
            Self::Copied(t) | Self::Presented(t) => t,
        }
    }
}

/// Result of running one [`UiEffect`].
#[derive(Debug, Clone, PartialEq)]
pub enum EffectOutcome {
    /// A view was applied.
    Applied(ApplyReport),
    /// The requested view id is not in the collection.
    MissingView(String),
    /// The live camera was copied.
    Copied(CopyOutcome),
    /// The collection was exported.
    Exported(ViewSetFile),
    /// Preferences were handed to the config port (if any).
    PrefsSaved,
}

/// Holds `NavState::busy` for the lifetime of one apply; a dropped apply
/// future releases it too.
struct BusyGuard<'a> {
    busy: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    fn hold(busy: &'a mut bool) -> Self {
        *busy = true;
        Self { busy }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.busy = false;
    }
}

/// Session state of one viewer surface.
#[derive(Debug)]
pub struct ViewerController {
    collection: ViewCollection,
    nav: NavState,
    prefs: ViewerPrefs,
    readout: Option<Readout>,
    notices: NoticeService,
}

impl ViewerController {
    /// Controller with an empty collection and the given preferences.
    pub fn new(prefs: ViewerPrefs) -> Self {
        Self {
            collection: ViewCollection::empty(),
            nav: NavState::from_prefs(&prefs),
            prefs,
            readout: None,
            notices: NoticeService::new(16),
        }
    }

    /// Prepare `engine` for use: allow tiny radii and take a first readout.
    pub fn attach<E: CameraEngine + ?Sized>(&mut self, engine: &mut E) {
        engine.set_min_camera_orbit(MIN_CAMERA_ORBIT);
        self.refresh(&*engine);
    }

    /// Re-project the readout from `engine`.
    pub fn refresh<E: CameraEngine + ?Sized>(&mut self, engine: &E) -> &Readout {
        self.readout.insert(Readout::project(engine))
    }

    /// Drain camera-change and load notifications; refreshes the readout
    /// when there were any. Returns how many were handled.
    pub fn handle_engine_events<E: CameraEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let events = engine.drain_events(EVENT_BATCH);
        if !events.is_empty() {
            debug!(count = events.len(), "engine events");
            self.refresh(&*engine);
        }
        events.len()
    }

    /// Loaded views.
    pub fn collection(&self) -> &ViewCollection {
        &self.collection
    }

    /// Navigation and toggle state.
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    /// Preferences including the current toggles.
    pub fn prefs(&self) -> ViewerPrefs {
        let mut prefs = self.prefs.clone();
        self.nav.store_into(&mut prefs);
        prefs
    }

    /// Last readout, if the engine has been read.
    pub fn readout(&self) -> Option<&Readout> {
        self.readout.as_ref()
    }

    /// Pending notices.
    pub fn notices_mut(&mut self) -> &mut NoticeService {
        &mut self.notices
    }

    fn mode(&self) -> ApplyMode {
        ApplyMode::from_instant(self.nav.instant_apply)
    }

    /// Replace the collection wholesale. A selection that no longer exists
    /// is cleared.
    pub fn replace_collection(&mut self, collection: ViewCollection) {
        if let Some(id) = &self.nav.selected {
            if collection.get(id).is_none() {
                self.nav.selected = None;
            }
        }
        self.collection = collection;
    }

    fn accept_load(&mut self, loaded: Result<ViewCollection, CollectionLoadFailure>) -> usize {
        match loaded {
            Ok(collection) => {
                info!(views = collection.len(), "view set loaded");
                self.replace_collection(collection);
            }
            Err(err) => {
                error!(%err, "failed to load view set");
                self.notices.notify(
                    NoticeKind::Error,
                    "Could not load views",
                    Some(err.to_string()),
                    Instant::now(),
                );
                self.replace_collection(ViewCollection::empty());
            }
        }
        self.collection.len()
    }

    /// Load a view set from JSON bytes. On failure the collection becomes
    /// empty and an error notice is queued. Returns the number of views.
    pub fn load_views(&mut self, bytes: &[u8]) -> usize {
        self.accept_load(ViewCollection::from_json(bytes))
    }

    /// Load the view set stored under the configured views key.
    pub fn load_views_from<S: ConfigStore>(&mut self, store: &S) -> usize {
        let key = self.prefs.views_key.clone();
        self.accept_load(ViewCollection::from_store(store, &key))
    }

    /// Select `id`; unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> bool {
        self.nav = reduce(&self.nav, &self.collection, UiEvent::SelectView(id.to_owned())).0;
        self.nav.selected.as_deref() == Some(id)
    }

    /// The selected view.
    pub fn selected_view(&self) -> Option<&View> {
        self.nav.selected.as_deref().and_then(|id| self.collection.get(id))
    }

    /// Apply the selected view (the first one when nothing is selected).
    pub async fn go<E: CameraEngine>(&mut self, engine: &mut E) -> Option<ApplyReport> {
        let id = self
            .nav
            .selected
            .clone()
            .or_else(|| self.collection.first().map(|v| v.id().to_owned()))?;
        self.go_to(engine, &id).await
    }

    /// Select and apply `id`. A missing id is a no-op.
    pub async fn go_to<E: CameraEngine>(&mut self, engine: &mut E, id: &str) -> Option<ApplyReport> {
        let mode = self.mode();
        let Some(view) = self.collection.get(id) else {
            debug!(id, "no such view");
            return None;
        };
        self.nav.selected = Some(id.to_owned());
        let report = {
            let _busy = BusyGuard::hold(&mut self.nav.busy);
            apply::apply_view(engine, view, mode).await
        };
        self.readout = Some(report.readout.clone());
        Some(report)
    }

    /// Step the selection and apply the new view.
    pub async fn cycle<E: CameraEngine>(
        &mut self,
        engine: &mut E,
        dir: Direction,
    ) -> Option<ApplyReport> {
        let id = self
            .collection
            .cycle(self.nav.selected.as_deref(), dir)?
            .id()
            .to_owned();
        self.go_to(engine, &id).await
    }

    fn invalid_input(&mut self, what: &str, err: &OrbitError) {
        warn!(%err, what, "rejected input");
        self.notices.notify(
            NoticeKind::Warn,
            format!("Invalid {what}"),
            Some(err.to_string()),
            Instant::now(),
        );
    }

    /// Apply orbit text typed by the user.
    pub async fn apply_orbit<E: CameraEngine>(
        &mut self,
        engine: &mut E,
        text: &str,
    ) -> Result<Readout, OrbitError> {
        let mode = self.mode();
        match apply::apply_orbit_text(engine, text, mode).await {
            Ok(readout) => Ok(self.readout.insert(readout).clone()),
            Err(err) => {
                self.invalid_input("orbit", &err);
                Err(err)
            }
        }
    }

    /// Apply a field-of-view token typed by the user.
    pub async fn apply_fov<E: CameraEngine>(
        &mut self,
        engine: &mut E,
        text: &str,
    ) -> Result<Readout, OrbitError> {
        let mode = self.mode();
        match apply::apply_fov_text(engine, text, mode).await {
            Ok(readout) => Ok(self.readout.insert(readout).clone()),
            Err(err) => {
                self.invalid_input("field of view", &err);
                Err(err)
            }
        }
    }

    /// Move the target to `target`.
    pub async fn apply_target<E: CameraEngine>(&mut self, engine: &mut E, target: Point3) -> Readout {
        let mode = self.mode();
        let readout = apply::apply_target(engine, target, mode).await;
        self.readout.insert(readout).clone()
    }

    /// Put the camera at `position`, keeping the current orbit.
    pub async fn apply_camera_position<E: CameraEngine>(
        &mut self,
        engine: &mut E,
        position: Point3,
    ) -> Readout {
        let mode = self.mode();
        let (_, readout) = apply::apply_camera_position(engine, position, mode).await;
        self.readout.insert(readout).clone()
    }

    /// Copy the live camera as a pretty-printed view fragment.
    ///
    /// A blank id aborts. When the clipboard refuses, the text is returned
    /// for presentation and a warning notice is queued.
    pub fn copy_current<E: CameraEngine + ?Sized>(
        &mut self,
        engine: &E,
        clipboard: &mut dyn ClipboardPort,
        id: &str,
        label: &str,
    ) -> Option<CopyOutcome> {
        let id = id.trim();
        if id.is_empty() {
            debug!("copy aborted: empty id");
            return None;
        }
        let record: ViewRecord = snapshot_record(engine, id, label);
        let text = match serde_json::to_string_pretty(&record) {
            Ok(text) => text,
            Err(err) => {
                error!(%err, "failed to serialize view");
                return None;
            }
        };
        match clipboard.write_text(&text) {
            Ok(()) => {
                info!(id, "view copied");
                Some(CopyOutcome::Copied(text))
            }
            Err(err) => {
                warn!(%err, "clipboard unavailable, presenting text");
                self.notices.notify(
                    NoticeKind::Warn,
                    "Clipboard unavailable",
                    Some(String::from("Copy the view text manually")),
                    Instant::now(),
                );
                Some(CopyOutcome::Presented(text))
            }
        }
    }

    /// The loaded collection merged with a live `current` snapshot.
    pub fn export<E: CameraEngine + ?Sized>(&self, engine: &E) -> ViewSetFile {
        merge_for_export(
            &self.collection,
            snapshot_record(engine, CURRENT_VIEW_ID, CURRENT_VIEW_LABEL),
        )
    }

    /// Run one UI event through the reducer and perform its effects.
    pub async fn dispatch<E: CameraEngine>(
        &mut self,
        engine: &mut E,
        clipboard: &mut dyn ClipboardPort,
        config: Option<&dyn ConfigPort>,
        ev: UiEvent,
    ) -> Vec<EffectOutcome> {
        let (next, effects) = reduce(&self.nav, &self.collection, ev);
        self.nav = next;
        let mut out = Vec::with_capacity(effects.len());
        for effect in effects {
            let outcome = match effect {
                UiEffect::ApplyView(id) => match self.go_to(engine, &id).await {
                    Some(report) => EffectOutcome::Applied(report),
                    None => EffectOutcome::MissingView(id),
                },
                UiEffect::CopyCurrent { id, label } => {
                    match self.copy_current(&*engine, clipboard, &id, &label) {
                        Some(copy) => EffectOutcome::Copied(copy),
                        None => continue,
                    }
                }
                UiEffect::DownloadCollection => EffectOutcome::Exported(self.export(&*engine)),
                UiEffect::SavePrefs => {
                    self.nav.store_into(&mut self.prefs);
                    if let Some(config) = config {
                        config.save_prefs(&self.prefs);
                    }
                    EffectOutcome::PrefsSaved
                }
            };
            out.push(outcome);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_app_core::clipboard::{MemoryClipboard, NoClipboard};
    use vista_app_core::config::{ConfigService, MemoryConfigStore};
    use vista_app_core::prefs::DisplayMode;
    use vista_port::SimulatedEngine;

    use crate::ui_state::Key;

    const VIEWS: &str = r#"{"views": [
        {"id": "front", "position": [0, 1, 3], "orbit": "0deg 90deg 2m"},
        {"id": "top", "orbit": "0deg 0deg 5m", "fov": "20deg"}
    ]}"#;

    fn loaded() -> ViewerController {
        let mut c = ViewerController::new(ViewerPrefs::default());
        assert_eq!(c.load_views(VIEWS.as_bytes()), 2);
        c
    }

    #[tokio::test]
    async fn attach_sets_min_orbit_and_reads_engine() {
        let mut engine = SimulatedEngine::default();
        let mut c = loaded();
        c.attach(&mut engine);
        assert_eq!(engine.min_camera_orbit(), Some(MIN_CAMERA_ORBIT));
        assert!(c.readout().is_some());
        assert_eq!(c.handle_engine_events(&mut engine), 1);
        assert_eq!(c.handle_engine_events(&mut engine), 0);
    }

    #[test]
    fn failed_load_leaves_empty_collection_and_notice() {
        let mut c = loaded();
        assert!(c.select("top"));
        assert_eq!(c.load_views(b"{}"), 0);
        assert!(c.collection().is_empty());
        assert!(c.nav().selected.is_none());
        assert_eq!(c.notices_mut().drain()[0].kind, NoticeKind::Error);
    }

    #[test]
    fn loads_from_store_under_views_key() {
        let store = MemoryConfigStore::new().with("views", VIEWS);
        let mut c = ViewerController::new(ViewerPrefs::default());
        assert_eq!(c.load_views_from(&store), 2);
        let mut missing = ViewerController::new(ViewerPrefs {
            views_key: "other".into(),
            ..ViewerPrefs::default()
        });
        assert_eq!(missing.load_views_from(&store), 0);
    }

    #[tokio::test]
    async fn go_to_missing_view_is_a_no_op() {
        let mut engine = SimulatedEngine::default();
        let mut c = loaded();
        assert!(c.go_to(&mut engine, "nowhere").await.is_none());
        assert!(engine.journal().is_empty());
    }

    #[tokio::test]
    async fn go_defaults_to_first_view() {
        let mut engine = SimulatedEngine::default();
        let mut c = loaded();
        let report = c.go(&mut engine).await.unwrap();
        assert!(report.derived_target.is_some());
        assert_eq!(c.selected_view().map(View::id), Some("front"));
        assert_eq!(c.readout().unwrap().camera, ["0.000000", "1.000000", "3.000000"]);
        assert!(!c.nav().busy);
    }

    #[tokio::test]
    async fn arrow_keys_apply_neighbours() {
        let mut engine = SimulatedEngine::default();
        let mut c = loaded();
        let mut clip = MemoryClipboard::new();
        let out = c
            .dispatch(&mut engine, &mut clip, None, UiEvent::KeyPressed(Key::ArrowLeft))
            .await;
        assert!(matches!(&out[..], [EffectOutcome::Applied(_)]));
        assert_eq!(c.nav().selected.as_deref(), Some("top"));
        assert_eq!(c.readout().unwrap().fov, "20deg");
    }

    #[tokio::test]
    async fn copy_falls_back_to_presentation() {
        let engine = SimulatedEngine::default();
        let mut c = loaded();
        let out = c.copy_current(&engine, &mut NoClipboard, "here", "").unwrap();
        assert!(matches!(out, CopyOutcome::Presented(_)));
        let record: ViewRecord = serde_json::from_str(out.text()).unwrap();
        assert_eq!(record.label, "here");
        assert_eq!(c.notices_mut().drain()[0].kind, NoticeKind::Warn);

        let mut clip = MemoryClipboard::new();
        let out = c.copy_current(&engine, &mut clip, "here", "Here").unwrap();
        assert_eq!(clip.contents(), Some(out.text()));
        assert!(c.copy_current(&engine, &mut clip, " ", "x").is_none());
    }

    #[tokio::test]
    async fn export_appends_current() {
        let engine = SimulatedEngine::default();
        let c = loaded();
        let file = c.export(&engine);
        assert_eq!(file.views.len(), 3);
        assert_eq!(file.views[2].id, CURRENT_VIEW_ID);
    }

    #[tokio::test]
    async fn toggles_are_persisted() {
        let mut engine = SimulatedEngine::default();
        let svc = ConfigService::new(MemoryConfigStore::new());
        let mut c = loaded();
        let mut clip = NoClipboard;
        let out = c
            .dispatch(&mut engine, &mut clip, Some(&svc as &dyn ConfigPort), UiEvent::ToggleDisplayMode)
            .await;
        assert_eq!(out, [EffectOutcome::PrefsSaved]);
        let saved = svc.load_prefs().unwrap();
        assert_eq!(saved.display_mode, DisplayMode::Collapsed);
        assert_eq!(c.prefs(), saved);
    }

    #[tokio::test]
    async fn bad_manual_input_queues_notice() {
        let mut engine = SimulatedEngine::default();
        let mut c = loaded();
        assert!(c.apply_orbit(&mut engine, "1 2").await.is_err());
        assert!(c.apply_fov(&mut engine, "wide").await.is_err());
        assert_eq!(c.notices_mut().len(), 2);
        let r = c.apply_target(&mut engine, Point3::new(1.0, 0.0, 0.0)).await;
        assert_eq!(r.target[0], "1.000000");
    }
}
