// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config, preferences and a ready-to-use viewer for one CLI run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;
use vista_app_core::config::ConfigService;
use vista_app_core::config_port::ConfigPort;
use vista_app_core::notice::NoticeKind;
use vista_app_core::prefs::ViewerPrefs;
use vista_config_fs::FsConfigStore;
use vista_port::SimulatedEngine;
use vista_views::{ViewCollection, ViewerController};

/// Config store (best-effort unless a directory was given) and the prefs
/// loaded from it.
pub struct Session {
    config: Option<ConfigService<FsConfigStore>>,
    pub prefs: ViewerPrefs,
}

/// Simulated engine plus the controller attached to it.
pub struct Viewer {
    pub engine: SimulatedEngine,
    pub controller: ViewerController,
}

impl Session {
    /// Open the config store under `dir`, or the platform config directory.
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        let store = match dir {
            Some(dir) => Some(
                FsConfigStore::at(dir)
                    .with_context(|| format!("cannot use config dir {}", dir.display()))?,
            ),
            None => match FsConfigStore::new() {
                Ok(store) => Some(store),
                Err(err) => {
                    warn!(%err, "config store unavailable; prefs won't persist");
                    None
                }
            },
        };
        let config = store.map(ConfigService::new);
        let prefs = config
            .as_ref()
            .and_then(|c| c.load_prefs())
            .unwrap_or_default();
        Ok(Self { config, prefs })
    }

    /// Config port, if a store could be opened.
    pub fn config_port(&self) -> Option<&dyn ConfigPort> {
        self.config.as_ref().map(|c| c as &dyn ConfigPort)
    }

    /// Build a viewer with `prefs` and load views from `file`, or from the
    /// configured views key when no file is given.
    pub fn viewer(&self, prefs: ViewerPrefs, file: Option<&Path>) -> Result<Viewer> {
        let mut engine = SimulatedEngine::new(prefs.framing_radius_m);
        let mut controller = ViewerController::new(prefs);
        controller.attach(&mut engine);
        controller.handle_engine_events(&mut engine);

        if let Some(path) = file {
            let bytes =
                fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
            let views = ViewCollection::from_json(&bytes)
                .with_context(|| format!("invalid view set {}", path.display()))?;
            controller.replace_collection(views);
        } else if let Some(config) = &self.config {
            controller.load_views_from(config.store());
        }
        Ok(Viewer { engine, controller })
    }
}

/// Print and clear queued notices.
pub fn flush_notices(controller: &mut ViewerController) {
    for notice in controller.notices_mut().drain() {
        let kind = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Warn => "warning",
            NoticeKind::Error => "error",
        };
        match notice.body {
            Some(body) => eprintln!("{kind}: {}: {body}", notice.title),
            None => eprintln!("{kind}: {}", notice.title),
        }
    }
}
