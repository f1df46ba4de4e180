// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared across Vista front-ends.

use tracing::warn;

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::{ViewerPrefs, PREFS_KEY};

/// Config-facing port for loading/saving viewer preferences.
pub trait ConfigPort {
    /// Load viewer preferences (returns None if missing or unreadable).
    fn load_prefs(&self) -> Option<ViewerPrefs>;
    /// Persist viewer preferences (best-effort; failures are logged).
    fn save_prefs(&self, prefs: &ViewerPrefs);
}

impl<S: ConfigStore> ConfigPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<ViewerPrefs> {
        match self.load(PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, "failed to load viewer prefs");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &ViewerPrefs) {
        if let Err(err) = self.save(PREFS_KEY, prefs) {
            warn!(%err, "failed to save viewer prefs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;
    use crate::prefs::DisplayMode;

    #[test]
    fn prefs_round_trip_through_port() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        assert!(svc.load_prefs().is_none());
        let prefs = ViewerPrefs {
            instant_apply: false,
            display_mode: DisplayMode::Collapsed,
            ..ViewerPrefs::default()
        };
        svc.save_prefs(&prefs);
        assert_eq!(svc.load_prefs(), Some(prefs));
    }

    #[test]
    fn unreadable_prefs_are_none() {
        let svc = ConfigService::new(MemoryConfigStore::new().with(PREFS_KEY, "not json"));
        assert!(svc.load_prefs().is_none());
    }
}
