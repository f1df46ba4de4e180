// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved viewer preferences (apply mode, display mode, view source).

use serde::{Deserialize, Serialize};

/// Config key under which `ViewerPrefs` are stored.
pub const PREFS_KEY: &str = "viewer-prefs";

/// Default config key of the persisted view set.
pub const DEFAULT_VIEWS_KEY: &str = "views";

/// How the viewer occupies the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Viewer embedded with its control panel.
    #[default]
    Expanded,
    /// Viewer fills the screen; panel hidden.
    Collapsed,
}

impl DisplayMode {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }
}

/// Saved preferences for a viewer surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPrefs {
    /// Jump straight to each goal instead of animating.
    pub instant_apply: bool,
    /// Expanded or collapsed display.
    pub display_mode: DisplayMode,
    /// Config key holding the view set.
    pub views_key: String,
    /// Auto-framing distance for headless engines (meters).
    pub framing_radius_m: f64,
}

impl Default for ViewerPrefs {
    fn default() -> Self {
        Self {
            instant_apply: true,
            display_mode: DisplayMode::Expanded,
            views_key: DEFAULT_VIEWS_KEY.to_owned(),
            framing_radius_m: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_prefs_fill_defaults() {
        let prefs: ViewerPrefs = serde_json::from_str(r#"{"instant_apply": false}"#).unwrap();
        assert!(!prefs.instant_apply);
        assert_eq!(prefs.display_mode, DisplayMode::Expanded);
        assert_eq!(prefs.views_key, "views");
    }

    #[test]
    fn display_mode_toggles() {
        assert_eq!(DisplayMode::Expanded.toggled(), DisplayMode::Collapsed);
        assert_eq!(DisplayMode::Collapsed.toggled(), DisplayMode::Expanded);
    }
}
