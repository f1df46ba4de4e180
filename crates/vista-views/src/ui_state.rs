// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure state transitions for the viewer controls (selection, keys, toggles).

use vista_app_core::prefs::{DisplayMode, ViewerPrefs};

use crate::view::{Direction, ViewCollection};

/// Id offered when the copy key is pressed.
pub const DEFAULT_COPY_ID: &str = "new-view";

/// Navigation and toggle state of one viewer surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavState {
    /// Selected view id.
    pub selected: Option<String>,
    /// Jump instead of animating.
    pub instant_apply: bool,
    /// Expanded or collapsed display.
    pub display_mode: DisplayMode,
    /// An apply is in flight; go and navigation are ignored.
    pub busy: bool,
}

impl NavState {
    /// Initial state from saved preferences.
    pub fn from_prefs(prefs: &ViewerPrefs) -> Self {
        Self {
            selected: None,
            instant_apply: prefs.instant_apply,
            display_mode: prefs.display_mode,
            busy: false,
        }
    }

    /// Write the persisted fields back into `prefs`.
    pub fn store_into(&self, prefs: &mut ViewerPrefs) {
        prefs.instant_apply = self.instant_apply;
        prefs.display_mode = self.display_mode;
    }
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Previous view.
    ArrowLeft,
    /// Next view.
    ArrowRight,
    /// A character key.
    Char(char),
    /// Anything else.
    Other,
}

/// Input from the viewer controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A key was pressed over the viewer.
    KeyPressed(Key),
    /// The view picker changed.
    SelectView(String),
    /// The go button.
    GoClicked,
    /// Copy the live camera under the prompted id and label.
    CopyClicked {
        /// Prompted id; blank aborts.
        id: String,
        /// Prompted label; empty falls back to the id.
        label: String,
    },
    /// The download button.
    DownloadClicked,
    /// Instant/animated toggle.
    ToggleInstant,
    /// Expanded/collapsed toggle.
    ToggleDisplayMode,
    /// Fullscreen was left outside the viewer's control.
    FullscreenExited,
}

/// Work the controller performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Apply the view with this id.
    ApplyView(String),
    /// Copy the live camera as a view fragment.
    CopyCurrent {
        /// View id.
        id: String,
        /// View label.
        label: String,
    },
    /// Export the collection merged with the live camera.
    DownloadCollection,
    /// Persist preferences.
    SavePrefs,
}

/// Apply `ev` to `ui`, returning the next state and the effects to run.
pub fn reduce(ui: &NavState, views: &ViewCollection, ev: UiEvent) -> (NavState, Vec<UiEffect>) {
    let mut next = ui.clone();
    let mut fx = Vec::new();
    match ev {
        UiEvent::KeyPressed(key) => {
            if views.is_empty() {
                return (next, fx);
            }
            match key {
                Key::ArrowLeft | Key::ArrowRight if !next.busy => {
                    let dir = if key == Key::ArrowLeft {
                        Direction::Backward
                    } else {
                        Direction::Forward
                    };
                    if let Some(view) = views.cycle(next.selected.as_deref(), dir) {
                        let id = view.id().to_owned();
                        next.selected = Some(id.clone());
                        fx.push(UiEffect::ApplyView(id));
                    }
                }
                Key::Char('c' | 'C') => fx.push(UiEffect::CopyCurrent {
                    id: DEFAULT_COPY_ID.to_owned(),
                    label: String::new(),
                }),
                _ => {}
            }
        }
        UiEvent::SelectView(id) => {
            if views.get(&id).is_some() {
                next.selected = Some(id);
            }
        }
        UiEvent::GoClicked => {
            if next.busy {
                return (next, fx);
            }
            if next.selected.is_none() {
                next.selected = views.first().map(|v| v.id().to_owned());
            }
            if let Some(id) = &next.selected {
                fx.push(UiEffect::ApplyView(id.clone()));
            }
        }
        UiEvent::CopyClicked { id, label } => {
            let id = id.trim().to_owned();
            if !id.is_empty() {
                fx.push(UiEffect::CopyCurrent { id, label });
            }
        }
        UiEvent::DownloadClicked => fx.push(UiEffect::DownloadCollection),
        UiEvent::ToggleInstant => {
            next.instant_apply = !next.instant_apply;
            fx.push(UiEffect::SavePrefs);
        }
        UiEvent::ToggleDisplayMode => {
            next.display_mode = next.display_mode.toggled();
            fx.push(UiEffect::SavePrefs);
        }
        UiEvent::FullscreenExited => {
            if next.display_mode == DisplayMode::Collapsed {
                next.display_mode = DisplayMode::Expanded;
                fx.push(UiEffect::SavePrefs);
            }
        }
    }
    (next, fx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_geom::OrbitTokens;

    use crate::view::View;

    fn views() -> ViewCollection {
        let v = |id: &str| View::new(id, OrbitTokens::new("0deg", "90deg", "1m")).unwrap();
        ViewCollection::new(vec![v("a"), v("b"), v("c")]).unwrap()
    }

    fn at(id: &str) -> NavState {
        NavState {
            selected: Some(id.to_owned()),
            ..NavState::default()
        }
    }

    #[test]
    fn arrows_cycle_and_apply() {
        let (ui, fx) = reduce(&at("c"), &views(), UiEvent::KeyPressed(Key::ArrowRight));
        assert_eq!(ui.selected.as_deref(), Some("a"));
        assert_eq!(fx, [UiEffect::ApplyView("a".into())]);
        let (ui, fx) = reduce(&ui, &views(), UiEvent::KeyPressed(Key::ArrowLeft));
        assert_eq!(ui.selected.as_deref(), Some("c"));
        assert_eq!(fx, [UiEffect::ApplyView("c".into())]);
    }

    #[test]
    fn keys_ignored_without_views() {
        let ui = NavState::default();
        for key in [Key::ArrowLeft, Key::ArrowRight, Key::Char('c')] {
            let (next, fx) = reduce(&ui, &ViewCollection::empty(), UiEvent::KeyPressed(key));
            assert_eq!(next, ui);
            assert!(fx.is_empty());
        }
    }

    #[test]
    fn copy_key_uses_default_id() {
        let (_, fx) = reduce(&at("a"), &views(), UiEvent::KeyPressed(Key::Char('C')));
        assert!(matches!(&fx[..], [UiEffect::CopyCurrent { id, .. }] if id == DEFAULT_COPY_ID));
        let (_, fx) = reduce(&at("a"), &views(), UiEvent::KeyPressed(Key::Char('x')));
        assert!(fx.is_empty());
    }

    #[test]
    fn go_is_ignored_while_busy() {
        let busy = NavState { busy: true, ..at("b") };
        let (_, fx) = reduce(&busy, &views(), UiEvent::GoClicked);
        assert!(fx.is_empty());
        let (_, fx) = reduce(&busy, &views(), UiEvent::KeyPressed(Key::ArrowRight));
        assert!(fx.is_empty());
        let (_, fx) = reduce(&at("b"), &views(), UiEvent::GoClicked);
        assert_eq!(fx, [UiEffect::ApplyView("b".into())]);
    }

    #[test]
    fn go_without_selection_picks_first() {
        let (ui, fx) = reduce(&NavState::default(), &views(), UiEvent::GoClicked);
        assert_eq!(ui.selected.as_deref(), Some("a"));
        assert_eq!(fx, [UiEffect::ApplyView("a".into())]);
    }

    #[test]
    fn select_unknown_keeps_selection() {
        let (ui, _) = reduce(&at("a"), &views(), UiEvent::SelectView("zz".into()));
        assert_eq!(ui.selected.as_deref(), Some("a"));
        let (ui, fx) = reduce(&at("a"), &views(), UiEvent::SelectView("b".into()));
        assert_eq!(ui.selected.as_deref(), Some("b"));
        assert!(fx.is_empty());
    }

    #[test]
    fn copy_with_blank_id_aborts() {
        let ev = UiEvent::CopyClicked {
            id: "  ".into(),
            label: "x".into(),
        };
        let (_, fx) = reduce(&at("a"), &views(), ev);
        assert!(fx.is_empty());
    }

    #[test]
    fn toggles_save_prefs() {
        let ui = NavState::default();
        let (ui, fx) = reduce(&ui, &views(), UiEvent::ToggleInstant);
        assert!(ui.instant_apply);
        assert_eq!(fx, [UiEffect::SavePrefs]);
        let (ui, _) = reduce(&ui, &views(), UiEvent::ToggleDisplayMode);
        assert_eq!(ui.display_mode, DisplayMode::Collapsed);
        let (ui, fx) = reduce(&ui, &views(), UiEvent::FullscreenExited);
        assert_eq!(ui.display_mode, DisplayMode::Expanded);
        assert_eq!(fx, [UiEffect::SavePrefs]);
        let (_, fx) = reduce(&ui, &views(), UiEvent::FullscreenExited);
        assert!(fx.is_empty());
    }
}
