// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named camera views for Vista.
//!
//! A [`View`] pairs an orbit (verbatim tokens) with an optional absolute
//! camera position and an optional field of view. Engines only address
//! `(orbit, target)`, so a position is turned into a target *after* the
//! orbit has been realized and its radius resolved; see [`apply_view`].
//!
//! Layout:
//! - [`view`]: view records and the ordered collection.
//! - [`file`]: the persisted view-set format.
//! - [`apply`]: the view applicator and single-attribute operations.
//! - [`readout`]: display projection of live engine state.
//! - [`snapshot`]: current-view capture, copy text and export merge.
//! - [`ui_state`]: pure reducer for selection, keys and toggles.
//! - [`controller`]: explicit session state tying it together.

pub mod apply;
pub mod controller;
pub mod file;
pub mod readout;
pub mod snapshot;
pub mod ui_state;
pub mod view;

pub use apply::{
    apply_camera_position, apply_fov_text, apply_orbit_text, apply_target, apply_view, target_text,
    ApplyMode, ApplyPhase, ApplyReport,
};
pub use controller::{CopyOutcome, EffectOutcome, ViewerController, MIN_CAMERA_ORBIT};
pub use file::{CollectionLoadFailure, ViewRecord, ViewSetFile, SCHEMA_VERSION};
pub use readout::Readout;
pub use snapshot::{merge_for_export, snapshot_record, CURRENT_VIEW_ID, CURRENT_VIEW_LABEL};
pub use ui_state::{reduce, Key, NavState, UiEffect, UiEvent, DEFAULT_COPY_ID};
pub use view::{Direction, View, ViewCollection};
