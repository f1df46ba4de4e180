// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Table rendering for CLI output.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use vista_app_core::prefs::{DisplayMode, ViewerPrefs};
use vista_views::{Readout, ViewCollection};

fn table(header: &[&str]) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(header.to_vec());
    t
}

pub fn display_mode_name(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Expanded => "expanded",
        DisplayMode::Collapsed => "collapsed",
    }
}

pub fn views(collection: &ViewCollection) -> Table {
    let mut t = table(&["id", "label", "orbit", "position", "fov"]);
    for v in collection {
        let position = v.position().map_or_else(
            || "-".to_owned(),
            |p| format!("{} {} {}", p.x, p.y, p.z),
        );
        t.add_row(vec![
            v.id().to_owned(),
            v.label().to_owned(),
            v.orbit().to_string(),
            position,
            v.fov().unwrap_or("-").to_owned(),
        ]);
    }
    t
}

pub fn readouts<'a>(rows: impl IntoIterator<Item = (&'a str, &'a Readout)>) -> Table {
    let mut t = table(&["view", "orbit", "target", "camera", "fov"]);
    for (name, r) in rows {
        t.add_row(vec![
            name.to_owned(),
            r.orbit.clone(),
            r.target.join(" "),
            r.camera.join(" "),
            r.fov.clone(),
        ]);
    }
    t
}

pub fn prefs(prefs: &ViewerPrefs) -> Table {
    let mut t = table(&["pref", "value"]);
    t.add_row(vec!["instant_apply".to_owned(), prefs.instant_apply.to_string()]);
    t.add_row(vec![
        "display_mode".to_owned(),
        display_mode_name(prefs.display_mode).to_owned(),
    ]);
    t.add_row(vec!["views_key".to_owned(), prefs.views_key.clone()]);
    t.add_row(vec![
        "framing_radius_m".to_owned(),
        prefs.framing_radius_m.to_string(),
    ]);
    t
}
