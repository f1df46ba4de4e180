// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing and command dispatch.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use vista_app_core::clipboard::NoClipboard;
use vista_app_core::prefs::DisplayMode;
use vista_geom::Point3;
use vista_port::SimulatedEngine;
use vista_views::{EffectOutcome, Key, UiEvent, ViewCollection, ViewerController};

use crate::output;
use crate::session::{flush_notices, Session, Viewer};

#[derive(Parser, Debug)]
#[command(name = "vista", author, version, about = "Named camera views over a simulated camera engine")]
pub struct Cli {
    /// Config directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct ViewSource {
    /// View-set JSON file (defaults to the views key in the config dir)
    #[arg(long)]
    pub views: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a view-set file and list its views
    Check {
        /// View-set JSON file
        file: PathBuf,
    },
    /// Apply every view in order and print the readouts
    Tour {
        #[command(flatten)]
        source: ViewSource,
        /// Animate transitions instead of jumping
        #[arg(long)]
        animated: bool,
    },
    /// Apply a view and optional manual adjustments, then print the readout
    Go(GoArgs),
    /// Write the view set merged with the current camera as JSON
    Export {
        #[command(flatten)]
        source: ViewSource,
        /// Apply this view before taking the snapshot
        #[arg(long)]
        after: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change saved viewer preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Args, Debug)]
pub struct GoArgs {
    /// View id to apply
    pub id: Option<String>,
    #[command(flatten)]
    pub source: ViewSource,
    /// Orbit text, e.g. "45deg 60deg 2m"
    #[arg(long)]
    pub orbit: Option<String>,
    /// Field of view, e.g. "30deg" or "auto"
    #[arg(long)]
    pub fov: Option<String>,
    /// Target coordinates in meters
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub target: Option<Vec<f64>>,
    /// Camera position in meters (moves the target, keeps the orbit)
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub camera: Option<Vec<f64>>,
    /// Print the resulting camera as a view fragment with this id
    #[arg(long)]
    pub copy: Option<String>,
    /// Label for --copy (defaults to the id)
    #[arg(long, default_value = "")]
    pub label: String,
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print the saved preferences
    Show,
    /// Change saved preferences
    Set {
        /// Jump to each view instead of animating
        #[arg(long, action = ArgAction::Set)]
        instant: Option<bool>,
        /// Expanded or collapsed display
        #[arg(long, value_enum)]
        display_mode: Option<DisplayArg>,
        /// Config key holding the view set
        #[arg(long)]
        views_key: Option<String>,
        /// Auto-framing distance of the simulated engine (meters)
        #[arg(long)]
        framing_radius: Option<f64>,
    },
    /// Flip a toggle
    Toggle {
        #[arg(value_enum)]
        which: ToggleArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DisplayArg {
    /// Viewer with its control panel
    Expanded,
    /// Viewer fills the screen
    Collapsed,
}

impl From<DisplayArg> for DisplayMode {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Expanded => Self::Expanded,
            DisplayArg::Collapsed => Self::Collapsed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ToggleArg {
    /// Instant vs animated apply
    Instant,
    /// Expanded vs collapsed display
    Display,
}

fn point(coords: &[f64]) -> Result<Point3> {
    match coords {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => bail!("expected three coordinates, got {}", coords.len()),
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let session = Session::open(cli.config_dir.as_deref())?;
    match cli.command {
        Command::Check { file } => check(&file),
        Command::Tour { source, animated } => tour(&session, &source, animated).await,
        Command::Go(args) => go(&session, args).await,
        Command::Export {
            source,
            after,
            output,
        } => export(&session, &source, after.as_deref(), output.as_deref()).await,
        Command::Prefs { action } => prefs(&session, action.unwrap_or(PrefsAction::Show)).await,
    }
}

fn check(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let views = ViewCollection::from_json(&bytes)
        .with_context(|| format!("invalid view set {}", file.display()))?;
    println!("{}", output::views(&views));
    println!("{}: {} views OK", file.display(), views.len());
    Ok(())
}

async fn tour(session: &Session, source: &ViewSource, animated: bool) -> Result<()> {
    let mut prefs = session.prefs.clone();
    if animated {
        prefs.instant_apply = false;
    }
    let mut viewer = session.viewer(prefs, source.views.as_deref())?;
    let Viewer { engine, controller } = &mut viewer;
    let n = controller.collection().len();
    if n == 0 {
        flush_notices(controller);
        bail!("no views to tour");
    }

    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let outcomes = controller
            .dispatch(engine, &mut NoClipboard, None, UiEvent::KeyPressed(Key::ArrowRight))
            .await;
        controller.handle_engine_events(engine);
        for outcome in outcomes {
            if let EffectOutcome::Applied(report) = outcome {
                let id = controller.nav().selected.clone().unwrap_or_default();
                rows.push((id, report.readout));
            }
        }
    }
    println!(
        "{}",
        output::readouts(rows.iter().map(|(id, r)| (id.as_str(), r)))
    );
    flush_notices(controller);
    Ok(())
}

async fn go(session: &Session, args: GoArgs) -> Result<()> {
    let mut viewer = session.viewer(session.prefs.clone(), args.source.views.as_deref())?;
    let Viewer { engine, controller } = &mut viewer;

    if let Some(id) = &args.id {
        if controller.go_to(engine, id).await.is_none() {
            bail!("no view named `{id}`");
        }
    }
    if let Some(orbit) = &args.orbit {
        controller
            .apply_orbit(engine, orbit)
            .await
            .with_context(|| format!("bad --orbit `{orbit}`"))?;
    }
    if let Some(fov) = &args.fov {
        controller
            .apply_fov(engine, fov)
            .await
            .with_context(|| format!("bad --fov `{fov}`"))?;
    }
    if let Some(target) = &args.target {
        controller.apply_target(engine, point(target)?).await;
    }
    if let Some(camera) = &args.camera {
        controller.apply_camera_position(engine, point(camera)?).await;
    }

    let readout = controller.refresh(&*engine).clone();
    let name = args.id.as_deref().unwrap_or("manual");
    println!("{}", output::readouts([(name, &readout)]));

    if let Some(copy_id) = &args.copy {
        match controller.copy_current(&*engine, &mut NoClipboard, copy_id, &args.label) {
            Some(copied) => println!("{}", copied.text()),
            None => bail!("--copy needs a non-empty id"),
        }
    }
    flush_notices(controller);
    Ok(())
}

async fn export(
    session: &Session,
    source: &ViewSource,
    after: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let mut viewer = session.viewer(session.prefs.clone(), source.views.as_deref())?;
    let Viewer { engine, controller } = &mut viewer;
    if let Some(id) = after {
        if controller.go_to(engine, id).await.is_none() {
            bail!("no view named `{id}`");
        }
    }
    let outcomes = controller
        .dispatch(engine, &mut NoClipboard, None, UiEvent::DownloadClicked)
        .await;
    let file = outcomes
        .into_iter()
        .find_map(|o| match o {
            EffectOutcome::Exported(file) => Some(file),
            _ => None,
        })
        .context("export produced no view set")?;
    let text = file.to_json_pretty()?;
    match out {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("wrote {} views to {}", file.views.len(), path.display());
        }
        None => println!("{text}"),
    }
    flush_notices(controller);
    Ok(())
}

async fn prefs(session: &Session, action: PrefsAction) -> Result<()> {
    let config = session
        .config_port()
        .context("config store unavailable; preferences cannot be changed");
    match action {
        PrefsAction::Show => {
            println!("{}", output::prefs(&session.prefs));
        }
        PrefsAction::Set {
            instant,
            display_mode,
            views_key,
            framing_radius,
        } => {
            let config = config?;
            let mut prefs = session.prefs.clone();
            if let Some(instant) = instant {
                prefs.instant_apply = instant;
            }
            if let Some(mode) = display_mode {
                prefs.display_mode = mode.into();
            }
            if let Some(key) = views_key {
                if key.trim().is_empty() {
                    bail!("--views-key must not be empty");
                }
                prefs.views_key = key;
            }
            if let Some(radius) = framing_radius {
                if !(radius.is_finite() && radius > 0.0) {
                    bail!("--framing-radius must be a positive number of meters");
                }
                prefs.framing_radius_m = radius;
            }
            config.save_prefs(&prefs);
            println!("{}", output::prefs(&prefs));
        }
        PrefsAction::Toggle { which } => {
            let config = config?;
            let mut engine = SimulatedEngine::new(session.prefs.framing_radius_m);
            let mut controller = ViewerController::new(session.prefs.clone());
            let event = match which {
                ToggleArg::Instant => UiEvent::ToggleInstant,
                ToggleArg::Display => UiEvent::ToggleDisplayMode,
            };
            controller
                .dispatch(&mut engine, &mut NoClipboard, Some(config), event)
                .await;
            println!("{}", output::prefs(&controller.prefs()));
        }
    }
    Ok(())
}
