//! Text image viewer (default binary).
//!
//! Shows an image directory, image archive, animation or sprite definition in
//! the terminal and reloads it whenever the file changes. A path that does not
//! exist yet is created as a blank image first.
//!
//! Logs go to the file named by `TUI_SPRITE_LOG`, filtered by
//! `TUI_SPRITE_LOG_LEVEL` (default `info`).

use std::cell::RefCell;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyModifiers};
use notify::event::ModifyKind;
use notify::{EventKind, RecursiveMode, Watcher};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_sprite::assets::{self, Asset};
use tui_sprite::engine::{GameConfig, GameEvent, LoopControl, LoopState, TerminalGame};
use tui_sprite::input::{ActionBinding, KeyStroke};

const LOG_FILE_ENV: &str = "TUI_SPRITE_LOG";
const LOG_LEVEL_ENV: &str = "TUI_SPRITE_LOG_LEVEL";

#[derive(Debug, Parser)]
#[command(name = "tui-sprite-view", version, about = "View and hot-reload glyph images")]
struct Args {
    /// Image directory, image archive (.zip) or animation/sprite definition (.json)
    path: PathBuf,
    /// Columns of the blank image created when PATH does not exist
    columns: Option<u16>,
    /// Rows of the blank image (defaults to COLUMNS)
    rows: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    if !args.path.exists() {
        let Some(columns) = args.columns else {
            bail!(
                "{} does not exist; pass COLUMNS [ROWS] to create a blank image",
                args.path.display()
            );
        };
        let rows = args.rows.unwrap_or(columns);
        assets::create_blank(&args.path, columns, rows)?;
        info!(path = %args.path.display(), columns, rows, "created blank image");
    }

    run(&args.path)
}

fn init_logging() -> Result<()> {
    let Some(log_path) = env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(&log_path)
        .with_context(|| format!("failed to create log file {:?}", log_path))?;
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

fn run(path: &Path) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", path.display()))?;

    let asset = assets::load_asset(path)?;
    let mut game = viewer(path, asset);
    game.launch()?;

    loop {
        if game.state() != LoopState::Running {
            return Ok(());
        }
        if changed(&rx) {
            match assets::load_asset(path) {
                Ok(asset) => {
                    info!(path = %path.display(), "reloading");
                    game.finish(false)?;
                    game = viewer(path, asset);
                    game.launch()?;
                }
                Err(e) => warn!(error = %e, "reload failed, keeping previous content"),
            }
            continue;
        }
        game.tick()?;
    }
}

fn viewer(path: &Path, asset: Asset) -> TerminalGame<Action> {
    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let size = asset.size();
    let config = GameConfig::new(title, size.columns, size.rows).with_env_overrides();

    let binding = ActionBinding::new()
        .bind(KeyCode::Esc, Action::Quit)
        .bind(KeyStroke::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);

    let asset = Rc::new(RefCell::new(asset));
    TerminalGame::new(config)
        .binding(binding)
        .update(Rc::clone(&asset))
        .render(asset)
        .handler(|control: &mut LoopControl, event: &GameEvent<Action>| {
            if event.action() == Some(&Action::Quit) {
                control.request_finish(false);
            }
        })
}

/// Drain watcher events; true when any of them changed content.
fn changed(rx: &Receiver<notify::Result<notify::Event>>) -> bool {
    let mut changed = false;
    for event in rx.try_iter() {
        match event {
            Ok(event) => {
                changed |= match event.kind {
                    EventKind::Modify(ModifyKind::Metadata(_)) => false,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => true,
                    _ => false,
                };
            }
            Err(e) => warn!(error = %e, "file watcher error"),
        }
    }
    changed
}
