//! TUI Sprite (workspace facade crate).
//!
//! Glyph images, animations and sprites composited onto a fixed-size terminal
//! grid and driven by a frame-paced game loop. The implementation lives in
//! dedicated crates under `crates/`; this package re-exports them as
//! `tui_sprite::{assets,core,engine,input,term,types}` and hosts the viewer,
//! packer and tiler binaries.

pub use tui_sprite_assets as assets;
pub use tui_sprite_core as core;
pub use tui_sprite_engine as engine;
pub use tui_sprite_input as input;
pub use tui_sprite_term as term;
pub use tui_sprite_types as types;
