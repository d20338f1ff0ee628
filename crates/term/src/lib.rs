//! Terminal display module.
//!
//! The game loop talks to a [`DisplayBackend`]: open a fixed-size grid, clear
//! and draw into its surface, flush, poll key presses, close. Two backends are
//! provided:
//!
//! - [`TerminalDisplay`]: crossterm, alternate screen, diff-based flushing
//! - [`HeadlessDisplay`]: in-memory, scripted input, recorded frames

pub mod display;
pub mod renderer;

pub use tui_sprite_core as core;
pub use tui_sprite_types as types;

pub use display::{DisplayBackend, HeadlessDisplay, Operation};
pub use renderer::{encode_diff_into, encode_full_into, TerminalDisplay};
