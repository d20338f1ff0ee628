//! Core sprite module - pure, deterministic, and testable
//!
//! This crate holds everything that decides *what* ends up on screen. It has
//! **zero dependencies** on terminals, files or input devices, so every rule
//! here can be exercised in plain unit tests.
//!
//! # Module Structure
//!
//! - [`surface`]: glyph cells and fixed-size surfaces
//! - [`compositor`]: transparent blitting with source/destination clipping
//! - [`animation`]: frame sequences advanced by elapsed time
//! - [`sprite`]: named states bound to a static surface or an animation
//! - [`traits`]: the `Update` / `Render` capabilities the game loop drives
//!
//! # Example
//!
//! ```
//! use tui_sprite_core::{blit_at, Cell, Surface};
//! use tui_sprite_core::types::{Position, Rgb};
//!
//! let mut screen = Surface::filled(4, 1, Cell::new('.', Rgb::default(), Rgb::new(0, 0, 80)));
//! let ghost = Surface::from_lines(&["@"], Rgb::new(255, 255, 255), None);
//!
//! blit_at(&mut screen, &ghost, Position::new(2, 0));
//! let cell = screen.get(2, 0).unwrap();
//! assert_eq!(cell.glyph, '@');
//! assert_eq!(cell.background, Some(Rgb::new(0, 0, 80)));
//! ```

pub mod animation;
pub mod compositor;
pub mod sprite;
pub mod surface;
pub mod traits;

pub use tui_sprite_types as types;

pub use animation::{Animation, Frame, PlaybackMode};
pub use compositor::{blit, blit_at};
pub use sprite::{Sprite, SpriteState, StateContent};
pub use surface::{Cell, Surface};
pub use traits::{Render, RenderFn, Update, UpdateFn};
