//! Game loop module.
//!
//! [`TerminalGame`] opens a fixed-size display and runs a frame-paced loop on
//! the calling thread. Each tick:
//!
//! 1. waits until `1 / fps_limit` seconds have passed since the previous tick
//! 2. drains pending key presses, resolves them through the
//!    [`ActionBinding`](crate::input::ActionBinding) and dispatches each
//!    resolved action to the handlers, in arrival order
//! 3. calls `update(elapsed)` on every update target
//! 4. clears the display surface
//! 5. calls `render(surface)` on every render target
//! 6. flushes the display
//!
//! # Lifecycle
//!
//! | State | Entered by | Leaves on |
//! |-------|------------|-----------|
//! | `Idle` | construction | `launch()` |
//! | `Initializing` | `launch()` opens the display, dispatches `Initialize` | handlers return |
//! | `Running` | launch completes | `finish()`, a finish request, a display error |
//! | `Finalizing` | `finish()` dispatches `Finalize` | display closed |
//! | `Closed` | display released | `launch()` again |
//!
//! Display errors are fatal: the loop closes the display on a best-effort
//! basis, enters `Closed` and returns the error.
//!
//! # Example
//!
//! ```no_run
//! use tui_sprite_engine::{GameConfig, GameEvent, LoopControl, TerminalGame};
//! use tui_sprite_engine::core::{Surface, RenderFn};
//! use tui_sprite_engine::input::ActionBinding;
//! use crossterm::event::KeyCode;
//!
//! let mut game = TerminalGame::new(GameConfig::new("demo", 20, 5))
//!     .binding(ActionBinding::new().bind(KeyCode::Esc, "quit"))
//!     .render(RenderFn(|s: &mut Surface| {
//!         s.put_str(0, 0, "hello", Default::default(), None)
//!     }))
//!     .handler(|control: &mut LoopControl, event: &GameEvent<&'static str>| {
//!         if event.action() == Some(&"quit") {
//!             control.request_finish(false);
//!         }
//!     });
//! game.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod event;
pub mod game;
pub mod pacing;

pub use tui_sprite_core as core;
pub use tui_sprite_input as input;
pub use tui_sprite_term as term;
pub use tui_sprite_types as types;

pub use config::{GameConfig, FPS_ENV};
pub use event::{GameEvent, Handler, LoopControl};
pub use game::{LoopState, TerminalGame};
pub use pacing::FramePacer;
