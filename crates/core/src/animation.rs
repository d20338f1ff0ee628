//! Frame animation state machine.
//!
//! An [`Animation`] is an ordered, non-empty list of frames. Each frame carries
//! a *cumulative* trigger time: the current frame is the first one whose time
//! is strictly greater than the accumulated playback time.
//!
//! ## Playback states
//!
//! | State | `running` | accumulated time | current frame |
//! |-------|-----------|------------------|---------------|
//! | Stopped | false | 0 | 0 |
//! | Playing | true | advancing | by threshold |
//! | Paused | false | retained | retained |
//!
//! When the accumulated time passes the last threshold, a
//! [`PlaybackMode::Forward`] animation pauses on its last frame, while a
//! [`PlaybackMode::Loop`] animation restarts from frame 0 with zero time.
//!
//! Time only accumulates while the animation is running, so `pause()` freezes
//! it. Animations are created already playing.
//!
//! ## Example
//!
//! ```rust
//! use tui_sprite_core::{Animation, Frame, PlaybackMode, Surface, Update};
//!
//! let frames = vec![
//!     Frame::new(Surface::new(1, 1), 0.1),
//!     Frame::new(Surface::new(1, 1), 0.3),
//! ];
//! let mut animation = Animation::new(frames, PlaybackMode::Forward).unwrap();
//! animation.update(0.1);
//! assert_eq!(animation.current_index(), 1);
//! animation.update(0.25);
//! assert!(!animation.is_running());
//! ```

use crate::compositor::blit_at;
use crate::surface::Surface;
use crate::traits::{Render, Update};
use crate::types::{Position, Size};

/// What happens once playback runs past the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    /// Freeze on the last frame.
    #[default]
    Forward,
    /// Start over from the first frame.
    Loop,
}

impl PlaybackMode {
    /// Parse a mode name. Anything other than `LOOP` is `Forward`.
    ///
    /// ```
    /// use tui_sprite_core::PlaybackMode;
    ///
    /// assert_eq!(PlaybackMode::parse("LOOP"), PlaybackMode::Loop);
    /// assert_eq!(PlaybackMode::parse("FORWARD"), PlaybackMode::Forward);
    /// assert_eq!(PlaybackMode::parse("bounce"), PlaybackMode::Forward);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "LOOP" => PlaybackMode::Loop,
            _ => PlaybackMode::Forward,
        }
    }
}

/// One frame of an animation: a surface and its cumulative trigger time in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    surface: Surface,
    time: f32,
}

impl Frame {
    /// Negative times are clamped to zero.
    pub fn new(surface: Surface, time: f32) -> Self {
        Self {
            surface,
            time: time.max(0.0),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<Frame>,
    mode: PlaybackMode,
    elapsed: f32,
    running: bool,
    current: usize,
}

impl Animation {
    /// Create a playing animation. Returns `None` when `frames` is empty.
    pub fn new(frames: Vec<Frame>, mode: PlaybackMode) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        let mut animation = Self {
            frames,
            mode,
            elapsed: 0.0,
            running: false,
            current: 0,
        };
        animation.start();
        Some(animation)
    }

    /// Reset to the first frame and play.
    pub fn start(&mut self) {
        self.stop();
        self.resume();
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Reset to the first frame with zero time, not running.
    pub fn stop(&mut self) {
        self.current = 0;
        self.elapsed = 0.0;
        self.pause();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Accumulated playback time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> &Surface {
        &self.frames[self.current].surface
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Smallest size that fits every frame.
    pub fn size(&self) -> Size {
        self.frames
            .iter()
            .fold(Size::default(), |acc, f| acc.max(f.surface.size()))
    }

    /// Draw the current frame with its top-left corner at `top_left`.
    pub fn render_at(&self, surface: &mut Surface, top_left: Position) {
        blit_at(surface, self.current_frame(), top_left);
    }
}

impl Update for Animation {
    fn update(&mut self, elapsed: f32) {
        if !self.running {
            return;
        }
        self.elapsed += elapsed;
        let time = self.elapsed;
        match self.frames.iter().position(|frame| frame.time > time) {
            Some(index) => self.current = index,
            None => match self.mode {
                PlaybackMode::Forward => self.pause(),
                PlaybackMode::Loop => self.start(),
            },
        }
    }
}

impl Render for Animation {
    fn render(&self, surface: &mut Surface) {
        self.render_at(surface, Position::TOP_LEFT);
    }
}
