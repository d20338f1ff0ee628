//! The display backend seen by the game loop, plus an in-memory implementation.

use std::collections::VecDeque;
use std::io;

use anyhow::{bail, Result};
use crossterm::event::KeyEvent;

use crate::core::{Cell, Surface};

/// A fixed-size glyph display.
///
/// The loop writes into [`DisplayBackend::surface`] between `clear` and
/// `flush`. Every fallible operation is treated as fatal by the loop.
pub trait DisplayBackend {
    /// Acquire the display at `columns` x `rows` cells.
    fn open(&mut self, columns: u16, rows: u16, title: &str) -> Result<()>;

    /// Reset the drawing surface to blank, transparent cells.
    fn clear(&mut self) -> Result<()>;

    /// The writable surface flushed by the next [`DisplayBackend::flush`].
    fn surface(&mut self) -> &mut Surface;

    /// Push the surface to the physical display.
    fn flush(&mut self) -> Result<()>;

    /// Release the display.
    fn close(&mut self) -> Result<()>;

    /// Next pending key press, or `None` when nothing is queued. Never blocks.
    fn poll_input(&mut self) -> Result<Option<KeyEvent>>;
}

/// Display operations, used to script failures on [`HeadlessDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Clear,
    Flush,
    Close,
    Poll,
}

/// In-memory display: scripted input, recorded frames.
///
/// Used for tests and headless runs. Operations on a display that is not
/// open fail, as does closing it twice.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    surface: Surface,
    title: String,
    open: bool,
    open_count: usize,
    close_count: usize,
    clear_count: usize,
    input: VecDeque<KeyEvent>,
    frames: Vec<Surface>,
    fail_on: Option<Operation>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `operation` fail with an I/O error.
    pub fn failing_on(mut self, operation: Operation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Queue a key event for the next input drain.
    pub fn push_input(&mut self, key: KeyEvent) {
        self.input.push_back(key);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn close_count(&self) -> usize {
        self.close_count
    }

    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Every surface flushed so far, oldest first.
    pub fn frames(&self) -> &[Surface] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Surface> {
        self.frames.last()
    }

    fn check(&self, operation: Operation) -> Result<()> {
        if self.fail_on == Some(operation) {
            return Err(io::Error::other(format!("scripted {:?} failure", operation)).into());
        }
        if operation != Operation::Open && !self.open {
            bail!("display is not open ({:?})", operation);
        }
        Ok(())
    }
}

impl DisplayBackend for HeadlessDisplay {
    fn open(&mut self, columns: u16, rows: u16, title: &str) -> Result<()> {
        self.check(Operation::Open)?;
        if self.open {
            bail!("display is already open");
        }
        self.surface = Surface::new(columns, rows);
        self.title = title.to_string();
        self.open = true;
        self.open_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check(Operation::Clear)?;
        self.surface.clear(Cell::default());
        self.clear_count += 1;
        Ok(())
    }

    fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn flush(&mut self) -> Result<()> {
        self.check(Operation::Flush)?;
        self.frames.push(self.surface.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.check(Operation::Close)?;
        self.open = false;
        self.close_count += 1;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Option<KeyEvent>> {
        self.check(Operation::Poll)?;
        Ok(self.input.pop_front())
    }
}
