//! TerminalDisplay: flushes a glyph surface to a real terminal.
//!
//! The surface is drawn at the terminal's top-left corner. After the first
//! full redraw only changed runs of cells are re-encoded.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use tracing::{debug, warn};

use crate::core::{Cell, Surface};
use crate::display::DisplayBackend;
use crate::types::Rgb;

pub struct TerminalDisplay {
    stdout: io::Stdout,
    surface: Surface,
    last: Option<Surface>,
    buf: Vec<u8>,
    open: bool,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            surface: Surface::default(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            open: false,
        }
    }

    /// Force the next flush to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle(title))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// On `Err`, run `undo` and return the original error. A failing `undo` is
/// logged, not returned.
fn undo_on_error(result: Result<()>, undo: impl FnOnce() -> Result<()>) -> Result<()> {
    if let Err(e) = result {
        if let Err(cleanup) = undo() {
            warn!(error = %cleanup, "failed to restore terminal after open error");
        }
        return Err(e);
    }
    Ok(())
}

impl DisplayBackend for TerminalDisplay {
    fn open(&mut self, columns: u16, rows: u16, title: &str) -> Result<()> {
        if self.open {
            bail!("terminal display is already open");
        }
        let (width, height) = terminal::size()?;
        if width < columns || height < rows {
            bail!(
                "terminal is {}x{} cells but {}x{} are required",
                width,
                height,
                columns,
                rows
            );
        }
        let entered = self.enter(title);
        undo_on_error(entered, || self.exit())?;
        self.surface = Surface::new(columns, rows);
        self.last = None;
        self.open = true;
        debug!(columns, rows, title, "terminal display opened");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.surface.clear(Cell::default());
        Ok(())
    }

    fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn flush(&mut self) -> Result<()> {
        self.buf.clear();
        let size = self.surface.size();
        match self.last.as_mut().filter(|prev| prev.size() == size) {
            Some(prev) => {
                encode_diff_into(prev, &self.surface, &mut self.buf)?;
                prev.clone_from(&self.surface);
            }
            None => {
                encode_full_into(&self.surface, &mut self.buf)?;
                self.last = Some(self.surface.clone());
            }
        }
        self.flush_buf()
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.last = None;
        self.exit()?;
        debug!("terminal display closed");
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
                Event::Resize(..) => self.invalidate(),
                _ => {}
            }
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.close() {
                warn!(error = %e, "failed to restore terminal");
            }
        }
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(surface: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(Rgb, Option<Rgb>)> = None;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let cell = surface.get(x, y).unwrap_or_default();
            current = apply_colors_into(out, cell, current)?;
            out.queue(Print(cell.glyph))?;
        }
        if y + 1 < surface.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &Surface, next: &Surface, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<(Rgb, Option<Rgb>)> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            current = apply_colors_into(out, cell, current)?;
            out.queue(Print(cell.glyph))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

/// Emit color changes for `cell`; a missing background falls back to the terminal default.
fn apply_colors_into(
    out: &mut Vec<u8>,
    cell: Cell,
    current: Option<(Rgb, Option<Rgb>)>,
) -> Result<Option<(Rgb, Option<Rgb>)>> {
    let colors = (cell.foreground, cell.background);
    if current != Some(colors) {
        out.queue(SetForegroundColor(rgb_to_color(cell.foreground)))?;
        out.queue(SetBackgroundColor(
            cell.background.map(rgb_to_color).unwrap_or(Color::Reset),
        ))?;
    }
    Ok(Some(colors))
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &Surface,
    next: &Surface,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.size() != next.size() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
