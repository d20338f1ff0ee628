//! Glyph surfaces: fixed-size grids of styled character cells.

use crate::types::{Position, Rgb, Size, DEFAULT_FOREGROUND};

/// A single glyph cell.
///
/// A cell without a background is transparent: when it is composited onto
/// another surface, the background already present at the target is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub foreground: Rgb,
    pub background: Option<Rgb>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            foreground: DEFAULT_FOREGROUND,
            background: None,
        }
    }
}

impl Cell {
    pub const fn new(glyph: char, foreground: Rgb, background: Rgb) -> Self {
        Self {
            glyph,
            foreground,
            background: Some(background),
        }
    }

    pub const fn transparent(glyph: char, foreground: Rgb) -> Self {
        Self {
            glyph,
            foreground,
            background: None,
        }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.background.is_none()
    }

    pub fn with_background(self, background: Option<Rgb>) -> Self {
        Self { background, ..self }
    }
}

/// 2D grid of glyph cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::default())
    }

    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![cell; len],
        }
    }

    pub fn with_size(size: Size) -> Self {
        Self::new(size.columns, size.rows)
    }

    /// Build a surface from rows of text, every cell using the same colors.
    ///
    /// Short lines are padded with spaces up to the longest line. Lines past
    /// `u16::MAX` and characters past column `u16::MAX` are dropped.
    pub fn from_lines(lines: &[&str], foreground: Rgb, background: Option<Rgb>) -> Self {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = u16::try_from(longest).unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let mut surface = Self::new(width, height);
        for (y, line) in lines.iter().take(usize::from(height)).enumerate() {
            let mut chars = line.chars();
            for x in 0..width {
                let glyph = chars.next().unwrap_or(' ');
                surface.set(
                    x,
                    y as u16,
                    Cell {
                        glyph,
                        foreground,
                        background,
                    },
                );
            }
        }
        surface
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Resize the surface, keeping the allocation when possible.
    ///
    /// Cell contents are unspecified after a resize; callers clear afterwards.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Signed lookup; anything off-surface is `None`.
    pub fn get_at(&self, position: Position) -> Option<Cell> {
        let x = u16::try_from(position.column).ok()?;
        let y = u16::try_from(position.row).ok()?;
        self.get(x, y)
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Signed write; writes off-surface are dropped.
    pub fn set_at(&mut self, position: Position, cell: Cell) {
        if let (Ok(x), Ok(y)) = (u16::try_from(position.column), u16::try_from(position.row)) {
            self.set(x, y, cell);
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, foreground: Rgb, background: Option<Rgb>) {
        let mut cx = x;
        for glyph in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(
                cx,
                y,
                Cell {
                    glyph,
                    foreground,
                    background,
                },
            );
            cx += 1;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, cell: Cell) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x.saturating_add(dx), y.saturating_add(dy), cell);
            }
        }
    }

    /// Row `y` as a string of glyphs.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.glyph)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_lines_are_clamped() {
        let long = "x".repeat(usize::from(u16::MAX) + 10);
        let s = Surface::from_lines(&[long.as_str(), "y"], Rgb::default(), None);
        assert_eq!((s.width(), s.height()), (u16::MAX, 2));
        assert_eq!(s.get(u16::MAX - 1, 0).map(|c| c.glyph), Some('x'));
        assert_eq!(s.get(0, 1).map(|c| c.glyph), Some('y'));
    }

    #[test]
    fn test_out_of_bounds_access_is_ignored() {
        let mut s = Surface::new(2, 2);
        s.set(5, 0, Cell::transparent('x', Rgb::default()));
        s.set_at(Position::new(-1, 0), Cell::transparent('x', Rgb::default()));
        assert!(s.cells().iter().all(|c| *c == Cell::default()));
        assert_eq!(s.get(2, 0), None);
        assert_eq!(s.get_at(Position::new(0, -1)), None);
    }

    #[test]
    fn test_from_lines_pads_short_rows() {
        let s = Surface::from_lines(&["ab", "c"], Rgb::new(1, 1, 1), None);
        assert_eq!(s.size(), Size::new(2, 2));
        assert_eq!(s.row_text(0), "ab");
        assert_eq!(s.row_text(1), "c ");
        assert!(s.get(1, 1).unwrap().is_transparent());
    }

    #[test]
    fn test_put_str_clips_at_right_edge() {
        let mut s = Surface::new(3, 1);
        s.put_str(1, 0, "xyz", Rgb::default(), Some(Rgb::default()));
        assert_eq!(s.row_text(0), " xy");
    }
}
