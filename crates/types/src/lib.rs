//! Core types module - shared data structures and constants
//!
//! This module defines the small value types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! from the compositor, the loaders and the terminal backend alike.
//!
//! # Coordinates
//!
//! Grid coordinates are expressed in character cells:
//!
//! - [`Position`]: signed `(column, row)`, may point off-surface
//! - [`Size`]: unsigned `(columns, rows)`
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 60 | Default frame rate cap of the game loop |
//!
//! # Examples
//!
//! ```
//! use tui_sprite_types::{Position, Rgb, Size, TARGET_FPS};
//!
//! let p = Position::new(3, -1).with_relative_column(2);
//! assert_eq!(p, Position::new(5, -1));
//!
//! let s = Size::new(10, 4);
//! assert_eq!(s.area(), 40);
//!
//! assert_eq!(Rgb::new(1, 2, 3).g, 2);
//! assert_eq!(TARGET_FPS, 60);
//! ```

/// Default frame rate cap of the game loop (ticks per second).
pub const TARGET_FPS: u32 = 60;

/// Foreground used when an image does not specify one (light gray).
pub const DEFAULT_FOREGROUND: Rgb = Rgb::new(192, 192, 192);

/// Opaque black.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Opaque white.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell position on a grid. Negative values address cells off the top/left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub column: i32,
    pub row: i32,
}

impl Position {
    pub const TOP_LEFT: Position = Position::new(0, 0);

    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    pub const fn with_column(self, column: i32) -> Self {
        Self { column, ..self }
    }

    pub const fn with_row(self, row: i32) -> Self {
        Self { row, ..self }
    }

    pub const fn with_relative_column(self, delta: i32) -> Self {
        Self {
            column: self.column.saturating_add(delta),
            ..self
        }
    }

    pub const fn with_relative_row(self, delta: i32) -> Self {
        Self {
            row: self.row.saturating_add(delta),
            ..self
        }
    }
}

/// Extent of a grid in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub columns: u16,
    pub rows: u16,
}

impl Size {
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Number of cells covered by this size.
    pub const fn area(self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    pub const fn is_empty(self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Component-wise maximum, used to size a viewport that fits several surfaces.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.columns.max(other.columns), self.rows.max(other.rows))
    }
}
