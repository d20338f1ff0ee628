//! Transparent compositing of one surface onto another.
//!
//! Pure functions over [`Surface`]; the destination is mutated in place and
//! the source is only read. Nothing here fails: offsets that leave no visible
//! overlap simply draw nothing.

use crate::surface::Surface;
use crate::types::{Position, Size};

/// Draw all of `source` onto `dest` with its top-left corner at `top_left`.
pub fn blit_at(dest: &mut Surface, source: &Surface, top_left: Position) {
    blit(dest, source, top_left, Position::TOP_LEFT, source.size());
}

/// Draw the `source_size` sub-rectangle of `source` starting at `source_top_left`
/// onto `dest`, placing that corner at `dest_top_left`.
///
/// Transparent source cells (no background) take the background of the
/// destination cell they land on; glyph and foreground always come from the
/// source. The rectangle is clipped against both surfaces.
pub fn blit(
    dest: &mut Surface,
    source: &Surface,
    dest_top_left: Position,
    source_top_left: Position,
    source_size: Size,
) {
    // Clip math runs in i64 so extreme positions cannot overflow.
    let mut top_row = i64::from(dest_top_left.row);
    let mut top_column = i64::from(dest_top_left.column);
    let mut source_row = i64::from(source_top_left.row);
    let mut source_column = i64::from(source_top_left.column);
    let mut rows = i64::from(source_size.rows);
    let mut columns = i64::from(source_size.columns);

    // A negative source corner pushes the whole image right/down on the target
    // and eats into the requested size.
    if source_column < 0 {
        top_column -= source_column;
        columns += source_column;
        source_column = 0;
    }
    if source_row < 0 {
        top_row -= source_row;
        rows += source_row;
        source_row = 0;
    }

    // Requested sub-rectangle, cropped to the source itself.
    let mut from_row = source_row;
    let mut until_row = (source_row + rows).min(i64::from(source.height()));
    let mut from_column = source_column;
    let mut until_column = (source_column + columns).min(i64::from(source.width()));

    // Translation from source space to destination space.
    let diff_row = top_row - source_row;
    let diff_column = top_column - source_column;

    // Crop against the destination on both sides.
    from_row = from_row.max(-diff_row);
    from_column = from_column.max(-diff_column);
    until_row = until_row.min(i64::from(dest.height()) - diff_row);
    until_column = until_column.min(i64::from(dest.width()) - diff_column);

    if from_row >= until_row || from_column >= until_column {
        return;
    }

    // Both ranges now lie inside the source and map inside the destination.
    for row in from_row..until_row {
        for column in from_column..until_column {
            let Some(cell) = source.get(column as u16, row as u16) else {
                continue;
            };
            let target = Position::new((column + diff_column) as i32, (row + diff_row) as i32);
            let resolved = if cell.is_transparent() {
                cell.with_background(dest.get_at(target).and_then(|under| under.background))
            } else {
                cell
            };
            dest.set_at(target, resolved);
        }
    }
}
