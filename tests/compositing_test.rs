//! Integration tests for transparent blitting.

use tui_sprite::core::{blit, blit_at, Cell, Surface};
use tui_sprite::types::{Position, Rgb, Size};

const FG: Rgb = Rgb::new(200, 200, 200);
const RED: Rgb = Rgb::new(200, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 200);

fn backdrop() -> Surface {
    let mut dest = Surface::filled(6, 4, Cell::new('.', FG, BLUE));
    dest.set(0, 0, Cell::new('#', FG, RED));
    dest
}

fn source() -> Surface {
    Surface::from_lines(&["abcde", "fghij"], FG, Some(RED))
}

#[test]
fn test_empty_rectangles_leave_destination_unchanged() {
    let source = source();
    let cases = [
        // Entirely right of / below the destination.
        (Position::new(6, 0), Position::TOP_LEFT, source.size()),
        (Position::new(0, 4), Position::TOP_LEFT, source.size()),
        // Entirely left of / above the destination.
        (Position::new(-5, 0), Position::TOP_LEFT, source.size()),
        (Position::new(0, -2), Position::TOP_LEFT, source.size()),
        // Zero-sized request.
        (Position::TOP_LEFT, Position::TOP_LEFT, Size::new(0, 2)),
        // Source corner beyond the source.
        (Position::TOP_LEFT, Position::new(5, 0), source.size()),
        // Negative source corner swallowing the whole request.
        (Position::TOP_LEFT, Position::new(-5, 0), source.size()),
        (Position::TOP_LEFT, Position::new(0, -7), source.size()),
        // Positions at the ends of the coordinate range.
        (Position::new(i32::MIN, 0), Position::TOP_LEFT, source.size()),
        (Position::new(0, i32::MIN), Position::TOP_LEFT, source.size()),
        (Position::new(i32::MAX, i32::MAX), Position::TOP_LEFT, source.size()),
        (Position::TOP_LEFT, Position::new(i32::MAX, 0), source.size()),
        (Position::TOP_LEFT, Position::new(i32::MIN, 0), source.size()),
        (Position::new(i32::MAX, 0), Position::new(i32::MIN, i32::MIN), Size::new(u16::MAX, u16::MAX)),
    ];

    for (dest_top_left, source_top_left, size) in cases {
        let mut dest = backdrop();
        blit(&mut dest, &source, dest_top_left, source_top_left, size);
        assert_eq!(
            dest,
            backdrop(),
            "blit at {:?} from {:?} size {:?} changed the destination",
            dest_top_left,
            source_top_left,
            size
        );
    }
}

#[test]
fn test_transparent_cells_take_destination_background() {
    let mut dest = backdrop();
    let ghost = Surface::from_lines(&["@"], RED, None);

    blit_at(&mut dest, &ghost, Position::new(2, 1));

    let cell = dest.get(2, 1).unwrap();
    assert_eq!(cell.glyph, '@');
    assert_eq!(cell.foreground, RED);
    assert_eq!(cell.background, Some(BLUE));
}

#[test]
fn test_opaque_cells_keep_their_background() {
    let mut dest = backdrop();
    blit_at(&mut dest, &source(), Position::new(1, 1));
    assert_eq!(dest.get(1, 1), Some(Cell::new('a', FG, RED)));
    assert_eq!(dest.row_text(2), ".fghij");
}

#[test]
fn test_negative_source_offset_matches_precropped_blit() {
    let source = source();

    let mut shifted = backdrop();
    blit(
        &mut shifted,
        &source,
        Position::new(1, 0),
        Position::new(-2, 0),
        source.size(),
    );

    let mut precropped = backdrop();
    let cropped = Surface::from_lines(&["abc", "fgh"], FG, Some(RED));
    blit_at(&mut precropped, &cropped, Position::new(3, 0));

    assert_eq!(shifted, precropped);
    assert_eq!(shifted.row_text(0), "#..abc");
}

#[test]
fn test_partial_overlap_clips_on_every_side() {
    let source = source();
    let mut dest = backdrop();
    blit_at(&mut dest, &source, Position::new(-2, 3));
    assert_eq!(dest.row_text(3), "cde...");
    assert_eq!(dest.row_text(2), "......");

    let mut dest = backdrop();
    blit(
        &mut dest,
        &source,
        Position::new(4, 0),
        Position::new(1, 1),
        Size::new(3, 1),
    );
    assert_eq!(dest.row_text(0), "#...gh");
}
