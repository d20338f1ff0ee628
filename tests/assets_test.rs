//! Integration tests for loading, packing and tiling assets.
//!
//! Fixtures are written to per-test directories under the system temp dir.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb as Pixel, RgbImage, Rgba, RgbaImage};

use tui_sprite::assets::{self, Asset, LoadError, BACKGROUND, FOREGROUND, GLYPHS};
use tui_sprite::core::{Cell, PlaybackMode};
use tui_sprite::types::{Rgb, BLACK, DEFAULT_FOREGROUND};

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tui-sprite-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write an image directory with uniform colors.
fn write_image(dir: &Path, glyphs: &str, fg: [u8; 4], bg: [u8; 4]) {
    fs::create_dir_all(dir).unwrap();
    let rows = glyphs.lines().count() as u32;
    let columns = glyphs.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    fs::write(dir.join(GLYPHS), glyphs).unwrap();
    RgbaImage::from_pixel(columns, rows, Rgba(fg))
        .save(dir.join(FOREGROUND))
        .unwrap();
    RgbaImage::from_pixel(columns, rows, Rgba(bg))
        .save(dir.join(BACKGROUND))
        .unwrap();
}

#[test]
fn test_read_image_directory() {
    let root = fixture_dir("read-dir");
    let image = root.join("face");
    write_image(&image, "o o\n v", [10, 20, 30, 255], [0, 0, 0, 0]);

    let surface = assets::read(&image).unwrap();

    assert_eq!((surface.width(), surface.height()), (3, 2));
    assert_eq!(surface.row_text(1), " v ");
    assert_eq!(
        surface.get(0, 0),
        Some(Cell::transparent('o', Rgb::new(10, 20, 30)))
    );
}

#[test]
fn test_packed_archive_reads_like_directory() {
    let root = fixture_dir("pack");
    let image = root.join("tree");
    write_image(&image, "/\\\n||", [0, 200, 0, 255], [40, 20, 0, 255]);

    let archive = assets::pack(&image).unwrap();

    assert_eq!(archive, root.join("tree.zip"));
    assert_eq!(assets::read(&archive).unwrap(), assets::read(&image).unwrap());
}

#[cfg(target_os = "linux")]
#[test]
fn test_pack_reports_write_failure() {
    let root = fixture_dir("pack-full");
    let image = root.join("tree");
    write_image(&image, "x", [255; 4], [0, 0, 0, 255]);
    std::os::unix::fs::symlink("/dev/full", root.join("tree.zip")).unwrap();

    assert!(assets::pack(&image).is_err());
}

#[test]
fn test_pack_tree_finds_nested_image_directories() {
    let root = fixture_dir("pack-tree");
    write_image(&root.join("b").join("walk"), "x", [255; 4], [0, 0, 0, 255]);
    write_image(&root.join("a"), "y", [255; 4], [0, 0, 0, 255]);
    fs::create_dir_all(root.join("c").join("empty")).unwrap();
    fs::write(root.join("c").join("notes.txt"), "not an image").unwrap();

    let archives = assets::pack_tree(&root).unwrap();

    assert_eq!(archives, vec![root.join("a.zip"), root.join("b").join("walk.zip")]);
    assert!(assets::is_image_dir(&root.join("a")));
    assert!(!assets::is_image_dir(&root.join("c")));
}

#[test]
fn test_directory_missing_an_entry_fails() {
    let root = fixture_dir("missing");
    let image = root.join("broken");
    write_image(&image, "x", [255; 4], [0, 0, 0, 255]);
    fs::remove_file(image.join(BACKGROUND)).unwrap();

    assert!(matches!(assets::read(&image), Err(LoadError::Io { .. })));
}

#[test]
fn test_load_animation_definition() {
    let root = fixture_dir("animation");
    write_image(&root.join("f1"), "1", [255; 4], [0, 0, 0, 255]);
    write_image(&root.join("f2"), "22", [255; 4], [0, 0, 0, 255]);
    assets::pack(&root.join("f2")).unwrap();
    let definition = root.join("blink.json");
    fs::write(
        &definition,
        r#"{"type": "LOOP", "frames": [
            {"image": "f1", "time": 0.2},
            {"image": "f2.zip", "time": "0.4"}
        ]}"#,
    )
    .unwrap();

    let Asset::Animation(animation) = assets::load_asset(&definition).unwrap() else {
        panic!("expected an animation");
    };

    assert_eq!(animation.mode(), PlaybackMode::Loop);
    assert_eq!(animation.frames().len(), 2);
    assert_eq!(animation.frames()[1].time(), 0.4);
    assert_eq!(animation.size().columns, 2);
    assert!(animation.is_running());
}

#[test]
fn test_unknown_playback_type_plays_forward() {
    let root = fixture_dir("forward");
    write_image(&root.join("f"), "f", [255; 4], [0, 0, 0, 255]);
    let definition = root.join("once.json");
    fs::write(&definition, r#"{"type": "BOUNCE", "frames": [{"image": "f", "time": 1}]}"#).unwrap();

    let animation = assets::load_animation(&definition).unwrap();
    assert_eq!(animation.mode(), PlaybackMode::Forward);
}

#[test]
fn test_invalid_animation_definitions_fail() {
    let root = fixture_dir("bad-animation");
    write_image(&root.join("f"), "f", [255; 4], [0, 0, 0, 255]);

    let empty = root.join("empty.json");
    fs::write(&empty, r#"{"frames": []}"#).unwrap();
    assert!(matches!(assets::load_animation(&empty), Err(LoadError::NoFrames(_))));

    let bad_time = root.join("bad-time.json");
    fs::write(&bad_time, r#"{"frames": [{"image": "f", "time": "soon"}]}"#).unwrap();
    assert!(matches!(
        assets::load_animation(&bad_time),
        Err(LoadError::InvalidTime(_, t)) if t == "soon"
    ));

    let malformed = root.join("malformed.json");
    fs::write(&malformed, "{").unwrap();
    assert!(matches!(assets::load_animation(&malformed), Err(LoadError::Json { .. })));
}

#[test]
fn test_load_sprite_definition() {
    let root = fixture_dir("sprite");
    write_image(&root.join("idle"), "i", [255; 4], [0, 0, 0, 255]);
    write_image(&root.join("w1"), "w", [255; 4], [0, 0, 0, 255]);
    fs::write(
        root.join("walk.json"),
        r#"{"type": "LOOP", "frames": [{"image": "w1", "time": 0.5}]}"#,
    )
    .unwrap();
    let definition = root.join("hero.json");
    fs::write(
        &definition,
        r#"{"states": [
            {"name": "idle", "image": "idle"},
            {"name": "walk", "animation": "walk.json"}
        ]}"#,
    )
    .unwrap();

    let Asset::Sprite(mut sprite) = assets::load_asset(&definition).unwrap() else {
        panic!("expected a sprite");
    };

    assert_eq!(sprite.states().len(), 2);
    assert_eq!(sprite.current_state().name(), "idle");
    sprite.update_state("walk");
    assert!(sprite.current_animation_mut().is_some());
}

#[test]
fn test_sprite_state_without_content_fails() {
    let root = fixture_dir("bad-sprite");
    let definition = root.join("ghost.json");
    fs::write(&definition, r#"{"states": [{"name": "boo"}]}"#).unwrap();

    assert!(matches!(
        assets::load_sprite(&definition),
        Err(LoadError::StateWithoutContent { name, .. }) if name == "boo"
    ));

    fs::write(&definition, r#"{"states": []}"#).unwrap();
    assert!(matches!(assets::load_sprite(&definition), Err(LoadError::NoStates(_))));
}

#[test]
fn test_duplicate_sprite_state_fails() {
    let root = fixture_dir("twin-sprite");
    let definition = root.join("twins.json");
    fs::write(
        &definition,
        r#"{"states": [
            {"name": "idle", "image": "a"},
            {"name": "walk", "image": "b"},
            {"name": "idle", "image": "c"}
        ]}"#,
    )
    .unwrap();

    assert!(matches!(
        assets::load_sprite(&definition),
        Err(LoadError::DuplicateState { name, .. }) if name == "idle"
    ));
}

#[test]
fn test_create_blank_image() {
    let root = fixture_dir("blank");
    let image = root.join("canvas");

    assets::create_blank(&image, 4, 2).unwrap();
    let surface = assets::read(&image).unwrap();

    assert!(assets::is_image_dir(&image));
    assert_eq!((surface.width(), surface.height()), (4, 2));
    assert_eq!(surface.row_text(1), "    ");
    assert_eq!(surface.get(3, 1), Some(Cell::new(' ', DEFAULT_FOREGROUND, BLACK)));
}

#[test]
fn test_tile_writes_grid_copy() {
    let root = fixture_dir("tile");
    let source = root.join("map.png");
    RgbImage::from_pixel(5, 5, Pixel([10, 10, 10])).save(&source).unwrap();

    let target = assets::tile(&source, 2, 2).unwrap();

    assert_eq!(target, root.join("map_tiled2x2.png"));
    let tiled = image::open(&target).unwrap().to_rgb8();
    assert_eq!(*tiled.get_pixel(2, 1), Pixel([255, 255, 255]));
    assert_eq!(*tiled.get_pixel(1, 1), Pixel([10, 10, 10]));
    assert_eq!(*tiled.get_pixel(0, 2), Pixel([10, 10, 10]));
}
