//! ASCII rendering and export for generated caves
//!
//! Provides functions to render a cave as ASCII text and export it to a file.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::generator::CaveMap;
use crate::grid::Tile;
use crate::tilemap::Tilemap;

pub const WALL_CHAR: char = '#';
pub const FLOOR_CHAR: char = '.';
pub const MAIN_ROOM_CHAR: char = ',';
pub const PASSAGE_CHAR: char = '+';

/// What to overlay on top of the plain wall/floor map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsciiOptions {
    /// Draw main-room floor with `MAIN_ROOM_CHAR`
    pub mark_main_room: bool,
    /// Draw passage endpoints with `PASSAGE_CHAR`
    pub mark_passages: bool,
}

impl Default for AsciiOptions {
    fn default() -> Self {
        Self {
            mark_main_room: true,
            mark_passages: true,
        }
    }
}

/// Get ASCII character for a tile
pub fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Wall => WALL_CHAR,
        Tile::Floor => FLOOR_CHAR,
    }
}

/// Render the whole buffer, border included, one line per row.
pub fn render_map(cave: &CaveMap, options: AsciiOptions) -> String {
    let grid = &cave.grid;
    let mut chars = Tilemap::new_with(grid.total_width(), grid.total_height(), WALL_CHAR);
    for y in 0..chars.height {
        for x in 0..chars.width {
            chars.set(x, y, tile_char(grid.get(x, y)));
        }
    }

    if options.mark_main_room {
        if let Some(main) = cave.rooms.main_room() {
            for tile in &main.tiles {
                chars.set(tile.x, tile.y, MAIN_ROOM_CHAR);
            }
        }
    }

    if options.mark_passages {
        for passage in cave.rooms.passages() {
            chars.set(passage.from_tile.x, passage.from_tile.y, PASSAGE_CHAR);
            chars.set(passage.to_tile.x, passage.to_tile.y, PASSAGE_CHAR);
        }
    }

    let mut out = String::with_capacity((chars.width + 1) * chars.height);
    for y in 0..chars.height {
        for x in 0..chars.width {
            out.push(*chars.get(x, y));
        }
        out.push('\n');
    }
    out
}

/// Write a cave report: header, map, room table and passage list.
pub fn export_ascii(cave: &CaveMap, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_report(cave, &mut file)
}

pub fn write_report<W: Write>(cave: &CaveMap, out: &mut W) -> io::Result<()> {
    let grid = &cave.grid;
    let interior = grid.interior();

    writeln!(out, "=== CAVE GENERATOR MAP ===")?;
    writeln!(
        out,
        "Seed: \"{}\"{}",
        cave.seed,
        if cave.reproducible { "" } else { " (time-derived)" }
    )?;
    writeln!(
        out,
        "Size: {}x{} interior, {}x{} with border",
        interior.width(),
        interior.height(),
        grid.total_width(),
        grid.total_height()
    )?;
    writeln!(out, "Square size: {}", cave.square_size)?;
    writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "=== MAP ===")?;
    write!(out, "{}", render_map(cave, AsciiOptions::default()))?;
    writeln!(out)?;
    writeln!(
        out,
        "Legend: '{}' wall  '{}' floor  '{}' main room  '{}' passage end",
        WALL_CHAR, FLOOR_CHAR, MAIN_ROOM_CHAR, PASSAGE_CHAR
    )?;
    writeln!(out)?;

    writeln!(out, "=== ROOMS ===")?;
    writeln!(out, "Floor: {:.1}% of interior", 100.0 * cave.floor_ratio())?;
    for room in cave.rooms.rooms() {
        let links: Vec<String> = room.connected.iter().map(|id| id.to_string()).collect();
        writeln!(
            out,
            "  {:8} {:>5} tiles {:>4} edge{} -> [{}]",
            room.id.to_string(),
            room.size(),
            room.edge_tiles.len(),
            if room.is_main { "  MAIN" } else { "" },
            links.join(", ")
        )?;
    }
    writeln!(out)?;

    writeln!(out, "=== PASSAGES ===")?;
    for passage in cave.rooms.passages() {
        writeln!(
            out,
            "  {} ({}, {}) -> {} ({}, {})",
            passage.from,
            passage.from_tile.x,
            passage.from_tile.y,
            passage.to,
            passage.to_tile.x,
            passage.to_tile.y
        )?;
    }

    Ok(())
}
