use std::fs;

use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::generator::CaveMap;
use crate::grid::{Coord, Tile};
use crate::rooms::RoomGraph;

const WALL_COLOR: [u8; 3] = [40, 36, 32];
const FLOOR_COLOR: [u8; 3] = [200, 190, 170];
const MAIN_ROOM_COLOR: [u8; 3] = [170, 200, 170];
const PASSAGE_COLOR: [u8; 3] = [220, 60, 50];

/// Export the cave as a PNG, `scale` pixels per tile.
/// Passages are drawn as straight lines between their edge tiles.
pub fn export_png(cave: &CaveMap, path: &str, scale: u32) -> Result<(), ImageError> {
    render_image(cave, scale)?.save(path)
}

/// Fails if the scaled image would not fit in `u32` pixel dimensions.
pub fn render_image(cave: &CaveMap, scale: u32) -> Result<RgbImage, ImageError> {
    let scale = scale.max(1);
    let grid = &cave.grid;
    let scaled = |tiles: usize| u32::try_from(tiles).ok().and_then(|t| t.checked_mul(scale));
    let (width, height) = match (scaled(grid.total_width()), scaled(grid.total_height())) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )))
        }
    };
    let mut img: RgbImage = ImageBuffer::new(width, height);

    for y in 0..grid.total_height() {
        for x in 0..grid.total_width() {
            let color = match grid.get(x, y) {
                Tile::Wall => WALL_COLOR,
                Tile::Floor => FLOOR_COLOR,
            };
            fill_cell(&mut img, x, y, scale, color);
        }
    }

    if let Some(main) = cave.rooms.main_room() {
        for tile in &main.tiles {
            fill_cell(&mut img, tile.x, tile.y, scale, MAIN_ROOM_COLOR);
        }
    }

    for passage in cave.rooms.passages() {
        for Coord { x, y } in line_tiles(passage.from_tile, passage.to_tile) {
            fill_cell(&mut img, x, y, scale, PASSAGE_COLOR);
        }
    }

    Ok(img)
}

/// `(x, y)` must be a tile of the grid the image was sized for.
fn fill_cell(img: &mut RgbImage, x: usize, y: usize, scale: u32, color: [u8; 3]) {
    let (cx, cy) = (x as u32 * scale, y as u32 * scale);
    for py in 0..scale {
        for px in 0..scale {
            img.put_pixel(cx + px, cy + py, Rgb(color));
        }
    }
}

/// Tiles on the Bresenham line from `from` to `to`, both ends included.
pub fn line_tiles(from: Coord, to: Coord) -> Vec<Coord> {
    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut tiles = Vec::new();

    loop {
        tiles.push(Coord::new(x as usize, y as usize));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    tiles
}

/// What the mesh builder (or any external tool) gets from a JSON export.
#[derive(Serialize)]
struct CaveExport<'a> {
    seed: &'a str,
    reproducible: bool,
    square_size: u32,
    border_width: usize,
    width: usize,
    height: usize,
    /// One string per row, `#` wall and `.` floor
    rows: Vec<String>,
    rooms: &'a RoomGraph,
}

pub fn to_json(cave: &CaveMap) -> serde_json::Result<String> {
    let export = CaveExport {
        seed: &cave.seed,
        reproducible: cave.reproducible,
        square_size: cave.square_size,
        border_width: cave.grid.border_width(),
        width: cave.grid.total_width(),
        height: cave.grid.total_height(),
        rows: cave.grid.to_rows(),
        rooms: &cave.rooms,
    };
    serde_json::to_string_pretty(&export)
}

/// Export the cave grid, rooms and passages as JSON.
pub fn export_json(cave: &CaveMap, path: &str) -> std::io::Result<()> {
    let json = to_json(cave).map_err(std::io::Error::other)?;
    fs::write(path, json)
}
