//! Cellular-automaton smoothing
//!
//! Each pass relaxes the interior toward solid rock or open floor depending on
//! how many of a tile's eight neighbors are walls. Neighbors beyond the buffer
//! count as walls, so the outer edge always pulls toward rock.
//!
//! The pass mutates the live buffer while scanning (`x` outer, `y` inner),
//! so tiles later in the scan see the already-updated state of earlier ones.
//! This is not a double-buffered automaton; output depends on scan order.

use crate::grid::{Grid, Tile};
use crate::tilemap::MOORE_OFFSETS;

/// Run `iterations` smoothing passes over the interior.
pub fn smooth(grid: &mut Grid, iterations: u32, tolerance: u32) {
    let interior = grid.interior();
    for _ in 0..iterations {
        for x in interior.xmin..=interior.xmax {
            for y in interior.ymin..=interior.ymax {
                let walls = surrounding_wall_count(grid, x, y);
                let tile = if walls > tolerance { Tile::Wall } else { Tile::Floor };
                grid.set(x, y, tile);
            }
        }
    }
}

/// Walls among the eight neighbors of `(x, y)`, with out-of-buffer padding.
pub fn surrounding_wall_count(grid: &Grid, x: usize, y: usize) -> u32 {
    MOORE_OFFSETS
        .iter()
        .filter(|(dx, dy)| grid.get_padded(x as i64 + dx, y as i64 + dy).is_wall())
        .count() as u32
}
