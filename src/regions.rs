//! Connected region extraction
//!
//! Breadth-first flood fill over the interior, 4-connectivity only. Each call
//! visits every interior tile at most once.

use std::collections::VecDeque;

use crate::grid::{Coord, Grid, Tile};
use crate::tilemap::Tilemap;

/// A maximal 4-connected set of same-state interior tiles, in discovery order.
pub type Region = Vec<Coord>;

/// All regions of `tile`, ordered by the scan position of their first tile.
///
/// The visited buffer covers the interior only and is indexed with
/// interior-local coordinates.
pub fn extract_regions(grid: &Grid, tile: Tile) -> Vec<Region> {
    let interior = grid.interior();
    let mut visited = Tilemap::new_with(interior.width(), interior.height(), false);
    let mut regions = Vec::new();

    for start in interior.coords() {
        let (lx, ly) = interior.local(start.x, start.y);
        if *visited.get(lx, ly) || grid.at(start) != tile {
            continue;
        }
        regions.push(flood_region(grid, start, &mut visited));
    }

    regions
}

/// BFS from `start`, marking every tile of its region in `visited`.
fn flood_region(grid: &Grid, start: Coord, visited: &mut Tilemap<bool>) -> Region {
    let interior = grid.interior();
    let tile = grid.at(start);
    let mut region = Vec::new();
    let mut queue = VecDeque::new();

    let (lx, ly) = interior.local(start.x, start.y);
    visited.set(lx, ly, true);
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        region.push(coord);

        for next in grid.interior_neighbors(coord) {
            let (nx, ny) = interior.local(next.x, next.y);
            if !*visited.get(nx, ny) && grid.at(next) == tile {
                visited.set(nx, ny, true);
                queue.push_back(next);
            }
        }
    }

    region
}
