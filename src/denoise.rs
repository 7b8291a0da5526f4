//! Small-region removal
//!
//! Regions at or below a size threshold are flipped to the opposite state:
//! small wall specks open up into floor, small floor pockets fill in as rock.

use log::debug;

use crate::grid::{Grid, Tile};
use crate::regions::extract_regions;

/// Flip every `tile` region with at most `threshold` tiles. Returns the number
/// of regions flipped.
pub fn denoise(grid: &mut Grid, tile: Tile, threshold: usize) -> usize {
    let mut flipped = 0;
    for region in extract_regions(grid, tile) {
        if region.len() > threshold {
            continue;
        }
        for coord in &region {
            grid.set(coord.x, coord.y, tile.opposite());
        }
        flipped += 1;
    }

    debug!(
        "Denoised {} {} region(s) of size <= {}",
        flipped,
        tile.display_name().to_lowercase(),
        threshold
    );
    flipped
}
