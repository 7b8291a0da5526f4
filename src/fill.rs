//! Seeded random fill
//!
//! Every interior tile draws one value in `0..100` from a ChaCha stream seeded
//! by the hashed seed string. Draws below `fill_percent` become walls, so a
//! higher fill percent means a more solid cave. Border tiles are forced to
//! `Wall` and do not consume a draw.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Grid, Tile};
use crate::seeds::seed_value;

/// Overwrite the whole grid with seeded noise.
///
/// Scan order is `x` outer, `y` inner, both ascending. Changing it changes
/// which draw lands on which tile.
pub fn seed_fill(grid: &mut Grid, seed: &str, fill_percent: u32) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_value(seed));
    let interior = grid.interior();
    let (width, height) = (grid.total_width(), grid.total_height());
    let tiles = grid.tiles_mut();

    for x in 0..width {
        for y in 0..height {
            if !interior.contains(x, y) {
                tiles.set(x, y, Tile::Wall);
                continue;
            }
            let draw = rng.gen_range(0..100u32);
            tiles.set(x, y, if draw < fill_percent { Tile::Wall } else { Tile::Floor });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(seed: &str, fill_percent: u32) -> Grid {
        let mut grid = Grid::new(20, 15, 2).unwrap();
        seed_fill(&mut grid, seed, fill_percent);
        grid
    }

    #[test]
    fn test_border_is_wall_after_fill() {
        let grid = filled("border", 0);
        for x in 0..grid.total_width() {
            for y in 0..grid.total_height() {
                let expected = if grid.is_border(x, y) { Tile::Wall } else { Tile::Floor };
                assert_eq!(grid.get(x, y), expected, "tile ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fill_extremes() {
        let all_wall = filled("solid", 100);
        assert_eq!(all_wall.count(Tile::Floor), 0);

        let open = filled("open", 0);
        assert_eq!(open.count(Tile::Floor), open.interior().area());
    }

    #[test]
    fn test_same_seed_same_fill() {
        assert_eq!(filled("x", 45), filled("x", 45));
        assert_ne!(filled("x", 45), filled("y", 45));
    }

    #[test]
    fn test_fill_overwrites_previous_state() {
        let mut grid = filled("first", 0);
        seed_fill(&mut grid, "x", 45);
        assert_eq!(grid, filled("x", 45));
    }

    #[test]
    fn test_fill_ratio_roughly_matches_percent() {
        let mut grid = Grid::new(100, 100, 0).unwrap();
        seed_fill(&mut grid, "ratio", 30);
        let walls = grid.count(Tile::Wall) as f64 / 10_000.0;
        assert!((walls - 0.30).abs() < 0.05, "wall ratio {walls}");
    }
}
