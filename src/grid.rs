//! Tile grid with a permanent wall border
//!
//! The buffer is `(2 * border + width) x (2 * border + height)` tiles. Only the
//! interior rectangle is touched by fill, smoothing and denoising; everything
//! around it stays `Wall` for the lifetime of the grid.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::tilemap::Tilemap;

/// Binary tile state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

impl Tile {
    pub fn opposite(self) -> Self {
        match self {
            Tile::Wall => Tile::Floor,
            Tile::Floor => Tile::Wall,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tile::Wall => "Wall",
            Tile::Floor => "Floor",
        }
    }
}

/// Grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance. Only meaningful for comparisons.
    pub fn squared_distance(&self, other: &Coord) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Inclusive interior rectangle `[xmin, xmax] x [ymin, ymax]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interior {
    pub xmin: usize,
    pub ymin: usize,
    pub xmax: usize,
    pub ymax: usize,
}

impl Interior {
    pub fn width(&self) -> usize {
        self.xmax + 1 - self.xmin
    }

    pub fn height(&self) -> usize {
        self.ymax + 1 - self.ymin
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    /// Interior coordinates, `x` outer and `y` inner, both ascending.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (ymin, ymax) = (self.ymin, self.ymax);
        (self.xmin..=self.xmax).flat_map(move |x| (ymin..=ymax).map(move |y| Coord::new(x, y)))
    }

    /// Offset of an interior coordinate into an interior-sized buffer.
    pub fn local(&self, x: usize, y: usize) -> (usize, usize) {
        (x - self.xmin, y - self.ymin)
    }
}

/// The tile buffer of one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Tilemap<Tile>,
    interior: Interior,
    border_width: usize,
}

/// Full buffer size for a `width x height` interior inside a `border_width`
/// margin.
///
/// Fails with `InvalidDimensions` if either dimension is zero, or if the
/// buffer size or its tile count does not fit in an allocation.
pub fn buffer_dimensions(width: usize, height: usize, border_width: usize) -> Result<(usize, usize)> {
    let invalid = GenerationError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    let margin = border_width.checked_mul(2);
    let total_width = margin.and_then(|m| m.checked_add(width));
    let total_height = margin.and_then(|m| m.checked_add(height));
    match (total_width, total_height) {
        (Some(w), Some(h)) if w.checked_mul(h).is_some_and(|area| area <= isize::MAX as usize) => {
            Ok((w, h))
        }
        _ => Err(invalid),
    }
}

impl Grid {
    /// Allocate an all-wall grid around a `width x height` interior.
    ///
    /// Fails with `InvalidDimensions` under the same rules as `buffer_dimensions`.
    pub fn new(width: usize, height: usize, border_width: usize) -> Result<Self> {
        let (total_width, total_height) = buffer_dimensions(width, height, border_width)?;
        let interior = Interior {
            xmin: border_width,
            ymin: border_width,
            xmax: border_width + width - 1,
            ymax: border_width + height - 1,
        };
        Ok(Self {
            tiles: Tilemap::new_with(total_width, total_height, Tile::Wall),
            interior,
            border_width,
        })
    }

    /// Build a grid from rows of characters: `#` is a wall, anything else is floor.
    /// Row `i` of the input is `y = i`. Border tiles are forced to `Wall`.
    pub fn from_rows(rows: &[&str], border_width: usize) -> Result<Self> {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height, border_width)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let tile = if c == '#' { Tile::Wall } else { Tile::Floor };
                grid.set(x + border_width, y + border_width, tile);
            }
        }
        Ok(grid)
    }

    pub fn total_width(&self) -> usize {
        self.tiles.width
    }

    pub fn total_height(&self) -> usize {
        self.tiles.height
    }

    pub fn interior(&self) -> Interior {
        self.interior
    }

    pub fn border_width(&self) -> usize {
        self.border_width
    }

    pub fn get(&self, x: usize, y: usize) -> Tile {
        *self.tiles.get(x, y)
    }

    pub fn at(&self, coord: Coord) -> Tile {
        self.get(coord.x, coord.y)
    }

    /// Signed lookup where anything beyond the buffer reads as `Wall`.
    pub fn get_padded(&self, x: i64, y: i64) -> Tile {
        self.tiles.get_checked(x, y).copied().unwrap_or(Tile::Wall)
    }

    /// Set an interior tile. Writes outside the interior are ignored so the
    /// border stays solid.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if self.interior.contains(x, y) {
            self.tiles.set(x, y, tile);
        }
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        !self.interior.contains(x, y)
    }

    /// Interior 4-neighbors of an interior coordinate.
    pub fn interior_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let interior = self.interior;
        self.tiles
            .neighbors(coord.x, coord.y)
            .into_iter()
            .filter(move |&(x, y)| interior.contains(x, y))
            .map(Coord::from)
    }

    /// Count tiles of a given state across the whole buffer.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|(_, _, t)| **t == tile).count()
    }

    /// One string per row (`y`), `#` for wall and `.` for floor.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.total_height())
            .map(|y| {
                (0..self.total_width())
                    .map(|x| if self.get(x, y).is_wall() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Tilemap<Tile> {
        &mut self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_include_border() {
        let grid = Grid::new(10, 6, 2).unwrap();
        assert_eq!(grid.total_width(), 14);
        assert_eq!(grid.total_height(), 10);

        let interior = grid.interior();
        assert_eq!((interior.xmin, interior.ymin), (2, 2));
        assert_eq!((interior.xmax, interior.ymax), (11, 7));
        assert_eq!(interior.area(), 60);
    }

    #[test]
    fn test_border_writes_are_ignored() {
        let mut grid = Grid::new(3, 3, 1).unwrap();
        grid.set(0, 0, Tile::Floor);
        grid.set(1, 1, Tile::Floor);

        assert_eq!(grid.get(0, 0), Tile::Wall);
        assert_eq!(grid.get(1, 1), Tile::Floor);
        assert!(grid.is_border(4, 2));
    }

    #[test]
    fn test_padding_reads_wall() {
        let grid = Grid::from_rows(&["."], 0).unwrap();
        assert_eq!(grid.get(0, 0), Tile::Floor);
        assert_eq!(grid.get_padded(-1, 0), Tile::Wall);
        assert_eq!(grid.get_padded(0, 1), Tile::Wall);
    }

    #[test]
    fn test_interior_scan_order() {
        let grid = Grid::new(2, 2, 1).unwrap();
        let coords: Vec<_> = grid.interior().coords().collect();
        assert_eq!(
            coords,
            vec![Coord::new(1, 1), Coord::new(1, 2), Coord::new(2, 1), Coord::new(2, 2)]
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 5, 1),
            Err(GenerationError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(Grid::new(5, 0, 0).is_err());
        assert!(Grid::from_rows(&[], 0).is_err());
    }

    #[test]
    fn test_oversized_buffer_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2, 1),
            Err(GenerationError::InvalidDimensions { height: 2, .. })
        ));

        let side = 1usize << (usize::BITS / 2);
        assert!(Grid::new(side, side, 0).is_err());
        assert!(buffer_dimensions(2, usize::MAX / 2, 1).is_err());
        assert_eq!(buffer_dimensions(10, 6, 2).unwrap(), (14, 10));
    }

    #[test]
    fn test_squared_distance() {
        let a = Coord::new(1, 1);
        let b = Coord::new(4, 5);
        assert_eq!(a.squared_distance(&b), 25);
        assert_eq!(b.squared_distance(&a), 25);
    }
}
