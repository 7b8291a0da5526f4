//! Room graph construction and connection
//!
//! Every floor region of the finished grid becomes a room. The largest room is
//! the main room, and rooms are joined pairwise by their nearest edge tiles
//! until every room can be reached from it.
//!
//! Algorithm:
//! 1. Extract floor regions and build one `Room` per region (ids follow region order)
//! 2. Mark the largest room as main (first one wins on ties)
//! 3. Local pass: every room without connections is joined to its closest room
//! 4. Repair pass: repeatedly join the closest (inaccessible, accessible) pair
//!    until no inaccessible room remains
//!
//! Rooms live in an arena and refer to each other by `RoomId`.

use std::collections::{BTreeSet, VecDeque};

use log::{debug, warn};
use serde::Serialize;

use crate::grid::{Coord, Grid, Tile};
use crate::regions::{extract_regions, Region};

/// Index of a room in its `RoomGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoomId(pub usize);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room#{}", self.0)
    }
}

/// A floor region promoted to a graph node.
#[derive(Clone, Debug, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub tiles: Vec<Coord>,
    /// Floor tiles with at least one wall among their 4-neighbors.
    pub edge_tiles: Vec<Coord>,
    pub connected: BTreeSet<RoomId>,
    pub is_main: bool,
    pub is_accessible_from_main: bool,
}

impl Room {
    fn new(id: RoomId, tiles: Region, grid: &Grid) -> Self {
        let edge_tiles = tiles.iter().copied().filter(|&c| is_edge_tile(grid, c)).collect();
        Self {
            id,
            tiles,
            edge_tiles,
            connected: BTreeSet::new(),
            is_main: false,
            is_accessible_from_main: false,
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_connected(&self, other: RoomId) -> bool {
        self.connected.contains(&other)
    }
}

/// A floor tile is an edge tile if a wall sits directly left, right, above or
/// below it. Off-buffer neighbors read as wall.
fn is_edge_tile(grid: &Grid, coord: Coord) -> bool {
    let (x, y) = (coord.x as i64, coord.y as i64);
    [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
        .into_iter()
        .any(|(nx, ny)| grid.get_padded(nx, ny) == Tile::Wall)
}

/// The line drawn for one connection, from an edge tile of one room to an edge
/// tile of the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Passage {
    pub from: RoomId,
    pub to: RoomId,
    pub from_tile: Coord,
    pub to_tile: Coord,
}

impl Passage {
    /// Endpoints in mesh space: the grid is centered on the origin and every
    /// tile is a `square_size` square, so a tile maps to its square's center.
    pub fn world_endpoints(&self, grid: &Grid, square_size: u32) -> ((f32, f32), (f32, f32)) {
        let to_world = |c: Coord| {
            let size = square_size as f32;
            let wx = (-(grid.total_width() as f32) / 2.0 + 0.5 + c.x as f32) * size;
            let wz = (-(grid.total_height() as f32) / 2.0 + 0.5 + c.y as f32) * size;
            (wx, wz)
        };
        (to_world(self.from_tile), to_world(self.to_tile))
    }
}

/// Best candidate found by a nearest-pair search.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    a: RoomId,
    b: RoomId,
    tile_a: Coord,
    tile_b: Coord,
    distance: u64,
}

/// Arena of rooms plus the passages that connect them.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RoomGraph {
    rooms: Vec<Room>,
    passages: Vec<Passage>,
    main: Option<RoomId>,
}

impl RoomGraph {
    /// Build unconnected rooms from the floor regions of `grid` and pick the main room.
    pub fn from_grid(grid: &Grid) -> Self {
        let rooms: Vec<Room> = extract_regions(grid, Tile::Floor)
            .into_iter()
            .enumerate()
            .map(|(i, region)| Room::new(RoomId(i), region, grid))
            .collect();

        let mut graph = Self {
            rooms,
            passages: Vec::new(),
            main: None,
        };
        graph.select_main_room();
        graph
    }

    fn select_main_room(&mut self) {
        let mut best: Option<&Room> = None;
        for room in &self.rooms {
            if best.map_or(true, |b| room.size() > b.size()) {
                best = Some(room);
            }
        }

        self.main = best.map(|room| room.id);
        if let Some(id) = self.main {
            let room = &mut self.rooms[id.0];
            room.is_main = true;
            room.is_accessible_from_main = true;
        }
    }

    /// Join rooms until every room is reachable from the main room.
    pub fn connect_all(&mut self) {
        self.connect_nearest_neighbors();
        self.connect_to_main();
    }

    /// Local pass: each room that has no connection yet when its turn comes is
    /// joined to its closest room.
    fn connect_nearest_neighbors(&mut self) {
        for index in 0..self.rooms.len() {
            let id = RoomId(index);
            if !self.rooms[index].connected.is_empty() {
                continue;
            }
            let others: Vec<RoomId> = (0..self.rooms.len()).map(RoomId).collect();
            if let Some(candidate) = self.closest_pair(&[id], &others) {
                self.connect(candidate);
            }
        }
        debug!("Local pass created {} passage(s)", self.passages.len());
    }

    /// Repair pass: join the closest inaccessible/accessible pair until all rooms
    /// are accessible. Each connection makes at least one more room accessible.
    fn connect_to_main(&mut self) {
        let before = self.passages.len();
        loop {
            let (accessible, inaccessible): (Vec<RoomId>, Vec<RoomId>) = self
                .rooms
                .iter()
                .map(|room| room.id)
                .partition(|id| self.rooms[id.0].is_accessible_from_main);

            if inaccessible.is_empty() || accessible.is_empty() {
                break;
            }

            match self.closest_pair(&inaccessible, &accessible) {
                Some(candidate) => self.connect(candidate),
                None => {
                    warn!(
                        "{} room(s) have no edge tiles to connect from and stay unreachable",
                        inaccessible.len()
                    );
                    break;
                }
            }
        }
        debug!("Repair pass created {} passage(s)", self.passages.len() - before);
    }

    /// Closest pair of edge tiles between a room of `list_a` and a different,
    /// not yet connected room of `list_b`. Exact ties keep the first pair found
    /// in (room a, room b, edge tile a, edge tile b) order.
    fn closest_pair(&self, list_a: &[RoomId], list_b: &[RoomId]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for &a in list_a {
            let room_a = &self.rooms[a.0];
            for &b in list_b {
                if a == b || room_a.is_connected(b) {
                    continue;
                }
                let room_b = &self.rooms[b.0];
                for &tile_a in &room_a.edge_tiles {
                    for &tile_b in &room_b.edge_tiles {
                        let distance = tile_a.squared_distance(&tile_b);
                        if best.map_or(true, |c| distance < c.distance) {
                            best = Some(Candidate {
                                a,
                                b,
                                tile_a,
                                tile_b,
                                distance,
                            });
                        }
                    }
                }
            }
        }

        best
    }

    fn connect(&mut self, candidate: Candidate) {
        let Candidate { a, b, tile_a, tile_b, .. } = candidate;

        self.rooms[a.0].connected.insert(b);
        self.rooms[b.0].connected.insert(a);

        if self.rooms[a.0].is_accessible_from_main {
            self.mark_accessible(b);
        } else if self.rooms[b.0].is_accessible_from_main {
            self.mark_accessible(a);
        }

        self.passages.push(Passage {
            from: a,
            to: b,
            from_tile: tile_a,
            to_tile: tile_b,
        });
    }

    /// Flag `start` and everything connected to it as accessible.
    fn mark_accessible(&mut self, start: RoomId) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let room = &mut self.rooms[id.0];
            if room.is_accessible_from_main {
                continue;
            }
            room.is_accessible_from_main = true;
            stack.extend(room.connected.iter().copied());
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn main_room(&self) -> Option<&Room> {
        self.main.and_then(|id| self.room(id))
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms reachable from `start` over connections, in BFS order.
    pub fn reachable_from(&self, start: RoomId) -> Vec<RoomId> {
        if start.0 >= self.rooms.len() {
            return Vec::new();
        }
        let mut seen = vec![false; self.rooms.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen[start.0] = true;

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &next in &self.rooms[id.0].connected {
                if !seen[next.0] {
                    seen[next.0] = true;
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// True if a traversal from the main room reaches every room and every
    /// room carries the accessible flag. An empty graph is trivially connected.
    pub fn is_fully_connected(&self) -> bool {
        match self.main {
            None => self.rooms.is_empty(),
            Some(main) => {
                self.reachable_from(main).len() == self.rooms.len()
                    && self.rooms.iter().all(|room| room.is_accessible_from_main)
            }
        }
    }
}

/// Build rooms from the floor regions of `grid` and connect them to the main room.
pub fn build_and_connect(grid: &Grid) -> RoomGraph {
    let mut graph = RoomGraph::from_grid(grid);
    graph.connect_all();
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_room_edge_tiles() {
        let grid = Grid::from_rows(&["###", "#.#", "###"], 0).unwrap();
        let graph = build_and_connect(&grid);

        assert_eq!(graph.len(), 1);
        let room = &graph.rooms()[0];
        assert_eq!(room.size(), 1);
        assert!((1..=4).contains(&room.edge_tiles.len()));
        assert!(room.is_main && room.is_accessible_from_main);
        assert!(graph.passages().is_empty());
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn test_edge_tiles_ignore_diagonal_walls() {
        // Center tile only touches walls diagonally.
        let grid = Grid::from_rows(&["#.#", "...", "#.#"], 1).unwrap();
        let graph = RoomGraph::from_grid(&grid);
        let room = &graph.rooms()[0];

        assert_eq!(room.size(), 5);
        assert!(!room.edge_tiles.contains(&Coord::new(2, 2)));
        assert_eq!(room.edge_tiles.len(), 4);
    }

    #[test]
    fn test_two_rooms_join_and_larger_is_main() {
        let grid = Grid::from_rows(&["..#...", "..#...", "###..."], 1).unwrap();
        let graph = build_and_connect(&grid);

        assert_eq!(graph.len(), 2);
        let main = graph.main_room().unwrap();
        assert_eq!(main.size(), 9);
        assert_eq!(graph.passages().len(), 1);
        assert!(graph.is_fully_connected());
        assert!(graph.rooms()[0].is_connected(RoomId(1)));
        assert!(graph.rooms()[1].is_connected(RoomId(0)));
    }

    #[test]
    fn test_main_room_tie_keeps_first() {
        let grid = Grid::from_rows(&[".#.", ".#."], 0).unwrap();
        let graph = RoomGraph::from_grid(&grid);
        assert_eq!(graph.main_room().map(|r| r.id), Some(RoomId(0)));
        assert!(!graph.rooms()[1].is_main);
    }

    #[test]
    fn test_repair_pass_links_separate_clusters() {
        // Two pairs of rooms: each pair joins locally, then the pair without
        // the main room gets joined by the repair pass.
        let rows = [
            "...#.#########",
            "...#.#####.#..",
            "...#.#####.#..",
        ];
        let grid = Grid::from_rows(&rows, 1).unwrap();
        let mut graph = RoomGraph::from_grid(&grid);
        assert_eq!(graph.len(), 4);

        graph.connect_nearest_neighbors();
        assert_eq!(graph.passages().len(), 2);
        assert!(!graph.is_fully_connected());

        graph.connect_to_main();
        assert_eq!(graph.passages().len(), 3);
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn test_accessibility_propagates_through_chain() {
        let grid = Grid::from_rows(&[".#.#.#."], 0).unwrap();
        let mut graph = RoomGraph::from_grid(&grid);
        graph.connect(Candidate {
            a: RoomId(1),
            b: RoomId(2),
            tile_a: Coord::new(2, 0),
            tile_b: Coord::new(4, 0),
            distance: 4,
        });
        graph.connect(Candidate {
            a: RoomId(2),
            b: RoomId(3),
            tile_a: Coord::new(4, 0),
            tile_b: Coord::new(6, 0),
            distance: 4,
        });
        assert!(!graph.rooms()[3].is_accessible_from_main);

        graph.connect(Candidate {
            a: RoomId(0),
            b: RoomId(1),
            tile_a: Coord::new(0, 0),
            tile_b: Coord::new(2, 0),
            distance: 4,
        });
        assert!(graph.rooms().iter().all(|r| r.is_accessible_from_main));
    }

    #[test]
    fn test_closest_pair_tie_keeps_first() {
        // Room 1 sits at squared distance 4 from both room 0 and room 2.
        let grid = Grid::from_rows(&[".#.#."], 0).unwrap();
        let graph = RoomGraph::from_grid(&grid);
        let ids: Vec<RoomId> = (0..graph.len()).map(RoomId).collect();

        let from_middle = graph.closest_pair(&[RoomId(1)], &ids).unwrap();
        assert_eq!(from_middle.b, RoomId(0));
        assert_eq!(from_middle.distance, 4);

        let from_first = graph.closest_pair(&[RoomId(0)], &ids).unwrap();
        assert_eq!(from_first.b, RoomId(1));
    }

    #[test]
    fn test_world_endpoints_are_centered() {
        let grid = Grid::from_rows(&["....", "...."], 0).unwrap();
        let passage = Passage {
            from: RoomId(0),
            to: RoomId(1),
            from_tile: Coord::new(0, 0),
            to_tile: Coord::new(3, 1),
        };
        let (start, end) = passage.world_endpoints(&grid, 2);
        assert_eq!(start, (-3.0, -1.0));
        assert_eq!(end, (3.0, 1.0));
    }

    #[test]
    fn test_empty_grid_has_no_rooms() {
        let grid = Grid::from_rows(&["###", "###"], 0).unwrap();
        let graph = build_and_connect(&grid);
        assert!(graph.is_empty());
        assert!(graph.main_room().is_none());
        assert!(graph.is_fully_connected());
    }
}
