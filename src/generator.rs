//! Cave generation pipeline
//!
//! Pipeline:
//! 1. Validate the config (before anything is allocated)
//! 2. Allocate the grid and fill the interior with seeded noise
//! 3. Smooth with the cellular automaton
//! 4. Open small wall specks, then fill small floor pockets
//! 5. Turn floor regions into rooms and connect them to the main room
//!
//! Every call works on its own freshly allocated grid, so repeated or
//! concurrent calls never observe each other's state.

use log::{debug, info, warn};

use crate::config::CaveConfig;
use crate::denoise::denoise;
use crate::error::Result;
use crate::fill::seed_fill;
use crate::grid::{Grid, Tile};
use crate::rooms::{build_and_connect, RoomGraph};
use crate::smoothing::smooth;

/// Finished cave handed to the mesh builder.
#[derive(Clone, Debug)]
pub struct CaveMap {
    pub grid: Grid,
    pub rooms: RoomGraph,
    /// Untouched passthrough for the mesh builder.
    pub square_size: u32,
    /// The seed string the run actually used.
    pub seed: String,
    /// False when the seed was time-derived.
    pub reproducible: bool,
}

impl CaveMap {
    pub fn floor_ratio(&self) -> f64 {
        let area = self.grid.interior().area();
        let floors = self.grid.count(Tile::Floor);
        floors as f64 / area as f64
    }
}

/// Generate a cave from `config`.
pub fn generate(config: &CaveConfig) -> Result<CaveMap> {
    config.validate()?;

    let source = config.seed_source();
    let seed = source.resolve();
    if !source.is_reproducible() {
        warn!("Using time-derived seed \"{}\"; this run is not reproducible", seed);
    }

    let mut grid = Grid::new(config.width, config.height, config.border_width)?;

    seed_fill(&mut grid, &seed, config.random_fill_percent);
    debug!("Filled {} floor tile(s)", grid.count(Tile::Floor));

    smooth(&mut grid, config.smoothing_amount, config.smoothing_tolerance);
    debug!(
        "Smoothed {} pass(es), {} floor tile(s)",
        config.smoothing_amount,
        grid.count(Tile::Floor)
    );

    denoise(&mut grid, Tile::Wall, config.wall_denoising_tolerance);
    denoise(&mut grid, Tile::Floor, config.floor_denoising_tolerance);

    let rooms = build_and_connect(&grid);

    info!(
        "Generated {}x{} cave from seed \"{}\": {} room(s), {} passage(s)",
        config.width,
        config.height,
        seed,
        rooms.len(),
        rooms.passages().len()
    );

    Ok(CaveMap {
        grid,
        rooms,
        square_size: config.square_size,
        seed,
        reproducible: source.is_reproducible(),
    })
}
