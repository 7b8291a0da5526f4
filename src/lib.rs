//! Cave generation library
//!
//! Re-exports modules for use by the binary and by mesh builders.

pub mod ascii;
pub mod config;
pub mod denoise;
pub mod error;
pub mod export;
pub mod fill;
pub mod generator;
pub mod grid;
pub mod regions;
pub mod rooms;
pub mod seeds;
pub mod smoothing;
pub mod tilemap;

pub use config::CaveConfig;
pub use error::GenerationError;
pub use generator::{generate, CaveMap};
pub use grid::{Coord, Grid, Tile};
pub use rooms::{Passage, Room, RoomGraph, RoomId};
