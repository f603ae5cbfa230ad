//! tilecore: tile-based world core for 2D platformers — procedural level
//! generation, uniform-grid broadphase, tile-driven interaction rules, and
//! grid pathfinding. Rendering, audio, and persistence live elsewhere; this
//! crate consumes body snapshots and produces effect requests and paths.

pub mod api;
pub mod catalog;
pub mod collision;
pub mod grid;
pub mod mapgen;
pub mod pathfind;
pub mod spatial;
pub mod types;

pub use crate::api::CollisionApi;
pub use crate::catalog::TileCatalog;
pub use crate::collision::{CollisionWorld, TriggerId, TriggerOutcome, classify_side};
pub use crate::grid::TileGrid;
pub use crate::mapgen::{cave_map, maze_map, platform_map, smooth_pass};
pub use crate::pathfind::{Coord, find_path, simplify_path};
pub use crate::spatial::{SpatialGrid, SpatialStats};
pub use crate::types::*;
