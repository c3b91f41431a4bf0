//! Routing grid: coordinate mapping, obstacle bookkeeping, and pathfinding.

mod index;
mod pathfinder;

pub use index::{ComponentClearance, GridIndex, GridNode};
pub use pathfinder::PathFinder;
