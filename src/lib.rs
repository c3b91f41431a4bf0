//! # Schematic Core
//!
//! Routing and topology engines for an interactive circuit schematic editor.
//!
//! This library provides:
//! - A grid-constrained wire router that finds obstacle-avoiding, axis-aligned
//!   paths between component terminals
//! - An interactive draw-a-wire workflow (port registration, previews,
//!   manual waypoints)
//! - A circuit topology resolver that walks the component connection graph to
//!   decide whether a closed current loop exists and in what order
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`grid`] - Pixel/grid mapping, obstacle bookkeeping, and A* pathfinding
//! - [`routing`] - Segment construction, waypoints, and the port registry
//! - [`circuit`] - Component arena, connections, and closed-loop resolution
//! - [`components`] - Component models (battery, switch, LED) and the
//!   component type registry
//! - [`simulation`] - Loop polyline stitching for an external animation driver
//!
//! ## Usage
//!
//! ```
//! use schematic_core::circuit::Circuit;
//! use schematic_core::components::{AssetHandle, Battery, Component, Led, Switch};
//!
//! let mut circuit = Circuit::new();
//! let battery =
//!     circuit.add_element(Component::Battery(Battery::new(100.0, 100.0, 1.5, AssetHandle(0))));
//! let switch =
//!     circuit.add_element(Component::Switch(Switch::new(200.0, 100.0, true, AssetHandle(1))));
//! let led = circuit.add_element(Component::Led(Led::new(300.0, 100.0, AssetHandle(2))));
//!
//! circuit.connect(battery, 0, switch, 0).unwrap();
//! circuit.connect(switch, 1, led, 0).unwrap();
//! circuit.connect(led, 1, battery, 1).unwrap();
//!
//! assert!(circuit.resolve());
//! ```
//!
//! ## Routing Method
//!
//! A wire between two ports is routed in three stages:
//!
//! 1. Pick a routing style from the port distance (short hops may cut
//!    diagonally, long runs stay Manhattan)
//! 2. Run A* over the occupancy grid, or honor explicit waypoints verbatim
//! 3. Convert the discrete path into strictly horizontal/vertical segments,
//!    decomposing any non-aligned hop through a synthetic bend
//!
//! Pathfinding failure is never fatal: the builder falls back to a direct
//! two-segment L-route so the editor always has something to draw.

pub mod circuit;
pub mod components;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod routing;
pub mod simulation;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{Result, SchematicError};
pub use routing::{PortRegistry, RouteBuilder};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSchematicEditor;

/// Pixel size of one routing grid cell.
pub const GRID_SIZE: f64 = 20.0;

/// Inclusive upper bound of valid grid cell coordinates on both axes.
pub const MAX_GRID: i32 = 100;

/// Default radius (pixels) for nearest-port lookup.
pub const PORT_SEARCH_RADIUS: f64 = 10.0;

/// Port pairs closer than this (Euclidean, pixels) route with the `Direct`
/// style; everything farther stays Manhattan.
pub const DIRECT_STYLE_THRESHOLD: f64 = 60.0;
