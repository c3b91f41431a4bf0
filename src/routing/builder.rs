//! Route construction: discrete paths in, axis-aligned segments out.
//!
//! The builder owns the pathfinder and is the only place wire geometry is
//! produced. Every polyline source (an A* cell path, a smoothing pass,
//! explicit waypoints, the fallback L-route) goes through the same emission
//! step, which decomposes non-aligned hops through a synthetic bend. No
//! diagonal segment can escape this module.

use crate::geometry::{GridPosition, PixelPoint};
use crate::grid::PathFinder;
use crate::routing::types::{
    ConnectionKind, Port, RoutingStyle, WirePoint, WireSegment,
};
use crate::{DIRECT_STYLE_THRESHOLD, GRID_SIZE};

/// Tunable routing behavior.
#[derive(Debug, Clone, Copy)]
pub struct RoutingOptions {
    /// Run the line-of-sight smoothing pass over searched paths.
    pub smoothing: bool,
    /// Snap explicit waypoints to the grid before use.
    pub snap_waypoints: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            smoothing: false,
            snap_waypoints: true,
        }
    }
}

/// Converts discrete paths or waypoint lists into ordered wire segments.
#[derive(Debug, Default)]
pub struct RouteBuilder {
    finder: PathFinder,
    options: RoutingOptions,
}

impl RouteBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with explicit options.
    pub fn with_options(options: RoutingOptions) -> Self {
        Self {
            finder: PathFinder::new(),
            options,
        }
    }

    /// Shared access to the pathfinder.
    pub fn finder(&self) -> &PathFinder {
        &self.finder
    }

    /// Mark one grid cell permanently blocked.
    pub fn add_obstacle(&mut self, pos: GridPosition) {
        self.finder.grid_mut().add_obstacle(pos);
    }

    /// Register a component clearance zone.
    pub fn add_component_clearance(&mut self, center: GridPosition, radius: i32) {
        self.finder.grid_mut().add_component_clearance(center, radius);
    }

    /// Pick a routing style for a port pair.
    ///
    /// Nearby ports route `Direct` to cut visual clutter; the threshold is a
    /// heuristic, not a correctness requirement.
    pub fn select_style(&self, a: PixelPoint, b: PixelPoint) -> RoutingStyle {
        if a.distance_to(b) < DIRECT_STYLE_THRESHOLD {
            RoutingStyle::Direct
        } else {
            RoutingStyle::Manhattan
        }
    }

    /// Route a wire between two ports.
    ///
    /// A non-empty waypoint list is authoritative: the search is skipped
    /// entirely and the chain `start -> waypoints -> end` is emitted. With no
    /// waypoints the grid is searched; if the search fails the direct
    /// fallback L-route keeps the wire drawable (without obstacle-correctness
    /// guarantees).
    pub fn route(
        &mut self,
        start: &Port,
        end: &Port,
        waypoints: &[PixelPoint],
    ) -> Vec<WireSegment> {
        if !waypoints.is_empty() {
            return self.waypoint_route(start, end, waypoints);
        }

        let style = self.select_style(start.position, end.position);
        let from = self.finder.grid().pixel_to_grid(start.position);
        let to = self.finder.grid().pixel_to_grid(end.position);

        match self.finder.find_path(from, to, style) {
            Some(cells) => {
                let cells = if self.options.smoothing {
                    self.finder.smooth_path(&cells)
                } else {
                    cells
                };
                let points = self.points_from_cells(&cells, start.kind, end.kind);
                Self::emit_segments(&points)
            }
            None => self.fallback_route(start, end),
        }
    }

    /// Build the explicit-waypoint chain, one aligned-or-L hop per
    /// consecutive pair.
    fn waypoint_route(
        &self,
        start: &Port,
        end: &Port,
        waypoints: &[PixelPoint],
    ) -> Vec<WireSegment> {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(WirePoint::component(start.position, start.kind));
        for wp in waypoints {
            let position = if self.options.snap_waypoints {
                Self::snap_to_grid(*wp)
            } else {
                *wp
            };
            points.push(WirePoint::bend(position));
        }
        points.push(WirePoint::component(end.position, end.kind));
        Self::emit_segments(&points)
    }

    /// Two-segment L-route between the raw port positions; used when the
    /// search finds nothing, to preserve visual continuity.
    fn fallback_route(&self, start: &Port, end: &Port) -> Vec<WireSegment> {
        let points = [
            WirePoint::component(start.position, start.kind),
            WirePoint::component(end.position, end.kind),
        ];
        Self::emit_segments(&points)
    }

    /// Convert a cell path into wire points: endpoints tagged as component
    /// terminals, interior cells as bends, positions at cell centers.
    fn points_from_cells(
        &self,
        cells: &[GridPosition],
        start_kind: ConnectionKind,
        end_kind: ConnectionKind,
    ) -> Vec<WirePoint> {
        let grid = self.finder.grid();
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let position = grid.grid_to_pixel(*cell);
                if i == 0 {
                    WirePoint::component(position, start_kind)
                } else if i == last {
                    WirePoint::component(position, end_kind)
                } else {
                    WirePoint::bend(position)
                }
            })
            .collect()
    }

    /// Emit one segment per aligned consecutive pair; a non-aligned hop is
    /// decomposed into a horizontal then a vertical segment through one
    /// synthetic bend. Zero-length hops are dropped.
    fn emit_segments(points: &[WirePoint]) -> Vec<WireSegment> {
        let mut segments = Vec::new();
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let same_x = a.position.x == b.position.x;
            let same_y = a.position.y == b.position.y;

            if same_x && same_y {
                continue;
            }
            if same_x || same_y {
                segments.push(WireSegment::between(a, b));
            } else {
                let bend = WirePoint::bend(PixelPoint::new(b.position.x, a.position.y));
                segments.push(WireSegment::between(a, bend));
                segments.push(WireSegment::between(bend, b));
            }
        }
        segments
    }

    /// Snap a pixel point to the nearest grid line intersection.
    fn snap_to_grid(point: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: (point.x / GRID_SIZE).round() * GRID_SIZE,
            y: (point.y / GRID_SIZE).round() * GRID_SIZE,
        }
    }
}
