//! Core types for wire routing.

use std::fmt;

use crate::circuit::ComponentId;
use crate::geometry::{Direction, PixelPoint};

/// A unique identifier for a registered port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortId(pub String);

impl PortId {
    /// Conventional id for a port derived from a component terminal.
    pub fn for_terminal(component_type: &str, terminal: usize) -> Self {
        Self(format!("{component_type}-{terminal}"))
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireId(pub u64);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// Whether a port sources or sinks a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Input,
    Output,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Input => write!(f, "input"),
            ConnectionKind::Output => write!(f, "output"),
        }
    }
}

/// A directional connection endpoint used by the router.
///
/// Distinct from a component's raw [`ConnectionPoint`]: ports carry routing
/// metadata (facing direction, input/output kind) on top of the position.
///
/// [`ConnectionPoint`]: crate::components::ConnectionPoint
#[derive(Debug, Clone)]
pub struct Port {
    pub id: PortId,
    pub position: PixelPoint,
    pub direction: Direction,
    pub kind: ConnectionKind,
    /// Owning component, as a non-owning arena id.
    pub component: ComponentId,
}

/// Role of a point within a wire polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Endpoint attached to a component terminal
    Component,
    /// Interior turn
    Bend,
    /// Meeting point of more than two segments
    Junction,
}

/// One vertex of a routed wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WirePoint {
    pub position: PixelPoint,
    pub kind: PointKind,
    /// Set only when `kind` is [`PointKind::Component`].
    pub connection: Option<ConnectionKind>,
}

impl WirePoint {
    /// An endpoint attached to a component terminal.
    pub fn component(position: PixelPoint, connection: ConnectionKind) -> Self {
        Self {
            position,
            kind: PointKind::Component,
            connection: Some(connection),
        }
    }

    /// An interior bend.
    pub fn bend(position: PixelPoint) -> Self {
        Self {
            position,
            kind: PointKind::Bend,
            connection: None,
        }
    }
}

/// Axis alignment of a wire segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentOrientation {
    Horizontal,
    Vertical,
}

/// An axis-aligned piece of a routed wire.
///
/// Exactly one of `start.x == end.x` or `start.y == end.y` holds; diagonal
/// segments never reach this type regardless of how the underlying cell path
/// was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireSegment {
    pub start: WirePoint,
    pub end: WirePoint,
    pub orientation: SegmentOrientation,
}

impl WireSegment {
    /// Build a segment between two aligned points, deriving the orientation.
    ///
    /// Points sharing an x coordinate produce a vertical segment, everything
    /// else horizontal (matching how the editor classifies hand-drawn runs).
    pub fn between(start: WirePoint, end: WirePoint) -> Self {
        let orientation = if start.position.x == end.position.x {
            SegmentOrientation::Vertical
        } else {
            SegmentOrientation::Horizontal
        };
        Self {
            start,
            end,
            orientation,
        }
    }

    /// Whether the segment satisfies the axis-alignment invariant.
    pub fn is_axis_aligned(&self) -> bool {
        let same_x = self.start.position.x == self.end.position.x;
        let same_y = self.start.position.y == self.end.position.y;
        same_x != same_y
    }

    /// Segment length in pixels.
    pub fn length(&self) -> f64 {
        self.start.position.distance_to(self.end.position)
    }
}

/// A routed wire between two ports.
#[derive(Debug, Clone)]
pub struct Wire {
    pub id: WireId,
    /// Ordered segments from the start port to the end port.
    pub segments: Vec<WireSegment>,
    pub start_port: PortId,
    pub end_port: PortId,
    pub start_component: ComponentId,
    pub end_component: ComponentId,
    /// Explicit waypoints; when non-empty they are authoritative over any
    /// searched path.
    pub waypoints: Vec<PixelPoint>,
}

impl Wire {
    /// The wire's vertices in order: each segment's start plus the final
    /// segment's end, with duplicate points at shared boundaries removed.
    ///
    /// This is the polyline an animation driver walks to move markers along
    /// the wire.
    pub fn polyline(&self) -> Vec<PixelPoint> {
        let mut points: Vec<PixelPoint> = Vec::with_capacity(self.segments.len() + 1);
        for segment in &self.segments {
            if points.last() != Some(&segment.start.position) {
                points.push(segment.start.position);
            }
        }
        if let Some(last) = self.segments.last() {
            if points.last() != Some(&last.end.position) {
                points.push(last.end.position);
            }
        }
        points
    }
}

/// Routing style for a single wire.
///
/// `Direct` allows diagonal search steps for short hops (the builder
/// decomposes them back into axis-aligned segments); `Manhattan` restricts
/// the search to orthogonal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingStyle {
    Manhattan,
    Direct,
}

/// Outcome of a port-compatibility check.
///
/// A failed validation is an expected user-facing condition, not an error:
/// callers inspect `is_valid` and surface `errors` in the editor UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing validation.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing validation with one message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_orientation() {
        let a = WirePoint::bend(PixelPoint::new(10.0, 10.0));
        let b = WirePoint::bend(PixelPoint::new(10.0, 50.0));
        let seg = WireSegment::between(a, b);
        assert_eq!(seg.orientation, SegmentOrientation::Vertical);
        assert!(seg.is_axis_aligned());

        let c = WirePoint::bend(PixelPoint::new(50.0, 10.0));
        let seg = WireSegment::between(a, c);
        assert_eq!(seg.orientation, SegmentOrientation::Horizontal);
        assert!(seg.is_axis_aligned());
    }

    #[test]
    fn test_polyline_dedupes_shared_boundaries() {
        let p0 = WirePoint::component(PixelPoint::new(0.0, 0.0), ConnectionKind::Output);
        let p1 = WirePoint::bend(PixelPoint::new(40.0, 0.0));
        let p2 = WirePoint::component(PixelPoint::new(40.0, 40.0), ConnectionKind::Input);

        let wire = Wire {
            id: WireId(0),
            segments: vec![WireSegment::between(p0, p1), WireSegment::between(p1, p2)],
            start_port: PortId("a".into()),
            end_port: PortId("b".into()),
            start_component: ComponentId(0),
            end_component: ComponentId(1),
            waypoints: Vec::new(),
        };

        let points = wire.polyline();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], PixelPoint::new(40.0, 0.0));
    }

    #[test]
    fn test_validation_result_helpers() {
        assert!(ValidationResult::valid().is_valid);
        let invalid = ValidationResult::invalid("Cannot connect two outputs");
        assert!(!invalid.is_valid);
        assert_eq!(invalid.errors.len(), 1);
    }
}
