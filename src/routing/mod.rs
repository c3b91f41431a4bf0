//! Wire routing: ports, segments, route construction, and the interactive
//! draw-a-wire workflow.

mod builder;
mod registry;
mod types;

pub use builder::{RouteBuilder, RoutingOptions};
pub use registry::{CreationState, PortRegistry};
pub use types::{
    ConnectionKind, PointKind, Port, PortId, RoutingStyle, ValidationResult, Wire, WireId,
    WirePoint, WireSegment, SegmentOrientation,
};
