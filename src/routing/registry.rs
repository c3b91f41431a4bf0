//! Port registry and the interactive draw-a-wire state machine.
//!
//! Ports are registered when wires are constructed and live as long as the
//! registry. Wire creation is a two-state machine: `Idle` until a start port
//! is picked, `Drawing` while the preview follows the pointer and waypoints
//! accumulate, then back to `Idle` when the wire is completed.

use indexmap::IndexMap;
use log::warn;

use crate::geometry::{Direction, PixelPoint};
use crate::routing::builder::RouteBuilder;
use crate::routing::types::{
    ConnectionKind, Port, PortId, ValidationResult, Wire, WireId, WirePoint,
};
use crate::PORT_SEARCH_RADIUS;

/// Wire-creation state.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationState {
    Idle,
    Drawing {
        start_port: PortId,
        waypoints: Vec<PixelPoint>,
        preview: Vec<WirePoint>,
    },
}

/// Tracks ports and wires and drives interactive wire creation.
#[derive(Debug, Default)]
pub struct PortRegistry {
    ports: IndexMap<PortId, Port>,
    wires: IndexMap<WireId, Wire>,
    builder: RouteBuilder,
    state: CreationState,
    next_wire: u64,
}

impl Default for CreationState {
    fn default() -> Self {
        CreationState::Idle
    }
}

impl PortRegistry {
    /// Create an empty registry with a fresh routing grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a port, keyed by id. Re-registering the same id replaces the
    /// stored port, so repeated registration of an identical port is a no-op.
    pub fn register_port(&mut self, port: Port) {
        self.ports.insert(port.id.clone(), port);
    }

    /// Look up a registered port.
    pub fn port(&self, id: &PortId) -> Option<&Port> {
        self.ports.get(id)
    }

    /// All registered ports, in registration order.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    /// Access the route builder (obstacle registration, style queries).
    pub fn builder_mut(&mut self) -> &mut RouteBuilder {
        &mut self.builder
    }

    /// All wires, in creation order.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    /// Look up a wire by id.
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    /// Current wire-creation state.
    pub fn creation_state(&self) -> &CreationState {
        &self.state
    }

    /// Find a port within `radius` pixels of `point`.
    ///
    /// Ports are scanned in registration order and the first hit wins, which
    /// is not necessarily the closest one. Callers needing the true nearest
    /// port must compare distances over [`Self::ports`] themselves.
    pub fn find_nearest_port(&self, point: PixelPoint, radius: f64) -> Option<&Port> {
        self.ports
            .values()
            .find(|port| port.position.distance_to(point) <= radius)
    }

    /// [`Self::find_nearest_port`] with the default search radius.
    pub fn find_port_near(&self, point: PixelPoint) -> Option<&Port> {
        self.find_nearest_port(point, PORT_SEARCH_RADIUS)
    }

    /// Check whether two ports may be wired together.
    ///
    /// Two ports of the same directional kind cannot be connected; the
    /// outcome is a structured validation result, not an error.
    pub fn validate_connection(&self, start: &Port, end: &Port) -> ValidationResult {
        if start.kind == end.kind {
            return ValidationResult::invalid(format!("Cannot connect two {}s", start.kind));
        }
        ValidationResult::valid()
    }

    /// Construct a wire directly, outside the interactive workflow.
    ///
    /// This is the entry point for externally supplied waypoints (e.g. a
    /// schematic file that stores hand-drawn routes): a non-empty waypoint
    /// list is honored verbatim instead of invoking the search. Both ports
    /// are registered as a side effect.
    pub fn create_wire(
        &mut self,
        start: Port,
        end: Port,
        waypoints: Vec<PixelPoint>,
    ) -> WireId {
        let segments = self.builder.route(&start, &end, &waypoints);
        let id = WireId(self.next_wire);
        self.next_wire += 1;

        let wire = Wire {
            id,
            segments,
            start_port: start.id.clone(),
            end_port: end.id.clone(),
            start_component: start.component,
            end_component: end.component,
            waypoints,
        };

        self.register_port(start);
        self.register_port(end);
        self.wires.insert(id, wire);
        id
    }

    /// Begin interactive wire creation from `start_port`.
    ///
    /// Registers the port, resets any pending waypoints, and moves the state
    /// machine to `Drawing`.
    pub fn start_wire_creation(&mut self, start_port: Port) {
        let id = start_port.id.clone();
        self.register_port(start_port);
        self.state = CreationState::Drawing {
            start_port: id,
            waypoints: Vec::new(),
            preview: Vec::new(),
        };
    }

    /// Recompute the preview route from the start port to the pointer.
    ///
    /// A synthetic candidate port is placed at `point`; the preview is the
    /// flattened point list of the would-be route. Outside a drawing session
    /// this is a no-op.
    pub fn update_preview(&mut self, point: PixelPoint) {
        let CreationState::Drawing {
            start_port,
            waypoints,
            ..
        } = &self.state
        else {
            return;
        };
        let Some(start) = self.ports.get(start_port).cloned() else {
            return;
        };

        let candidate = Port {
            id: PortId("preview".to_string()),
            position: point,
            direction: Direction::West,
            kind: opposite_kind(start.kind),
            component: start.component,
        };
        let waypoints = waypoints.clone();
        let segments = self.builder.route(&start, &candidate, &waypoints);

        let mut preview = Vec::with_capacity(segments.len() * 2);
        for segment in &segments {
            preview.push(segment.start);
            preview.push(segment.end);
        }

        if let CreationState::Drawing {
            preview: slot, ..
        } = &mut self.state
        {
            *slot = preview;
        }
    }

    /// Append a waypoint to the pending route and refresh the preview.
    ///
    /// Outside a drawing session this is a no-op.
    pub fn add_waypoint(&mut self, point: PixelPoint) {
        if let CreationState::Drawing { waypoints, .. } = &mut self.state {
            waypoints.push(point);
            self.update_preview(point);
        }
    }

    /// Finish the wire at `end_port`, consuming the accumulated waypoints.
    ///
    /// Returns the new wire id, or `None` (with a logged warning) when no
    /// creation session is active; a stray pointer-up is not an error.
    pub fn complete_wire(&mut self, end_port: Port) -> Option<WireId> {
        let state = std::mem::take(&mut self.state);
        let CreationState::Drawing {
            start_port,
            waypoints,
            ..
        } = state
        else {
            warn!("complete_wire called with no wire creation in progress");
            return None;
        };

        let Some(start) = self.ports.get(&start_port).cloned() else {
            warn!("start port '{start_port}' disappeared during wire creation");
            return None;
        };

        Some(self.create_wire(start, end_port, waypoints))
    }
}

fn opposite_kind(kind: ConnectionKind) -> ConnectionKind {
    match kind {
        ConnectionKind::Input => ConnectionKind::Output,
        ConnectionKind::Output => ConnectionKind::Input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ComponentId;

    fn port(id: &str, x: f64, y: f64, kind: ConnectionKind) -> Port {
        Port {
            id: PortId(id.to_string()),
            position: PixelPoint::new(x, y),
            direction: Direction::East,
            kind,
            component: ComponentId(0),
        }
    }

    #[test]
    fn test_register_port_is_idempotent() {
        let mut registry = PortRegistry::new();
        let p = port("a", 10.0, 10.0, ConnectionKind::Output);
        registry.register_port(p.clone());
        registry.register_port(p);
        assert_eq!(registry.ports.len(), 1);
    }

    #[test]
    fn test_find_nearest_port_returns_first_match() {
        let mut registry = PortRegistry::new();
        // Farther port registered first
        registry.register_port(port("far", 8.0, 0.0, ConnectionKind::Output));
        registry.register_port(port("close", 1.0, 0.0, ConnectionKind::Input));

        let found = registry
            .find_nearest_port(PixelPoint::new(0.0, 0.0), 10.0)
            .unwrap();
        // First within radius in registration order, not the true nearest
        assert_eq!(found.id, PortId("far".to_string()));
    }

    #[test]
    fn test_find_nearest_port_out_of_range() {
        let mut registry = PortRegistry::new();
        registry.register_port(port("a", 500.0, 500.0, ConnectionKind::Output));
        assert!(registry.find_port_near(PixelPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_validate_connection_rejects_same_kind() {
        let registry = PortRegistry::new();
        let a = port("a", 0.0, 0.0, ConnectionKind::Output);
        let b = port("b", 50.0, 0.0, ConnectionKind::Output);

        let result = registry.validate_connection(&a, &b);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Cannot connect two outputs".to_string()]);

        let c = port("c", 50.0, 0.0, ConnectionKind::Input);
        assert!(registry.validate_connection(&a, &c).is_valid);
    }

    #[test]
    fn test_wire_creation_workflow() {
        let mut registry = PortRegistry::new();
        let start = port("start", 50.0, 50.0, ConnectionKind::Output);
        let end = port("end", 370.0, 370.0, ConnectionKind::Input);

        registry.start_wire_creation(start);
        assert!(matches!(
            registry.creation_state(),
            CreationState::Drawing { .. }
        ));

        registry.update_preview(PixelPoint::new(200.0, 200.0));
        let CreationState::Drawing { preview, .. } = registry.creation_state() else {
            panic!("expected drawing state");
        };
        assert!(!preview.is_empty());

        let id = registry.complete_wire(end).unwrap();
        assert_eq!(registry.creation_state(), &CreationState::Idle);

        let wire = registry.wire(id).unwrap();
        assert_eq!(wire.start_port, PortId("start".to_string()));
        assert_eq!(wire.end_port, PortId("end".to_string()));
        assert!(!wire.segments.is_empty());
    }

    #[test]
    fn test_waypoints_carry_into_completed_wire() {
        let mut registry = PortRegistry::new();
        let start = port("start", 50.0, 50.0, ConnectionKind::Output);
        let end = port("end", 370.0, 50.0, ConnectionKind::Input);

        registry.start_wire_creation(start);
        registry.add_waypoint(PixelPoint::new(200.0, 200.0));
        let id = registry.complete_wire(end).unwrap();

        let wire = registry.wire(id).unwrap();
        assert_eq!(wire.waypoints, vec![PixelPoint::new(200.0, 200.0)]);
        let hits_waypoint = wire.segments.iter().any(|seg| {
            seg.start.position == PixelPoint::new(200.0, 200.0)
                || seg.end.position == PixelPoint::new(200.0, 200.0)
        });
        assert!(hits_waypoint);
    }

    #[test]
    fn test_complete_wire_while_idle_is_a_noop() {
        let mut registry = PortRegistry::new();
        let end = port("end", 370.0, 370.0, ConnectionKind::Input);

        assert!(registry.complete_wire(end).is_none());
        assert_eq!(registry.creation_state(), &CreationState::Idle);
        assert_eq!(registry.wires().count(), 0);
    }

    #[test]
    fn test_start_wire_creation_resets_waypoints() {
        let mut registry = PortRegistry::new();
        let start = port("start", 50.0, 50.0, ConnectionKind::Output);

        registry.start_wire_creation(start.clone());
        registry.add_waypoint(PixelPoint::new(100.0, 100.0));
        registry.start_wire_creation(start);

        let CreationState::Drawing { waypoints, .. } = registry.creation_state() else {
            panic!("expected drawing state");
        };
        assert!(waypoints.is_empty());
    }

    #[test]
    fn test_create_wire_with_external_waypoints() {
        let mut registry = PortRegistry::new();
        let start = port("start", 50.0, 50.0, ConnectionKind::Output);
        let end = port("end", 370.0, 370.0, ConnectionKind::Input);

        let id = registry.create_wire(
            start,
            end,
            vec![PixelPoint::new(100.0, 300.0), PixelPoint::new(300.0, 300.0)],
        );
        let wire = registry.wire(id).unwrap();
        assert_eq!(wire.waypoints.len(), 2);
        for seg in &wire.segments {
            assert!(seg.is_axis_aligned());
        }
    }
}
