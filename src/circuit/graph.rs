//! Component arena and closed-loop resolution.
//!
//! Components form an undirected graph solely through the symmetric
//! `connected` back-references on their connection points. The resolver walks
//! that graph from the power source's positive terminal with an explicit
//! stack; every component here has at most two terminals, so the traversal is
//! a bounded chain walk rather than general graph search.

use std::collections::HashSet;

use super::types::{ComponentId, PathNode};
use crate::components::{Battery, Component};
use crate::error::{Result, SchematicError};

/// A circuit: the component arena plus the cached resolution result.
#[derive(Debug, Default)]
pub struct Circuit {
    elements: Vec<Component>,
    closed: bool,
    path: Vec<PathNode>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, returning its arena id.
    pub fn add_element(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.elements.len());
        self.elements.push(component);
        id
    }

    /// All components, in insertion order.
    pub fn elements(&self) -> &[Component] {
        &self.elements
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Result<&Component> {
        self.elements
            .get(id.0)
            .ok_or(SchematicError::ComponentNotFound { id: id.0 })
    }

    /// Look up a component mutably.
    pub fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.elements
            .get_mut(id.0)
            .ok_or(SchematicError::ComponentNotFound { id: id.0 })
    }

    /// Connect terminal `ai` of component `a` to terminal `bi` of component
    /// `b`, writing the symmetric back-references on both sides.
    ///
    /// Fails without mutating anything when either index is out of range or
    /// either target point is already connected.
    pub fn connect(
        &mut self,
        a: ComponentId,
        ai: usize,
        b: ComponentId,
        bi: usize,
    ) -> Result<()> {
        // Validate both sides before touching either
        {
            let comp_a = self.component(a)?;
            let point_a = comp_a
                .connection_points()
                .get(ai)
                .ok_or_else(|| SchematicError::connection_index(comp_a.type_name(), ai))?;
            if point_a.connected.is_some() {
                return Err(SchematicError::terminal_occupied(comp_a.type_name(), ai));
            }

            let comp_b = self.component(b)?;
            let point_b = comp_b
                .connection_points()
                .get(bi)
                .ok_or_else(|| SchematicError::connection_index(comp_b.type_name(), bi))?;
            if point_b.connected.is_some() {
                return Err(SchematicError::terminal_occupied(comp_b.type_name(), bi));
            }
        }

        self.elements[a.0].connection_points_mut()[ai].connected = Some(b);
        self.elements[b.0].connection_points_mut()[bi].connected = Some(a);
        Ok(())
    }

    /// Disconnect terminal `ai` of component `a`, clearing both sides of the
    /// back-reference. Disconnecting an unconnected point is a no-op.
    pub fn disconnect(&mut self, a: ComponentId, ai: usize) -> Result<()> {
        let peer = {
            let comp_a = self.component(a)?;
            let point_a = comp_a
                .connection_points()
                .get(ai)
                .ok_or_else(|| SchematicError::connection_index(comp_a.type_name(), ai))?;
            match point_a.connected {
                Some(peer) => peer,
                None => return Ok(()),
            }
        };

        self.elements[a.0].connection_points_mut()[ai].connected = None;
        if let Some(point_b) = self.elements[peer.0]
            .connection_points_mut()
            .iter_mut()
            .find(|p| p.connected == Some(a))
        {
            point_b.connected = None;
        }
        Ok(())
    }

    /// Whether the last [`resolve`](Self::resolve) found a closed loop.
    pub fn is_circuit_closed(&self) -> bool {
        self.closed
    }

    /// The recorded loop from the last resolution, empty when open.
    ///
    /// A closed loop begins at the source's positive terminal and ends with
    /// the closing `(source, 0)` frame.
    pub fn circuit_path(&self) -> &[PathNode] {
        &self.path
    }

    /// Recompute whether a closed current loop exists.
    ///
    /// The previous result is discarded wholesale. Traversal rules:
    /// - seeded at the first power source's positive terminal; no source
    ///   means open, with no search performed
    /// - a visited set blocks revisits, except the source itself: popping a
    ///   `(source, 0)` frame with the source already visited closes the loop
    /// - a disabled gate on the popped frame opens the circuit immediately;
    ///   no alternate path is explored around it
    /// - a non-source component reached through one terminal continues from
    ///   its other terminal; frames that return to the source are pinned to
    ///   terminal 0
    pub fn resolve(&mut self) -> bool {
        self.closed = false;
        self.path.clear();

        let Some(source) = self
            .elements
            .iter()
            .position(|c| c.is_source())
            .map(ComponentId)
        else {
            return false;
        };

        let mut visited: HashSet<ComponentId> = HashSet::new();
        let mut stack = vec![PathNode::new(source, Battery::POSITIVE_TERMINAL)];

        while let Some(frame) = stack.pop() {
            if frame.component == source && visited.contains(&source) {
                self.path.push(frame);
                self.closed = true;
                break;
            }

            let component = &self.elements[frame.component.0];
            if component.is_gate() && !component.is_enabled() {
                break;
            }

            visited.insert(frame.component);
            self.path.push(frame);

            let Some(point) = component.connection_points().get(frame.terminal) else {
                break;
            };
            let Some(peer) = point.connected else {
                break;
            };
            if peer != source && visited.contains(&peer) {
                break;
            }

            let peer_component = &self.elements[peer.0];
            let Some(arrival) = peer_component
                .connection_points()
                .iter()
                .position(|p| p.connected == Some(frame.component))
            else {
                break;
            };

            let next_terminal = if peer == source {
                Battery::POSITIVE_TERMINAL
            } else if arrival == 0 {
                // Current must pass through the component
                1
            } else {
                0
            };
            stack.push(PathNode::new(peer, next_terminal));
        }

        if !self.closed {
            self.path.clear();
        }
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AssetHandle, Led, Switch};

    /// Battery -> switch -> LED -> battery, wired from the positive terminal.
    fn basic_loop(switch_closed: bool) -> (Circuit, ComponentId, ComponentId, ComponentId) {
        let mut circuit = Circuit::new();
        let battery = circuit.add_element(Component::Battery(Battery::new(
            100.0,
            100.0,
            1.5,
            AssetHandle(0),
        )));
        let switch = circuit.add_element(Component::Switch(Switch::new(
            200.0,
            100.0,
            switch_closed,
            AssetHandle(1),
        )));
        let led = circuit.add_element(Component::Led(Led::new(300.0, 100.0, AssetHandle(2))));

        circuit.connect(battery, 0, switch, 0).unwrap();
        circuit.connect(switch, 1, led, 0).unwrap();
        circuit.connect(led, 1, battery, 1).unwrap();
        (circuit, battery, switch, led)
    }

    #[test]
    fn test_closed_loop_detected() {
        let (mut circuit, battery, switch, led) = basic_loop(true);

        assert!(circuit.resolve());
        assert!(circuit.is_circuit_closed());

        let path = circuit.circuit_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], PathNode::new(battery, Battery::POSITIVE_TERMINAL));
        assert_eq!(path[1].component, switch);
        assert_eq!(path[2].component, led);
        assert_eq!(path[3], PathNode::new(battery, 0));
    }

    #[test]
    fn test_open_switch_opens_circuit() {
        let (mut circuit, ..) = basic_loop(false);

        assert!(!circuit.resolve());
        assert!(!circuit.is_circuit_closed());
        assert!(circuit.circuit_path().is_empty());
    }

    #[test]
    fn test_toggling_switch_flips_resolution() {
        let (mut circuit, _, switch, _) = basic_loop(true);
        assert!(circuit.resolve());

        if let Component::Switch(s) = circuit.component_mut(switch).unwrap() {
            s.toggle();
        }
        assert!(!circuit.resolve());
        assert!(circuit.circuit_path().is_empty());

        if let Component::Switch(s) = circuit.component_mut(switch).unwrap() {
            s.toggle();
        }
        assert!(circuit.resolve());
        assert_eq!(circuit.circuit_path().len(), 4);
    }

    #[test]
    fn test_no_power_source_means_open() {
        let mut circuit = Circuit::new();
        let switch =
            circuit.add_element(Component::Switch(Switch::new(0.0, 0.0, true, AssetHandle(0))));
        let led = circuit.add_element(Component::Led(Led::new(50.0, 0.0, AssetHandle(1))));
        circuit.connect(switch, 1, led, 0).unwrap();

        assert!(!circuit.resolve());
        assert!(circuit.circuit_path().is_empty());
    }

    #[test]
    fn test_dangling_wire_means_open() {
        let mut circuit = Circuit::new();
        let battery = circuit.add_element(Component::Battery(Battery::new(
            0.0,
            0.0,
            9.0,
            AssetHandle(0),
        )));
        let led = circuit.add_element(Component::Led(Led::new(50.0, 0.0, AssetHandle(1))));
        // Only one leg wired; no return path
        circuit.connect(battery, 0, led, 0).unwrap();

        assert!(!circuit.resolve());
        assert!(circuit.circuit_path().is_empty());
    }

    #[test]
    fn test_connect_rejects_out_of_range_index() {
        let mut circuit = Circuit::new();
        let battery = circuit.add_element(Component::Battery(Battery::new(
            0.0,
            0.0,
            9.0,
            AssetHandle(0),
        )));
        let led = circuit.add_element(Component::Led(Led::new(50.0, 0.0, AssetHandle(1))));

        let err = circuit.connect(battery, 5, led, 0).unwrap_err();
        match err {
            SchematicError::ConnectionIndexOutOfRange { component, index } => {
                assert_eq!(component, "battery");
                assert_eq!(index, 5);
            }
            other => panic!("unexpected error {other:?}"),
        }

        // No partial mutation
        assert!(circuit.component(led).unwrap().connection_points()[0]
            .connected
            .is_none());
    }

    #[test]
    fn test_connect_rejects_occupied_terminal() {
        let mut circuit = Circuit::new();
        let battery = circuit.add_element(Component::Battery(Battery::new(
            0.0,
            0.0,
            9.0,
            AssetHandle(0),
        )));
        let led = circuit.add_element(Component::Led(Led::new(50.0, 0.0, AssetHandle(1))));
        let switch =
            circuit.add_element(Component::Switch(Switch::new(100.0, 0.0, true, AssetHandle(2))));

        circuit.connect(battery, 0, led, 0).unwrap();
        let err = circuit.connect(switch, 0, led, 0).unwrap_err();
        assert!(matches!(err, SchematicError::TerminalOccupied { .. }));

        // The failed call must not have touched the switch side
        assert!(circuit.component(switch).unwrap().connection_points()[0]
            .connected
            .is_none());
    }

    #[test]
    fn test_disconnect_restores_both_sides() {
        let mut circuit = Circuit::new();
        let battery = circuit.add_element(Component::Battery(Battery::new(
            0.0,
            0.0,
            9.0,
            AssetHandle(0),
        )));
        let led = circuit.add_element(Component::Led(Led::new(50.0, 0.0, AssetHandle(1))));

        circuit.connect(battery, 0, led, 0).unwrap();
        circuit.disconnect(battery, 0).unwrap();

        assert!(circuit.component(battery).unwrap().connection_points()[0]
            .connected
            .is_none());
        assert!(circuit.component(led).unwrap().connection_points()[0]
            .connected
            .is_none());

        // Idempotent on an already-disconnected point
        circuit.disconnect(battery, 0).unwrap();
    }

    #[test]
    fn test_resolution_discards_stale_path() {
        let (mut circuit, _, switch, _) = basic_loop(true);
        assert!(circuit.resolve());
        assert_eq!(circuit.circuit_path().len(), 4);

        if let Component::Switch(s) = circuit.component_mut(switch).unwrap() {
            s.set_closed(false);
        }
        assert!(!circuit.resolve());
        // Stale results are discarded, never merged
        assert!(circuit.circuit_path().is_empty());
    }
}
