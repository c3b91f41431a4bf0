//! Loop geometry for the animation driver.
//!
//! An external ticker moves charge markers along the closed loop. This
//! module does the geometric half of that job: stitch the per-wire
//! polylines together in traversal order, reversing wires stored opposite
//! to the direction of travel and dropping duplicate points at shared
//! boundaries. The ticker itself lives outside the core.

use crate::circuit::Circuit;
use crate::geometry::PixelPoint;
use crate::routing::{PortRegistry, Wire};

/// Build the complete pixel polyline of the resolved current loop.
///
/// For every consecutive pair of path frames the connecting wire is looked
/// up in the registry; wires whose stored start component is not the frame
/// being left are walked end-to-start. Returns an empty list when the
/// circuit is open or no wires match.
pub fn complete_loop_points(circuit: &Circuit, registry: &PortRegistry) -> Vec<PixelPoint> {
    let path = circuit.circuit_path();
    let mut points: Vec<PixelPoint> = Vec::new();

    for pair in path.windows(2) {
        let current = pair[0].component;
        let next = pair[1].component;

        let Some(wire) = find_connecting_wire(registry, current, next) else {
            continue;
        };

        let mut polyline = wire.polyline();
        if wire.start_component != current {
            polyline.reverse();
        }

        for point in polyline {
            if points.last() != Some(&point) {
                points.push(point);
            }
        }
    }

    points
}

fn find_connecting_wire(
    registry: &PortRegistry,
    a: crate::circuit::ComponentId,
    b: crate::circuit::ComponentId,
) -> Option<&Wire> {
    registry.wires().find(|wire| {
        (wire.start_component == a && wire.end_component == b)
            || (wire.start_component == b && wire.end_component == a)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ComponentId;
    use crate::components::{AssetHandle, Battery, Component, Led, Switch};
    use crate::geometry::Direction;
    use crate::routing::{ConnectionKind, Port, PortId};

    fn port(id: &str, x: f64, y: f64, kind: ConnectionKind, component: ComponentId) -> Port {
        Port {
            id: PortId(id.to_string()),
            position: PixelPoint::new(x, y),
            direction: Direction::East,
            kind,
            component,
        }
    }

    fn wired_loop() -> (Circuit, PortRegistry) {
        let mut circuit = Circuit::new();
        let battery = circuit.add_element(Component::Battery(Battery::new(
            100.0,
            100.0,
            1.5,
            AssetHandle(0),
        )));
        let switch = circuit.add_element(Component::Switch(Switch::new(
            300.0,
            100.0,
            true,
            AssetHandle(1),
        )));
        let led = circuit.add_element(Component::Led(Led::new(500.0, 100.0, AssetHandle(2))));

        circuit.connect(battery, 0, switch, 0).unwrap();
        circuit.connect(switch, 1, led, 0).unwrap();
        circuit.connect(led, 1, battery, 1).unwrap();

        let mut registry = PortRegistry::new();
        registry.create_wire(
            port("battery-0", 100.0, 80.0, ConnectionKind::Output, battery),
            port("switch-0", 300.0, 90.0, ConnectionKind::Input, switch),
            Vec::new(),
        );
        registry.create_wire(
            port("switch-1", 300.0, 110.0, ConnectionKind::Output, switch),
            port("led-0", 500.0, 95.0, ConnectionKind::Input, led),
            Vec::new(),
        );
        // Stored opposite to traversal order on purpose
        registry.create_wire(
            port("battery-1", 100.0, 120.0, ConnectionKind::Input, battery),
            port("led-1", 500.0, 105.0, ConnectionKind::Output, led),
            Vec::new(),
        );

        (circuit, registry)
    }

    #[test]
    fn test_complete_loop_points() {
        let (mut circuit, registry) = wired_loop();
        assert!(circuit.resolve());

        let points = complete_loop_points(&circuit, &registry);
        assert!(points.len() >= 4);

        // No duplicate points at wire boundaries
        for pair in points.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_reversed_wire_is_walked_backwards() {
        let (mut circuit, registry) = wired_loop();
        assert!(circuit.resolve());

        let points = complete_loop_points(&circuit, &registry);

        // The loop's final stretch is the led->battery wire, which is stored
        // battery->led; its first visited point must therefore be the led end.
        let led_wire = registry
            .wires()
            .find(|w| w.start_port == PortId("battery-1".to_string()))
            .unwrap();
        let led_end = led_wire.polyline().last().copied().unwrap();
        let tail = &points[points.len() - led_wire.polyline().len()..];
        assert_eq!(tail.first(), Some(&led_end));
    }

    #[test]
    fn test_open_circuit_yields_no_points() {
        let (mut circuit, registry) = wired_loop();
        // Not resolved yet: path is empty
        assert!(complete_loop_points(&circuit, &registry).is_empty());

        // Open the loop and resolve
        let switch = ComponentId(1);
        if let Component::Switch(s) = circuit.component_mut(switch).unwrap() {
            s.set_closed(false);
        }
        assert!(!circuit.resolve());
        assert!(complete_loop_points(&circuit, &registry).is_empty());
    }
}
