//! WASM bindings for Schematic Core.
//!
//! This module provides JavaScript-friendly bindings for driving the editor
//! core from a browser canvas host: placing components, wiring terminals,
//! and reading back segment geometry and loop state.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSchematicEditor } from 'schematic_core';
//!
//! await init();
//!
//! const editor = new WasmSchematicEditor();
//! const battery = editor.add_battery(100, 200, 1.5);
//! const sw = editor.add_switch(400, 200, true);
//! const led = editor.add_led(700, 200);
//!
//! editor.connect(battery, 0, sw, 0);
//! editor.connect(sw, 1, led, 0);
//! editor.connect(led, 1, battery, 1);
//!
//! const segments = editor.route_wire(battery, 0, sw, 0);
//! const closed = editor.resolve();
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Circuit, ComponentId};
use crate::components::{AssetHandle, Battery, Component, Led, Switch};
use crate::geometry::{Direction, GridPosition};
use crate::routing::{ConnectionKind, Port, PortId, PortRegistry};
use crate::simulation;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible schematic editor core.
///
/// Wraps the native [`Circuit`] and [`PortRegistry`] behind a flat,
/// JavaScript-friendly API. Component and wire handles are plain integers;
/// geometry crosses the boundary as flat coordinate arrays.
#[wasm_bindgen]
pub struct WasmSchematicEditor {
    circuit: Circuit,
    registry: PortRegistry,
}

impl Default for WasmSchematicEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmSchematicEditor {
    /// Create an empty editor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSchematicEditor {
        WasmSchematicEditor {
            circuit: Circuit::new(),
            registry: PortRegistry::new(),
        }
    }

    /// Place a battery; returns its component handle.
    pub fn add_battery(&mut self, x: f64, y: f64, voltage: f64) -> usize {
        self.circuit
            .add_element(Component::Battery(Battery::new(
                x,
                y,
                voltage,
                AssetHandle(0),
            )))
            .0
    }

    /// Place a switch; returns its component handle.
    pub fn add_switch(&mut self, x: f64, y: f64, closed: bool) -> usize {
        self.circuit
            .add_element(Component::Switch(Switch::new(x, y, closed, AssetHandle(0))))
            .0
    }

    /// Place an LED; returns its component handle.
    pub fn add_led(&mut self, x: f64, y: f64) -> usize {
        self.circuit
            .add_element(Component::Led(Led::new(x, y, AssetHandle(0))))
            .0
    }

    /// Connect two component terminals.
    pub fn connect(
        &mut self,
        a: usize,
        ai: usize,
        b: usize,
        bi: usize,
    ) -> Result<(), JsValue> {
        self.circuit
            .connect(ComponentId(a), ai, ComponentId(b), bi)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Disconnect a component terminal (both sides).
    pub fn disconnect(&mut self, a: usize, ai: usize) -> Result<(), JsValue> {
        self.circuit
            .disconnect(ComponentId(a), ai)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Toggle a switch. Ignored for non-switch components.
    pub fn toggle_switch(&mut self, id: usize) {
        if let Ok(Component::Switch(s)) = self.circuit.component_mut(ComponentId(id)) {
            s.toggle();
        }
    }

    /// Block a grid cell for routing.
    pub fn add_obstacle(&mut self, x: i32, y: i32) {
        self.registry
            .builder_mut()
            .add_obstacle(GridPosition::new(x, y));
    }

    /// Register a clearance zone around a grid cell.
    pub fn add_component_clearance(&mut self, x: i32, y: i32, radius: i32) {
        self.registry
            .builder_mut()
            .add_component_clearance(GridPosition::new(x, y), radius);
    }

    /// Route a wire between two component terminals.
    ///
    /// Returns the segment geometry flattened as
    /// `[x0, y0, x1, y1, ...]` pairs per segment endpoint.
    pub fn route_wire(
        &mut self,
        a: usize,
        ai: usize,
        b: usize,
        bi: usize,
    ) -> Result<Vec<f64>, JsValue> {
        let start = self.terminal_port(ComponentId(a), ai, ConnectionKind::Output)?;
        let end = self.terminal_port(ComponentId(b), bi, ConnectionKind::Input)?;

        let id = self.registry.create_wire(start, end, Vec::new());
        let wire = self
            .registry
            .wire(id)
            .ok_or_else(|| JsValue::from_str("wire not found after creation"))?;

        let mut flat = Vec::with_capacity(wire.segments.len() * 4);
        for segment in &wire.segments {
            flat.push(segment.start.position.x);
            flat.push(segment.start.position.y);
            flat.push(segment.end.position.x);
            flat.push(segment.end.position.y);
        }
        Ok(flat)
    }

    /// Recompute loop resolution; returns whether the circuit is closed.
    pub fn resolve(&mut self) -> bool {
        self.circuit.resolve()
    }

    /// Whether the last resolution found a closed loop.
    pub fn is_circuit_closed(&self) -> bool {
        self.circuit.is_circuit_closed()
    }

    /// The resolved loop as flat `[component, terminal, ...]` pairs.
    pub fn circuit_path(&self) -> Vec<usize> {
        let mut flat = Vec::new();
        for frame in self.circuit.circuit_path() {
            flat.push(frame.component.0);
            flat.push(frame.terminal);
        }
        flat
    }

    /// The animation polyline of the resolved loop as flat `[x, y, ...]`
    /// coordinates.
    pub fn loop_points(&self) -> Vec<f64> {
        let mut flat = Vec::new();
        for point in simulation::complete_loop_points(&self.circuit, &self.registry) {
            flat.push(point.x);
            flat.push(point.y);
        }
        flat
    }

    fn terminal_port(
        &self,
        id: ComponentId,
        terminal: usize,
        kind: ConnectionKind,
    ) -> Result<Port, JsValue> {
        let component = self
            .circuit
            .component(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let point = component
            .connection_points()
            .get(terminal)
            .ok_or_else(|| JsValue::from_str("terminal index out of range"))?;
        Ok(Port {
            id: PortId(format!("{}-{}-{}", component.type_name(), id.0, terminal)),
            position: point.position,
            direction: if kind == ConnectionKind::Output {
                Direction::East
            } else {
                Direction::West
            },
            kind,
            component: id,
        })
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the routing grid cell size in pixels.
#[wasm_bindgen]
pub fn grid_size() -> f64 {
    crate::GRID_SIZE
}
