//! Schematic - routing and topology demo CLI
//!
//! Builds the canonical battery / switch / LED circuit, routes its wires on
//! the shared grid, and reports the segment geometry and loop resolution.
//!
//! # Usage
//!
//! ```bash
//! schematic --obstacle 10,10 --obstacle 11,10
//! schematic --switch-open
//! ```

use clap::Parser;
use schematic_core::circuit::Circuit;
use schematic_core::components::{AssetHandle, Battery, Component, Led, Switch};
use schematic_core::error::{Result, SchematicError};
use schematic_core::geometry::{Direction, GridPosition, PixelPoint};
use schematic_core::routing::{ConnectionKind, Port, PortId, PortRegistry};
use schematic_core::simulation;

/// Interactive schematic routing demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start with the switch open instead of closed
    #[arg(long)]
    switch_open: bool,

    /// Block a grid cell, as "x,y" (repeatable)
    #[arg(long, value_parser = parse_cell)]
    obstacle: Vec<GridPosition>,

    /// Route the battery-to-switch wire through this pixel waypoint, as "x,y"
    #[arg(long, value_parser = parse_point)]
    waypoint: Vec<PixelPoint>,
}

fn parse_cell(raw: &str) -> std::result::Result<GridPosition, String> {
    let (x, y) = split_pair(raw)?;
    Ok(GridPosition::new(
        x.parse().map_err(|_| format!("invalid x '{x}'"))?,
        y.parse().map_err(|_| format!("invalid y '{y}'"))?,
    ))
}

fn parse_point(raw: &str) -> std::result::Result<PixelPoint, String> {
    let (x, y) = split_pair(raw)?;
    Ok(PixelPoint::new(
        x.parse().map_err(|_| format!("invalid x '{x}'"))?,
        y.parse().map_err(|_| format!("invalid y '{y}'"))?,
    ))
}

fn split_pair(raw: &str) -> std::result::Result<(&str, &str), String> {
    raw.split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{raw}'"))
}

/// Build a router port sitting on a component terminal.
fn terminal_port(
    circuit: &Circuit,
    id: schematic_core::circuit::ComponentId,
    terminal: usize,
    kind: ConnectionKind,
) -> Result<Port> {
    let component = circuit.component(id)?;
    let point = component
        .connection_points()
        .get(terminal)
        .ok_or_else(|| SchematicError::connection_index(component.type_name(), terminal))?;
    Ok(Port {
        id: PortId::for_terminal(component.type_name(), terminal),
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

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Build the demo circuit
    let mut circuit = Circuit::new();
    let battery = circuit.add_element(Component::Battery(Battery::new(
        100.0,
        200.0,
        1.5,
        AssetHandle(0),
    )));
    let switch = circuit.add_element(Component::Switch(Switch::new(
        400.0,
        200.0,
        !args.switch_open,
        AssetHandle(1),
    )));
    let led = circuit.add_element(Component::Led(Led::new(700.0, 200.0, AssetHandle(2))));

    circuit.connect(battery, 0, switch, 0)?;
    circuit.connect(switch, 1, led, 0)?;
    circuit.connect(led, 1, battery, 1)?;

    // Route the wires
    let mut registry = PortRegistry::new();
    for cell in &args.obstacle {
        registry.builder_mut().add_obstacle(*cell);
    }

    registry.create_wire(
        terminal_port(&circuit, battery, 0, ConnectionKind::Output)?,
        terminal_port(&circuit, switch, 0, ConnectionKind::Input)?,
        args.waypoint.clone(),
    );
    registry.create_wire(
        terminal_port(&circuit, switch, 1, ConnectionKind::Output)?,
        terminal_port(&circuit, led, 0, ConnectionKind::Input)?,
        Vec::new(),
    );
    registry.create_wire(
        terminal_port(&circuit, led, 1, ConnectionKind::Output)?,
        terminal_port(&circuit, battery, 1, ConnectionKind::Input)?,
        Vec::new(),
    );

    for wire in registry.wires() {
        println!("wire {} ({} -> {}):", wire.id, wire.start_port, wire.end_port);
        for segment in &wire.segments {
            println!(
                "  {:?} {} -> {}",
                segment.orientation, segment.start.position, segment.end.position
            );
        }
    }

    // Resolve the loop
    let closed = circuit.resolve();
    println!("circuit closed: {closed}");
    if closed {
        let frames: Vec<String> = circuit
            .circuit_path()
            .iter()
            .map(|frame| {
                let name = circuit
                    .component(frame.component)
                    .map(|c| c.type_name())
                    .unwrap_or("?");
                format!("{name}:{}", frame.terminal)
            })
            .collect();
        println!("loop: {}", frames.join(" -> "));

        let points = simulation::complete_loop_points(&circuit, &registry);
        println!("animation polyline: {} points", points.len());
    }

    Ok(())
}
