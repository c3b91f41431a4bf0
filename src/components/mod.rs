//! Component models for the schematic editor.
//!
//! This module provides the circuit elements the editor places on the
//! canvas:
//! - Sources: Battery
//! - Gates: Switch
//! - Loads: LED
//!
//! Each component exposes its connection points (pixel position, optional
//! label, symmetric back-reference to the connected peer) and answers the
//! capability queries the topology resolver asks (`is_source`, `is_gate`,
//! `is_enabled`), so no code ever branches on concrete type names.

mod battery;
mod led;
mod registry;
mod switch;

pub use battery::Battery;
pub use led::Led;
pub use registry::{
    ComponentFactory, ComponentMetadata, ComponentRegistry, ConnectionPointMetadata,
};
pub use switch::Switch;

use crate::circuit::ComponentId;
use crate::geometry::PixelPoint;

/// Opaque handle to a sprite/texture owned by the rendering layer.
///
/// Constructors take the handle as a plain value; the core never resolves
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AssetHandle(pub u32);

/// A terminal on a component body.
///
/// `connected` is a symmetric back-reference: if A's point references B,
/// some point on B references A. The invariant is maintained solely by
/// [`Circuit::connect`](crate::circuit::Circuit::connect) and
/// [`Circuit::disconnect`](crate::circuit::Circuit::disconnect).
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPoint {
    pub position: PixelPoint,
    pub label: Option<String>,
    pub connected: Option<ComponentId>,
}

impl ConnectionPoint {
    /// An unconnected point.
    pub fn new(position: PixelPoint) -> Self {
        Self {
            position,
            label: None,
            connected: None,
        }
    }

    /// An unconnected, labeled point.
    pub fn labeled(position: PixelPoint, label: impl Into<String>) -> Self {
        Self {
            position,
            label: Some(label.into()),
            connected: None,
        }
    }
}

/// A circuit component.
#[derive(Debug, Clone)]
pub enum Component {
    Battery(Battery),
    Switch(Switch),
    Led(Led),
}

impl Component {
    /// Canvas position of the component center.
    pub fn position(&self) -> PixelPoint {
        match self {
            Component::Battery(b) => b.position,
            Component::Switch(s) => s.position,
            Component::Led(l) => l.position,
        }
    }

    /// Short type name, used in error messages and port ids.
    pub fn type_name(&self) -> &'static str {
        match self {
            Component::Battery(_) => "battery",
            Component::Switch(_) => "switch",
            Component::Led(_) => "led",
        }
    }

    /// The component's connection points.
    pub fn connection_points(&self) -> &[ConnectionPoint] {
        match self {
            Component::Battery(b) => &b.connection_points,
            Component::Switch(s) => &s.connection_points,
            Component::Led(l) => &l.connection_points,
        }
    }

    /// Mutable access to the connection points.
    pub fn connection_points_mut(&mut self) -> &mut [ConnectionPoint] {
        match self {
            Component::Battery(b) => &mut b.connection_points,
            Component::Switch(s) => &mut s.connection_points,
            Component::Led(l) => &mut l.connection_points,
        }
    }

    /// Whether this component drives current around the loop.
    pub fn is_source(&self) -> bool {
        matches!(self, Component::Battery(_))
    }

    /// Whether this component can interrupt the loop.
    pub fn is_gate(&self) -> bool {
        matches!(self, Component::Switch(_))
    }

    /// Gate state: `false` only for a gate that currently blocks current.
    /// Non-gate components are always enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            Component::Switch(s) => s.closed,
            _ => true,
        }
    }
}
