//! Error types for the schematic editor core.
//!
//! This module provides a unified error type [`SchematicError`] that covers
//! all error conditions that can occur during circuit mutation, component
//! registration, and wire construction.
//!
//! Recoverable outcomes are deliberately *not* errors: pathfinding failure
//! returns `None`, port validation returns a
//! [`ValidationResult`](crate::routing::ValidationResult), and completing a
//! wire with no active creation session logs a warning and returns `None`.

use thiserror::Error;

/// Result type alias using [`SchematicError`].
pub type Result<T> = std::result::Result<T, SchematicError>;

/// Unified error type for all schematic operations.
#[derive(Error, Debug)]
pub enum SchematicError {
    // ============ Connection Errors ============
    /// Connection point index does not exist on the component
    #[error("Connection index {index} is out of range for component '{component}'")]
    ConnectionIndexOutOfRange { component: String, index: usize },

    /// Target connection point is already wired to another component
    #[error("Connection point {index} on component '{component}' is already in use")]
    TerminalOccupied { component: String, index: usize },

    /// Component id does not exist in the circuit arena
    #[error("Component id {id} not found in circuit")]
    ComponentNotFound { id: usize },

    // ============ Registry Errors ============
    /// Component type registered twice
    #[error("Component type '{type_name}' is already registered")]
    DuplicateComponentType { type_name: String },

    /// No factory registered for a component type
    #[error("No factory registered for component type '{type_name}'")]
    UnknownComponentType { type_name: String },

    // ============ Wire Errors ============
    /// Wire id does not exist in the registry
    #[error("Wire id {id} not found")]
    WireNotFound { id: u64 },

    /// Port id does not exist in the registry
    #[error("Port '{id}' not found")]
    PortNotFound { id: String },
}

impl SchematicError {
    /// Create an out-of-range connection index error.
    pub fn connection_index(component: impl Into<String>, index: usize) -> Self {
        Self::ConnectionIndexOutOfRange {
            component: component.into(),
            index,
        }
    }

    /// Create an occupied-terminal error.
    pub fn terminal_occupied(component: impl Into<String>, index: usize) -> Self {
        Self::TerminalOccupied {
            component: component.into(),
            index,
        }
    }

    /// Create an unknown component type error.
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownComponentType {
            type_name: type_name.into(),
        }
    }
}
