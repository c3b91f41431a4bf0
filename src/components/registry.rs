//! Component type registry: metadata and factories for placing components.
//!
//! The registry is an explicit instance constructed once by the host and
//! passed wherever lookups occur; there is no process-wide singleton.

use indexmap::IndexMap;

use super::Component;
use crate::error::{Result, SchematicError};

/// Placement metadata for one connection point, relative to the component
/// center.
#[derive(Debug, Clone)]
pub struct ConnectionPointMetadata {
    pub relative_x: f64,
    pub relative_y: f64,
    pub label: Option<String>,
}

/// Metadata describing a registered component type.
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    /// Unique identifier for the component type
    pub type_name: String,
    pub display_name: String,
    /// Default footprint of the component, in pixels
    pub width: f64,
    pub height: f64,
    pub connection_points: Vec<ConnectionPointMetadata>,
}

/// Factory producing a component at a canvas position.
pub type ComponentFactory = Box<dyn Fn(f64, f64) -> Component>;

/// Registry of component types available to the editor palette.
#[derive(Default)]
pub struct ComponentRegistry {
    metadata: IndexMap<String, ComponentMetadata>,
    factories: IndexMap<String, ComponentFactory>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.metadata.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type with its metadata and factory.
    ///
    /// Registering the same type name twice is an error.
    pub fn register_component(
        &mut self,
        metadata: ComponentMetadata,
        factory: ComponentFactory,
    ) -> Result<()> {
        if self.metadata.contains_key(&metadata.type_name) {
            return Err(SchematicError::DuplicateComponentType {
                type_name: metadata.type_name.clone(),
            });
        }
        self.factories.insert(metadata.type_name.clone(), factory);
        self.metadata.insert(metadata.type_name.clone(), metadata);
        Ok(())
    }

    /// Instantiate a component of a registered type at `(x, y)`.
    pub fn create_component(&self, type_name: &str, x: f64, y: f64) -> Result<Component> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| SchematicError::unknown_type(type_name))?;
        Ok(factory(x, y))
    }

    /// Metadata for a registered type.
    pub fn metadata(&self, type_name: &str) -> Result<&ComponentMetadata> {
        self.metadata
            .get(type_name)
            .ok_or_else(|| SchematicError::unknown_type(type_name))
    }

    /// All registered type names, in registration order.
    pub fn registered_types(&self) -> Vec<&str> {
        self.metadata.keys().map(|s| s.as_str()).collect()
    }
}
