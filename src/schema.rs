//! JSON schema documents describing named query types.
//!
//! ```json
//! {
//!   "complex_types": [{ "name": "Address", "properties": [{ "name": "City", "type": "String" }] }],
//!   "entity_types": [{ "name": "Customer", "base": "Person", "properties": [] }]
//! }
//! ```
//!
//! Complex types are loaded first, then entity types in document order, so a
//! type may only mention types defined before it.

use crate::types::{Property, TypeRegistry};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub complex_types: Vec<ComplexTypeDef>,
    #[serde(default)]
    pub entity_types: Vec<EntityTypeDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexTypeDef {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    /// Textual type representation, e.g. `Collection(Order)`
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Schema used when no schema file is supplied
pub const DEMO_SCHEMA: &str = r#"{
  "complex_types": [
    { "name": "Address", "properties": [
      { "name": "City", "type": "String" },
      { "name": "Zip", "type": "String" }
    ] }
  ],
  "entity_types": [
    { "name": "Person", "properties": [
      { "name": "Name", "type": "String" },
      { "name": "Age", "type": "Int32" }
    ] },
    { "name": "Customer", "base": "Person", "properties": [
      { "name": "CustomerId", "type": "Int32" },
      { "name": "Address", "type": "Address" }
    ] },
    { "name": "Employee", "base": "Person", "properties": [
      { "name": "Salary", "type": "Decimal" }
    ] },
    { "name": "Order", "properties": [
      { "name": "OrderId", "type": "Int32" },
      { "name": "Total", "type": "Decimal" },
      { "name": "Customer", "type": "Ref(Customer)" }
    ] },
    { "name": "UnrelatedWidgetType", "properties": [
      { "name": "Id", "type": "Guid" }
    ] }
  ]
}"#;

impl SchemaDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse schema document")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_SCHEMA)
    }

    /// Define every type of this document in `registry`
    pub fn apply(&self, registry: &TypeRegistry) -> Result<()> {
        for complex in &self.complex_types {
            let properties = resolve_properties(registry, &complex.properties)
                .with_context(|| format!("In complex type {}", complex.name))?;
            registry
                .define_complex(&complex.name, properties)
                .with_context(|| format!("Failed to define complex type {}", complex.name))?;
        }

        for entity in &self.entity_types {
            let properties = resolve_properties(registry, &entity.properties)
                .with_context(|| format!("In entity type {}", entity.name))?;
            registry
                .define_entity(&entity.name, entity.base.as_deref(), properties)
                .with_context(|| format!("Failed to define entity type {}", entity.name))?;
        }

        info!(
            "Loaded schema: {} complex types, {} entity types",
            self.complex_types.len(),
            self.entity_types.len()
        );
        Ok(())
    }

    /// Build a frozen registry holding this document's types
    pub fn into_registry(self) -> Result<TypeRegistry> {
        let registry = TypeRegistry::new();
        self.apply(&registry)?;
        registry.freeze();
        Ok(registry)
    }
}

fn resolve_properties(registry: &TypeRegistry, defs: &[PropertyDef]) -> Result<Vec<Property>> {
    defs.iter()
        .map(|def| -> Result<Property> {
            debug!("Resolving property {}: {}", def.name, def.type_name);
            let ty = registry
                .resolve(&def.type_name)
                .with_context(|| format!("Property {}", def.name))?;
            Ok(Property::new(def.name.clone(), ty))
        })
        .collect()
}
