//! Entity and complex type descriptors.

use crate::types::{QueryType, TypeError, TypeResult};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Named, typed member of a structural type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Property {
    name: String,
    #[serde(rename = "type")]
    ty: QueryType,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: QueryType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &QueryType {
        &self.ty
    }
}

/// Entity type with single inheritance.
///
/// Descriptors reference their base type and property types by value, so a
/// type graph is always acyclic: every referenced type exists before the
/// type that mentions it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityType {
    name: String,
    base: Option<Arc<EntityType>>,
    properties: Vec<Property>,
}

impl EntityType {
    /// Create an entity type. Property names must be unique across the
    /// declared properties and every inherited one.
    pub fn new(
        name: impl Into<String>,
        base: Option<Arc<EntityType>>,
        properties: Vec<Property>,
    ) -> TypeResult<Self> {
        let name = name.into();

        let mut seen: HashSet<&str> = HashSet::new();
        for property in &properties {
            let inherited = base
                .as_ref()
                .is_some_and(|b| b.property(property.name()).is_some());
            if inherited || !seen.insert(property.name()) {
                return Err(TypeError::DuplicateProperty {
                    type_name: name,
                    property: property.name().to_string(),
                });
            }
        }

        Ok(Self {
            name,
            base,
            properties,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&Arc<EntityType>> {
        self.base.as_ref()
    }

    pub fn declared_properties(&self) -> &[Property] {
        &self.properties
    }

    /// Find a property on this type or any ancestor
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name() == name)
            .or_else(|| self.base.as_ref().and_then(|b| b.property(name)))
    }

    /// All properties, inherited ones first
    pub fn all_properties(&self) -> Vec<&Property> {
        let mut properties = self
            .base
            .as_ref()
            .map(|b| b.all_properties())
            .unwrap_or_default();
        properties.extend(self.properties.iter());
        properties
    }

    /// Ancestor-or-self check
    pub fn derives_from(&self, ancestor: &EntityType) -> bool {
        let mut current = Some(self);
        while let Some(entity) = current {
            if entity == ancestor {
                return true;
            }
            current = entity.base.as_deref();
        }
        false
    }
}

/// Complex type: a structural value without identity or inheritance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexType {
    name: String,
    properties: Vec<Property>,
}

impl ComplexType {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> TypeResult<Self> {
        let name = name.into();

        let mut seen: HashSet<&str> = HashSet::new();
        for property in &properties {
            if !seen.insert(property.name()) {
                return Err(TypeError::DuplicateProperty {
                    type_name: name,
                    property: property.name().to_string(),
                });
            }
        }

        Ok(Self { name, properties })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }
}
