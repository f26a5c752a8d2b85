//! Shared pool of named query types.
//!
//! Trees built concurrently by different callers resolve type names through
//! one registry. Definitions go through `DashMap`'s entry API so two threads
//! racing to define the same name cannot both succeed, and `freeze` turns the
//! registry read-only once a schema is fully loaded.

use crate::types::{
    parse_type_name, ComplexType, EntityType, Property, QueryType, ScalarType, TypeError,
    TypeResult,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct TypeRegistry {
    types: DashMap<String, QueryType>,
    frozen: AtomicBool,
}

impl TypeRegistry {
    /// Create a registry pre-populated with every scalar type
    pub fn new() -> Self {
        let types = DashMap::new();
        for scalar in ScalarType::ALL {
            types.insert(scalar.as_str().to_string(), QueryType::Scalar(scalar));
        }
        Self {
            types,
            frozen: AtomicBool::new(false),
        }
    }

    /// Define an entity type, optionally deriving from a registered entity
    pub fn define_entity(
        &self,
        name: &str,
        base: Option<&str>,
        properties: Vec<Property>,
    ) -> TypeResult<QueryType> {
        self.check_definable(name)?;

        let base = match base {
            Some(base_name) => match self.get(base_name)? {
                QueryType::Entity(entity) => Some(entity),
                _ => {
                    return Err(TypeError::NotAnEntity {
                        name: base_name.to_string(),
                    })
                }
            },
            None => None,
        };

        let ty = QueryType::entity(EntityType::new(name, base, properties)?);
        self.insert(name, ty)
    }

    /// Define a complex type
    pub fn define_complex(&self, name: &str, properties: Vec<Property>) -> TypeResult<QueryType> {
        self.check_definable(name)?;
        let ty = QueryType::complex(ComplexType::new(name, properties)?);
        self.insert(name, ty)
    }

    /// Look up a named type
    pub fn get(&self, name: &str) -> TypeResult<QueryType> {
        self.types
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TypeError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Resolve a textual type representation such as `Collection(Customer)`
    pub fn resolve(&self, text: &str) -> TypeResult<QueryType> {
        trace!("Resolving type name '{}'", text);
        parse_type_name(text, &|name: &str| self.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Reject further definitions
    pub fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            debug!("Type registry frozen with {} types", self.types.len());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Named, non-scalar types in sorted order
    pub fn user_types(&self) -> Vec<QueryType> {
        let mut types: Vec<QueryType> = self
            .types
            .iter()
            .filter(|e| !e.value().is_scalar())
            .map(|e| e.value().clone())
            .collect();
        types.sort_by(|a, b| a.name().cmp(b.name()));
        types
    }

    fn check_definable(&self, name: &str) -> TypeResult<()> {
        if self.is_frozen() {
            return Err(TypeError::Frozen {
                name: name.to_string(),
            });
        }
        if name.is_empty() || ScalarType::from_name(name).is_some() {
            return Err(TypeError::InvalidTypeName {
                text: name.to_string(),
                reason: "reserved or empty name".to_string(),
            });
        }
        Ok(())
    }

    // The base and property types are resolved before the entry is taken:
    // holding a shard lock while reading another key could deadlock.
    fn insert(&self, name: &str, ty: QueryType) -> TypeResult<QueryType> {
        match self.types.entry(name.to_string()) {
            Entry::Occupied(_) => Err(TypeError::DuplicateType {
                name: name.to_string(),
            }),
            Entry::Vacant(vacant) => {
                debug!("Defined type {}", name);
                vacant.insert(ty.clone());
                Ok(ty)
            }
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
