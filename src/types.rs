//! Type model for query expressions.
//!
//! This module provides:
//!
//! - **QueryType**: the static type attached to every expression node
//! - **ScalarType**: primitive types with implicit numeric widening
//! - **EntityType / ComplexType**: nominal structural types with properties
//! - **TypeRegistry**: a concurrent, freezable pool of named types
//!
//! Types are immutable and shared through `Arc`, so cloning a `QueryType` is
//! cheap and two handles describing the same type compare equal whether or not
//! they point at the same allocation.

pub mod error;
pub mod parse;
pub mod registry;
pub mod scalar;
pub mod structural;

pub use error::{TypeError, TypeResult};
pub use parse::parse_type_name;
pub use registry::TypeRegistry;
pub use scalar::ScalarType;
pub use structural::{ComplexType, EntityType, Property};

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Static type of a query expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// Primitive value type
    Scalar(ScalarType),

    /// Entity type, possibly deriving from a base entity type
    Entity(Arc<EntityType>),

    /// Complex (value-like structural) type
    Complex(Arc<ComplexType>),

    /// Homogeneous collection of an element type
    Collection(Arc<QueryType>),

    /// Reference to an entity
    Reference(Arc<EntityType>),
}

impl QueryType {
    pub const BOOLEAN: QueryType = QueryType::Scalar(ScalarType::Boolean);
    pub const INT32: QueryType = QueryType::Scalar(ScalarType::Int32);
    pub const INT64: QueryType = QueryType::Scalar(ScalarType::Int64);
    pub const DOUBLE: QueryType = QueryType::Scalar(ScalarType::Double);
    pub const DECIMAL: QueryType = QueryType::Scalar(ScalarType::Decimal);
    pub const STRING: QueryType = QueryType::Scalar(ScalarType::String);

    /// Wrap an entity type
    pub fn entity(entity: EntityType) -> Self {
        QueryType::Entity(Arc::new(entity))
    }

    /// Wrap a complex type
    pub fn complex(complex: ComplexType) -> Self {
        QueryType::Complex(Arc::new(complex))
    }

    /// Create a collection type with the given element type
    pub fn collection_of(element: QueryType) -> Self {
        QueryType::Collection(Arc::new(element))
    }

    /// Create a reference type to the given entity type.
    ///
    /// Returns `None` when `target` is not an entity type.
    pub fn reference_to(target: &QueryType) -> Option<Self> {
        match target {
            QueryType::Entity(entity) => Some(QueryType::Reference(entity.clone())),
            _ => None,
        }
    }

    /// Name of the type without type constructors applied
    pub fn name(&self) -> &str {
        match self {
            QueryType::Scalar(scalar) => scalar.as_str(),
            QueryType::Entity(entity) | QueryType::Reference(entity) => entity.name(),
            QueryType::Complex(complex) => complex.name(),
            QueryType::Collection(_) => "Collection",
        }
    }

    /// Textual representation used in diagnostics and tree rendering
    pub fn string_representation(&self) -> String {
        self.to_string()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, QueryType::Scalar(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, QueryType::Scalar(scalar) if scalar.is_numeric())
    }

    /// Entity, complex and reference types expose properties
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            QueryType::Entity(_) | QueryType::Complex(_) | QueryType::Reference(_)
        )
    }

    /// Element type if this is a collection
    pub fn element_type(&self) -> Option<&QueryType> {
        match self {
            QueryType::Collection(element) => Some(element),
            _ => None,
        }
    }

    /// Look up a property declared on this type or one of its base types
    pub fn property(&self, name: &str) -> Option<&Property> {
        match self {
            QueryType::Entity(entity) | QueryType::Reference(entity) => entity.property(name),
            QueryType::Complex(complex) => complex.property(name),
            _ => None,
        }
    }

    /// Whether a value of type `other` may be used where `self` is expected
    /// without an explicit conversion.
    pub fn is_assignable_from(&self, other: &QueryType) -> bool {
        if self == other {
            return true;
        }

        match (self, other) {
            (QueryType::Scalar(to), QueryType::Scalar(from)) => from.widens_to(*to),
            (QueryType::Entity(to), QueryType::Entity(from))
            | (QueryType::Reference(to), QueryType::Reference(from)) => from.derives_from(to),
            (QueryType::Collection(to), QueryType::Collection(from)) => to.is_assignable_from(from),
            _ => false,
        }
    }

    /// Whether the two types are related by assignability in either direction
    pub fn is_related_to(&self, other: &QueryType) -> bool {
        self.is_assignable_from(other) || other.is_assignable_from(self)
    }

    /// Whether an explicit conversion from `self` to `target` is legal
    pub fn can_convert_to(&self, target: &QueryType) -> bool {
        if self.is_related_to(target) {
            return true;
        }

        match (self, target) {
            (QueryType::Scalar(from), QueryType::Scalar(to)) => {
                (from.is_numeric() && to.is_numeric()) || *to == ScalarType::String
            }
            _ => false,
        }
    }

    /// The type both operands can be widened to, if any
    pub fn common_supertype(&self, other: &QueryType) -> Option<QueryType> {
        if self.is_assignable_from(other) {
            Some(self.clone())
        } else if other.is_assignable_from(self) {
            Some(other.clone())
        } else {
            None
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Scalar(scalar) => f.write_str(scalar.as_str()),
            QueryType::Entity(entity) => f.write_str(entity.name()),
            QueryType::Complex(complex) => f.write_str(complex.name()),
            QueryType::Collection(element) => write!(f, "Collection({})", element),
            QueryType::Reference(entity) => write!(f, "Ref({})", entity.name()),
        }
    }
}

impl Serialize for QueryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<ScalarType> for QueryType {
    fn from(scalar: ScalarType) -> Self {
        QueryType::Scalar(scalar)
    }
}
