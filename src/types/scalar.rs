/// Primitive types usable in query expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Boolean,
    Int32,
    Int64,
    Double,
    Decimal,
    String,
    DateTime,
    Guid,
    Binary,
}

impl ScalarType {
    pub const ALL: [ScalarType; 9] = [
        ScalarType::Boolean,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::Double,
        ScalarType::Decimal,
        ScalarType::String,
        ScalarType::DateTime,
        ScalarType::Guid,
        ScalarType::Binary,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|scalar| scalar.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::Int32 => "Int32",
            ScalarType::Int64 => "Int64",
            ScalarType::Double => "Double",
            ScalarType::Decimal => "Decimal",
            ScalarType::String => "String",
            ScalarType::DateTime => "DateTime",
            ScalarType::Guid => "Guid",
            ScalarType::Binary => "Binary",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarType::Int32 | ScalarType::Int64 | ScalarType::Double | ScalarType::Decimal
        )
    }

    /// Whether values of this type support `<`, `<=`, `>` and `>=`
    pub fn is_ordered(&self) -> bool {
        self.is_numeric() || matches!(self, ScalarType::String | ScalarType::DateTime)
    }

    /// Implicit widening conversion (reflexive)
    pub fn widens_to(&self, target: ScalarType) -> bool {
        if *self == target {
            return true;
        }

        match self {
            ScalarType::Int32 => matches!(
                target,
                ScalarType::Int64 | ScalarType::Double | ScalarType::Decimal
            ),
            ScalarType::Int64 => matches!(target, ScalarType::Double | ScalarType::Decimal),
            _ => false,
        }
    }
}
