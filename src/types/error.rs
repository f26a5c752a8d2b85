//! Errors raised while defining or resolving types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Type {name} is already defined")]
    DuplicateType { name: String },

    #[error("Property {property} is declared more than once on {type_name}")]
    DuplicateProperty { type_name: String, property: String },

    #[error("Type registry is frozen: cannot define {name}")]
    Frozen { name: String },

    #[error("Invalid type name '{text}': {reason}")]
    InvalidTypeName { text: String, reason: String },

    #[error("Type {name} is not an entity type")]
    NotAnEntity { name: String },
}

pub type TypeResult<T> = Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypeError::UnknownType {
            name: "Widget".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown type: Widget");

        let err = TypeError::Frozen {
            name: "Person".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type registry is frozen: cannot define Person"
        );

        let err = TypeError::InvalidTypeName {
            text: "Collection(".to_string(),
            reason: "unbalanced parentheses".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid type name 'Collection(': unbalanced parentheses"
        );
    }
}
