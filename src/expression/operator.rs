//! Operator definitions for expressions.

use crate::types::{QueryType, ScalarType};
use serde::Serialize;

/// Binary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,

    // Logical
    And,
    Or,

    // String
    Concat,
}

impl BinaryOperator {
    /// Get the output type of this operator given input types
    pub fn output_type(&self, left: &QueryType, right: &QueryType) -> Option<QueryType> {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo => {
                if left.is_numeric() && right.is_numeric() {
                    left.common_supertype(right)
                } else {
                    None
                }
            }

            // Equality works on any pair of related types, entities included
            BinaryOperator::EqualTo | BinaryOperator::NotEqualTo => {
                if left.is_related_to(right) {
                    Some(QueryType::BOOLEAN)
                } else {
                    None
                }
            }

            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqualTo
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqualTo => match left.common_supertype(right) {
                Some(QueryType::Scalar(scalar)) if scalar.is_ordered() => Some(QueryType::BOOLEAN),
                _ => None,
            },

            BinaryOperator::And | BinaryOperator::Or => match (left, right) {
                (QueryType::Scalar(ScalarType::Boolean), QueryType::Scalar(ScalarType::Boolean)) => {
                    Some(QueryType::BOOLEAN)
                }
                _ => None,
            },

            BinaryOperator::Concat => match (left, right) {
                (QueryType::Scalar(ScalarType::String), QueryType::Scalar(ScalarType::String)) => {
                    Some(QueryType::STRING)
                }
                _ => None,
            },
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::EqualTo => "=",
            BinaryOperator::NotEqualTo => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqualTo => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqualTo => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Concat => "||",
        }
    }
}

/// Unary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Not,
    Negate,
    IsNull,
}

impl UnaryOperator {
    /// Get the output type of this operator given input type
    pub fn output_type(&self, operand: &QueryType) -> Option<QueryType> {
        match self {
            UnaryOperator::Not => match operand {
                QueryType::Scalar(ScalarType::Boolean) => Some(QueryType::BOOLEAN),
                _ => None,
            },

            UnaryOperator::Negate => {
                if operand.is_numeric() {
                    Some(operand.clone())
                } else {
                    None
                }
            }

            // NULL checks always return boolean regardless of input type
            UnaryOperator::IsNull => Some(QueryType::BOOLEAN),
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "NOT",
            UnaryOperator::Negate => "-",
            UnaryOperator::IsNull => "IS NULL",
        }
    }

    /// Whether the operator is written after its operand
    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOperator::IsNull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operator_output_types() {
        // Arithmetic widens to the common numeric type
        assert_eq!(
            BinaryOperator::Add.output_type(&QueryType::INT32, &QueryType::INT32),
            Some(QueryType::INT32)
        );
        assert_eq!(
            BinaryOperator::Multiply.output_type(&QueryType::INT32, &QueryType::DOUBLE),
            Some(QueryType::DOUBLE)
        );
        assert_eq!(
            BinaryOperator::Subtract.output_type(&QueryType::INT64, &QueryType::DECIMAL),
            Some(QueryType::DECIMAL)
        );

        // Type mismatch for arithmetic
        assert_eq!(
            BinaryOperator::Add.output_type(&QueryType::INT32, &QueryType::STRING),
            None
        );
        assert_eq!(
            BinaryOperator::Divide.output_type(&QueryType::DOUBLE, &QueryType::DECIMAL),
            None
        );

        // Comparison operators
        assert_eq!(
            BinaryOperator::EqualTo.output_type(&QueryType::INT32, &QueryType::INT64),
            Some(QueryType::BOOLEAN)
        );
        assert_eq!(
            BinaryOperator::LessThan.output_type(&QueryType::STRING, &QueryType::STRING),
            Some(QueryType::BOOLEAN)
        );
        assert_eq!(
            BinaryOperator::GreaterThan.output_type(&QueryType::BOOLEAN, &QueryType::BOOLEAN),
            None
        );
        assert_eq!(
            BinaryOperator::EqualTo.output_type(&QueryType::INT32, &QueryType::STRING),
            None
        );

        // Logical operators
        assert_eq!(
            BinaryOperator::And.output_type(&QueryType::BOOLEAN, &QueryType::BOOLEAN),
            Some(QueryType::BOOLEAN)
        );
        assert_eq!(
            BinaryOperator::Or.output_type(&QueryType::INT32, &QueryType::BOOLEAN),
            None
        );

        // String operators
        assert_eq!(
            BinaryOperator::Concat.output_type(&QueryType::STRING, &QueryType::STRING),
            Some(QueryType::STRING)
        );
    }

    #[test]
    fn test_unary_operator_output_types() {
        assert_eq!(
            UnaryOperator::Not.output_type(&QueryType::BOOLEAN),
            Some(QueryType::BOOLEAN)
        );
        assert_eq!(UnaryOperator::Not.output_type(&QueryType::INT32), None);

        assert_eq!(
            UnaryOperator::Negate.output_type(&QueryType::INT64),
            Some(QueryType::INT64)
        );
        assert_eq!(UnaryOperator::Negate.output_type(&QueryType::STRING), None);

        // NULL checks work on any type
        assert_eq!(
            UnaryOperator::IsNull.output_type(&QueryType::STRING),
            Some(QueryType::BOOLEAN)
        );
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(BinaryOperator::Add.as_str(), "+");
        assert_eq!(BinaryOperator::EqualTo.as_str(), "=");
        assert_eq!(BinaryOperator::And.as_str(), "AND");
        assert_eq!(BinaryOperator::Concat.as_str(), "||");

        assert_eq!(UnaryOperator::Not.as_str(), "NOT");
        assert_eq!(UnaryOperator::IsNull.as_str(), "IS NULL");
        assert!(UnaryOperator::IsNull.is_postfix());
        assert!(!UnaryOperator::Negate.is_postfix());
    }
}
