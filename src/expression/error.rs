//! Error types for expression construction and verification.

use crate::expression::TypeOperator;
use crate::types::{QueryType, TypeError};
use thiserror::Error;

/// Errors raised while building or checking an expression tree.
///
/// Every variant signals a malformed tree; none of them is retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Missing {operand} operand for {expression} expression")]
    MissingOperand {
        expression: &'static str,
        operand: &'static str,
    },

    #[error("Illegal type operation: {source_type} {} {target_type}", .operator.keyword())]
    IllegalTypeOperation {
        operator: TypeOperator,
        source_type: QueryType,
        target_type: QueryType,
    },

    #[error("Invalid operand types for operator {operator}: left={left_type}, right={}", display_optional(.right_type))]
    InvalidOperandTypes {
        operator: &'static str,
        left_type: QueryType,
        right_type: Option<QueryType>,
    },

    #[error("Type {type_name} has no property {property}")]
    UnknownProperty { type_name: String, property: String },

    #[error("Type {ty} is not a structural type in {context}")]
    NotStructural { ty: QueryType, context: String },

    #[error("Type mismatch in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: QueryType,
        actual: QueryType,
        context: String,
    },

    #[error("Lambda parameter {name} is declared more than once")]
    DuplicateParameter { name: String },

    #[error("Substituting parameter {parameter} would capture free parameter {captured} under a lambda")]
    ParameterCapture { parameter: String, captured: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

fn display_optional(ty: &Option<QueryType>) -> String {
    ty.as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
