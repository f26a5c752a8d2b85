//! Typed query expression trees.
//!
//! This module provides:
//! - Expression node representation with static result types
//! - Factory operations that validate operands at construction
//! - The type-operation family (`as`, `is of`, `cast`, `of type`)
//! - Visitor dispatch over the closed set of variants
//! - Rendering, type checking and rewriting built on the visitor

pub mod display;
pub mod error;
pub mod expr;
pub mod operator;
pub mod rewrite;
pub mod type_checker;
pub mod type_operation;
pub mod value;
pub mod visitor;

pub use error::{ExpressionError, ExpressionResult};
pub use expr::{ExpressionKind, LambdaParameter, QueryExpression};
pub use operator::{BinaryOperator, UnaryOperator};
pub use rewrite::{substitute_parameter, ExpressionRewriter};
pub use type_checker::{type_check_against, type_check_expression, TypeChecker};
pub use type_operation::{TypeOperation, TypeOperationBuilder, TypeOperator};
pub use value::Value;
pub use visitor::ExpressionVisitor;
