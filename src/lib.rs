//! Typed query expression trees with visitor dispatch.
//!
//! Trees are built through validating factories on [`QueryExpression`], carry
//! a static [`QueryType`] on every node, and are consumed by implementing
//! [`ExpressionVisitor`].

pub mod expression;
pub mod schema;
pub mod types;

pub use expression::{ExpressionError, ExpressionResult, ExpressionVisitor, QueryExpression};
pub use types::{QueryType, TypeRegistry};
