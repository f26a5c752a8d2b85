//! Visitor dispatch over the closed set of expression variants.
//!
//! `accept` matches exhaustively on the node's variant and calls exactly one
//! visitor method, so adding a variant is a compile error for every visitor
//! until it handles the new case. Visitors decide for themselves whether and
//! how to recurse into children.

use crate::expression::{
    BinaryOperator, ExpressionKind, LambdaParameter, QueryExpression, TypeOperation, TypeOperator,
    UnaryOperator, Value,
};

/// One method per expression variant.
///
/// Every method receives the visited node itself (for its result type) plus
/// the variant's operands.
pub trait ExpressionVisitor {
    type Result;

    fn visit_constant(&mut self, expr: &QueryExpression, value: &Value) -> Self::Result;

    fn visit_null(&mut self, expr: &QueryExpression) -> Self::Result;

    fn visit_root(&mut self, expr: &QueryExpression, name: &str) -> Self::Result;

    fn visit_parameter(&mut self, expr: &QueryExpression, name: &str) -> Self::Result;

    fn visit_property(
        &mut self,
        expr: &QueryExpression,
        instance: &QueryExpression,
        name: &str,
    ) -> Self::Result;

    fn visit_binary(
        &mut self,
        expr: &QueryExpression,
        op: BinaryOperator,
        left: &QueryExpression,
        right: &QueryExpression,
    ) -> Self::Result;

    fn visit_unary(
        &mut self,
        expr: &QueryExpression,
        op: UnaryOperator,
        operand: &QueryExpression,
    ) -> Self::Result;

    fn visit_as(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result;

    fn visit_is_of(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result;

    fn visit_cast(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result;

    fn visit_of_type(&mut self, expr: &QueryExpression, operation: &TypeOperation)
        -> Self::Result;

    fn visit_function_call(
        &mut self,
        expr: &QueryExpression,
        name: &str,
        arguments: &[QueryExpression],
    ) -> Self::Result;

    fn visit_lambda(
        &mut self,
        expr: &QueryExpression,
        parameters: &[LambdaParameter],
        body: &QueryExpression,
    ) -> Self::Result;

    fn visit_conditional(
        &mut self,
        expr: &QueryExpression,
        condition: &QueryExpression,
        if_true: &QueryExpression,
        if_false: &QueryExpression,
    ) -> Self::Result;
}

impl QueryExpression {
    /// Dispatch to the visitor method matching this node's variant
    pub fn accept<V: ExpressionVisitor + ?Sized>(&self, visitor: &mut V) -> V::Result {
        match self.kind() {
            ExpressionKind::Constant { value } => visitor.visit_constant(self, value),
            ExpressionKind::Null => visitor.visit_null(self),
            ExpressionKind::Root { name } => visitor.visit_root(self, name),
            ExpressionKind::Parameter { name } => visitor.visit_parameter(self, name),
            ExpressionKind::Property { instance, name } => {
                visitor.visit_property(self, instance, name)
            }
            ExpressionKind::Binary { op, left, right } => {
                visitor.visit_binary(self, *op, left, right)
            }
            ExpressionKind::Unary { op, operand } => visitor.visit_unary(self, *op, operand),
            ExpressionKind::TypeOperation(operation) => match operation.operator() {
                TypeOperator::As => visitor.visit_as(self, operation),
                TypeOperator::IsOf => visitor.visit_is_of(self, operation),
                TypeOperator::Cast => visitor.visit_cast(self, operation),
                TypeOperator::OfType => visitor.visit_of_type(self, operation),
            },
            ExpressionKind::FunctionCall { name, arguments } => {
                visitor.visit_function_call(self, name, arguments)
            }
            ExpressionKind::Lambda { parameters, body } => {
                visitor.visit_lambda(self, parameters, body)
            }
            ExpressionKind::Conditional {
                condition,
                if_true,
                if_false,
            } => visitor.visit_conditional(self, condition, if_true, if_false),
        }
    }
}
