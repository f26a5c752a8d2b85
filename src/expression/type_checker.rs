//! Type checking for expression trees.
//!
//! Factories already refuse ill-typed nodes; the checker re-derives every
//! node's type bottom-up and compares it with the type the node carries. With
//! a registry attached it also verifies that every named type in the tree is
//! the one registered under that name, which catches trees built against a
//! different schema.

use crate::expression::expr::{
    binary_type, check_parameters, conditional_type, parameter_reference, property_type,
    unary_type,
};
use crate::expression::{
    BinaryOperator, ExpressionError, ExpressionResult, ExpressionVisitor, LambdaParameter,
    QueryExpression, TypeOperation, UnaryOperator, Value,
};
use crate::types::{QueryType, TypeRegistry};
use log::debug;

/// Type checker for expressions
pub struct TypeChecker<'a> {
    /// Schema the tree's named types must come from
    registry: Option<&'a TypeRegistry>,
    /// Parameters of the enclosing lambdas, innermost last
    scope: Vec<LambdaParameter>,
    checked: usize,
}

impl<'a> TypeChecker<'a> {
    /// Create a checker that only verifies internal consistency
    pub fn new() -> Self {
        Self {
            registry: None,
            scope: Vec::new(),
            checked: 0,
        }
    }

    /// Create a checker that also verifies types against a registry
    pub fn with_registry(registry: &'a TypeRegistry) -> Self {
        Self {
            registry: Some(registry),
            scope: Vec::new(),
            checked: 0,
        }
    }

    /// Type check an expression and return its output type
    pub fn check(&mut self, expr: &QueryExpression) -> ExpressionResult<QueryType> {
        let ty = expr.accept(self)?;
        debug!("Type checked {} nodes, result type {}", self.checked, ty);
        Ok(ty)
    }

    /// Check that an expression can be used as a predicate
    pub fn check_predicate(&mut self, expr: &QueryExpression) -> ExpressionResult<()> {
        let ty = self.check(expr)?;
        if ty != QueryType::BOOLEAN {
            return Err(ExpressionError::TypeMismatch {
                expected: QueryType::BOOLEAN,
                actual: ty,
                context: "predicate".to_string(),
            });
        }
        Ok(())
    }

    /// Number of nodes verified so far
    pub fn checked_nodes(&self) -> usize {
        self.checked
    }

    fn verify(&mut self, expr: &QueryExpression, expected: QueryType) -> ExpressionResult<QueryType> {
        self.check_known(&expected)?;
        if expr.result_type() != &expected {
            return Err(ExpressionError::TypeMismatch {
                expected,
                actual: expr.result_type().clone(),
                context: format!("{} node", expr.kind().variant_name()),
            });
        }
        self.checked += 1;
        Ok(expected)
    }

    fn check_known(&self, ty: &QueryType) -> ExpressionResult<()> {
        let Some(registry) = self.registry else {
            return Ok(());
        };

        let named = match ty {
            QueryType::Scalar(_) => return Ok(()),
            QueryType::Collection(element) => return self.check_known(element),
            QueryType::Reference(entity) => QueryType::Entity(entity.clone()),
            QueryType::Entity(_) | QueryType::Complex(_) => ty.clone(),
        };

        let registered = registry.get(named.name())?;
        if registered != named {
            return Err(ExpressionError::TypeMismatch {
                expected: registered,
                actual: named,
                context: "registered type".to_string(),
            });
        }
        Ok(())
    }

    fn type_operation(
        &mut self,
        expr: &QueryExpression,
        operation: &TypeOperation,
    ) -> ExpressionResult<QueryType> {
        let source = operation.source().accept(self)?;
        self.check_known(operation.target())?;
        let expected = operation
            .operator()
            .output_type(&source, operation.target())?;
        self.verify(expr, expected)
    }
}

impl Default for TypeChecker<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionVisitor for TypeChecker<'_> {
    type Result = ExpressionResult<QueryType>;

    fn visit_constant(&mut self, expr: &QueryExpression, value: &Value) -> Self::Result {
        self.verify(expr, QueryType::Scalar(value.scalar_type()))
    }

    fn visit_null(&mut self, expr: &QueryExpression) -> Self::Result {
        self.verify(expr, expr.result_type().clone())
    }

    fn visit_root(&mut self, expr: &QueryExpression, _: &str) -> Self::Result {
        self.verify(expr, expr.result_type().clone())
    }

    fn visit_parameter(&mut self, expr: &QueryExpression, name: &str) -> Self::Result {
        if let Some(parameter) = self.scope.iter().rev().find(|p| p.name == name) {
            parameter_reference(parameter, expr.result_type())?;
        }
        self.verify(expr, expr.result_type().clone())
    }

    fn visit_property(
        &mut self,
        expr: &QueryExpression,
        instance: &QueryExpression,
        name: &str,
    ) -> Self::Result {
        let instance = instance.accept(self)?;
        self.verify(expr, property_type(&instance, name)?)
    }

    fn visit_binary(
        &mut self,
        expr: &QueryExpression,
        op: BinaryOperator,
        left: &QueryExpression,
        right: &QueryExpression,
    ) -> Self::Result {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        self.verify(expr, binary_type(op, &left, &right)?)
    }

    fn visit_unary(
        &mut self,
        expr: &QueryExpression,
        op: UnaryOperator,
        operand: &QueryExpression,
    ) -> Self::Result {
        let operand = operand.accept(self)?;
        self.verify(expr, unary_type(op, &operand)?)
    }

    fn visit_as(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result {
        self.type_operation(expr, operation)
    }

    fn visit_is_of(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result {
        self.type_operation(expr, operation)
    }

    fn visit_cast(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result {
        self.type_operation(expr, operation)
    }

    fn visit_of_type(&mut self, expr: &QueryExpression, operation: &TypeOperation) -> Self::Result {
        self.type_operation(expr, operation)
    }

    fn visit_function_call(
        &mut self,
        expr: &QueryExpression,
        _: &str,
        arguments: &[QueryExpression],
    ) -> Self::Result {
        for argument in arguments {
            argument.accept(self)?;
        }
        self.verify(expr, expr.result_type().clone())
    }

    fn visit_lambda(
        &mut self,
        expr: &QueryExpression,
        parameters: &[LambdaParameter],
        body: &QueryExpression,
    ) -> Self::Result {
        check_parameters(parameters)?;
        for parameter in parameters {
            self.check_known(&parameter.ty)?;
        }

        let depth = self.scope.len();
        self.scope.extend(parameters.iter().cloned());
        let body = body.accept(self);
        self.scope.truncate(depth);

        self.verify(expr, body?)
    }

    fn visit_conditional(
        &mut self,
        expr: &QueryExpression,
        condition: &QueryExpression,
        if_true: &QueryExpression,
        if_false: &QueryExpression,
    ) -> Self::Result {
        let condition = condition.accept(self)?;
        let if_true = if_true.accept(self)?;
        let if_false = if_false.accept(self)?;
        self.verify(expr, conditional_type(&condition, &if_true, &if_false)?)
    }
}

/// Helper function to type check an expression
pub fn type_check_expression(expr: &QueryExpression) -> ExpressionResult<QueryType> {
    TypeChecker::new().check(expr)
}

/// Helper function to check an expression against a registry
pub fn type_check_against(
    expr: &QueryExpression,
    registry: &TypeRegistry,
) -> ExpressionResult<QueryType> {
    TypeChecker::with_registry(registry).check(expr)
}
