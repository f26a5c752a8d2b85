//! Tree rewriting.
//!
//! Trees are immutable, so a rewrite produces a new tree. The rewriter walks
//! the input, offers every node to a replacement hook, and rebuilds untouched
//! nodes through the regular factories so the output is validated exactly like
//! a freshly built tree.

use crate::expression::{
    BinaryOperator, ExpressionError, ExpressionKind, ExpressionResult, ExpressionVisitor,
    LambdaParameter, QueryExpression, TypeOperation, UnaryOperator, Value,
};
use log::trace;

/// Rebuilds a tree, offering every node to a replacement hook first.
///
/// The hook receives a node and the names of lambda parameters in scope at
/// that node. Returning `Some` replaces the whole subtree.
pub struct ExpressionRewriter<F>
where
    F: FnMut(&QueryExpression, &[String]) -> Option<QueryExpression>,
{
    replace: F,
    scope: Vec<String>,
    replaced: usize,
}

impl<F> ExpressionRewriter<F>
where
    F: FnMut(&QueryExpression, &[String]) -> Option<QueryExpression>,
{
    pub fn new(replace: F) -> Self {
        Self {
            replace,
            scope: Vec::new(),
            replaced: 0,
        }
    }

    pub fn rewrite(&mut self, expr: &QueryExpression) -> ExpressionResult<QueryExpression> {
        expr.accept(self)
    }

    /// Number of subtrees replaced so far
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    fn substitute(&mut self, expr: &QueryExpression) -> Option<QueryExpression> {
        let replacement = (self.replace)(expr, &self.scope)?;
        trace!("Replaced {} with {}", expr, replacement);
        self.replaced += 1;
        Some(replacement)
    }

    fn type_operation(
        &mut self,
        expr: &QueryExpression,
        operation: &TypeOperation,
    ) -> ExpressionResult<QueryExpression> {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }
        let source = operation.source().accept(self)?;
        QueryExpression::type_operation(operation.operator(), source, operation.target().clone())
    }

    fn leaf(&mut self, expr: &QueryExpression) -> ExpressionResult<QueryExpression> {
        Ok(self.substitute(expr).unwrap_or_else(|| expr.clone()))
    }
}

impl<F> ExpressionVisitor for ExpressionRewriter<F>
where
    F: FnMut(&QueryExpression, &[String]) -> Option<QueryExpression>,
{
    type Result = ExpressionResult<QueryExpression>;

    fn visit_constant(&mut self, expr: &QueryExpression, _: &Value) -> Self::Result {
        self.leaf(expr)
    }

    fn visit_null(&mut self, expr: &QueryExpression) -> Self::Result {
        self.leaf(expr)
    }

    fn visit_root(&mut self, expr: &QueryExpression, _: &str) -> Self::Result {
        self.leaf(expr)
    }

    fn visit_parameter(&mut self, expr: &QueryExpression, _: &str) -> Self::Result {
        self.leaf(expr)
    }

    fn visit_property(
        &mut self,
        expr: &QueryExpression,
        instance: &QueryExpression,
        name: &str,
    ) -> Self::Result {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }
        QueryExpression::property(instance.accept(self)?, name)
    }

    fn visit_binary(
        &mut self,
        expr: &QueryExpression,
        op: BinaryOperator,
        left: &QueryExpression,
        right: &QueryExpression,
    ) -> Self::Result {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        QueryExpression::binary(op, left, right)
    }

    fn visit_unary(
        &mut self,
        expr: &QueryExpression,
        op: UnaryOperator,
        operand: &QueryExpression,
    ) -> Self::Result {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }
        QueryExpression::unary(op, operand.accept(self)?)
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
        name: &str,
        arguments: &[QueryExpression],
    ) -> Self::Result {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }
        let arguments = arguments
            .iter()
            .map(|argument| argument.accept(self))
            .collect::<ExpressionResult<Vec<_>>>()?;
        QueryExpression::function_call(name, arguments, expr.result_type().clone())
    }

    fn visit_lambda(
        &mut self,
        expr: &QueryExpression,
        parameters: &[LambdaParameter],
        body: &QueryExpression,
    ) -> Self::Result {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }

        let depth = self.scope.len();
        self.scope
            .extend(parameters.iter().map(|parameter| parameter.name.clone()));
        let body = body.accept(self);
        self.scope.truncate(depth);

        QueryExpression::lambda(parameters.to_vec(), body?)
    }

    fn visit_conditional(
        &mut self,
        expr: &QueryExpression,
        condition: &QueryExpression,
        if_true: &QueryExpression,
        if_false: &QueryExpression,
    ) -> Self::Result {
        if let Some(replacement) = self.substitute(expr) {
            return Ok(replacement);
        }
        let condition = condition.accept(self)?;
        let if_true = if_true.accept(self)?;
        let if_false = if_false.accept(self)?;
        QueryExpression::conditional(condition, if_true, if_false)
    }
}

/// Replace free references to parameter `name` with `replacement`.
///
/// References shadowed by a lambda parameter of the same name are left alone.
/// The rebuilt tree is re-validated, so a replacement whose type does not fit
/// its context yields a construction error. A replacement with a free
/// parameter that a lambda around the reference would bind fails with
/// `ParameterCapture`.
pub fn substitute_parameter(
    expr: &QueryExpression,
    name: &str,
    replacement: &QueryExpression,
) -> ExpressionResult<QueryExpression> {
    let free = replacement.free_parameters();
    let mut captured: Option<String> = None;

    let rewritten = {
        let mut rewriter = ExpressionRewriter::new(|node: &QueryExpression, scope: &[String]| {
            match node.kind() {
                ExpressionKind::Parameter { name: found }
                    if found == name && !scope.iter().any(|bound| bound == name) =>
                {
                    let binder = scope.iter().find(|bound| free.contains(bound.as_str()));
                    if let Some(binder) = binder {
                        captured.get_or_insert_with(|| binder.clone());
                        return None;
                    }
                    Some(replacement.clone())
                }
                _ => None,
            }
        });
        rewriter.rewrite(expr)
    };

    if let Some(captured) = captured {
        return Err(ExpressionError::ParameterCapture {
            parameter: name.to_string(),
            captured,
        });
    }
    rewritten
}
