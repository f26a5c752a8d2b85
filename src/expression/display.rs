//! Diagnostic rendering of expression trees.
//!
//! Rendering is deterministic and composes the rendering of children with
//! variant-specific syntax. It is meant for logs and test output, not as a
//! parseable query language.

use crate::expression::{
    BinaryOperator, ExpressionVisitor, LambdaParameter, QueryExpression, TypeOperation,
    UnaryOperator, Value,
};
use std::fmt;

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.accept(&mut Renderer { f })
    }
}

struct Renderer<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl Renderer<'_, '_> {
    fn type_operation(&mut self, operation: &TypeOperation) -> fmt::Result {
        self.f.write_str("(")?;
        operation.source().accept(self)?;
        write!(
            self.f,
            " {} {})",
            operation.operator().keyword(),
            operation.target()
        )
    }

    fn list(&mut self, items: &[QueryExpression]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            item.accept(self)?;
        }
        Ok(())
    }
}

impl ExpressionVisitor for Renderer<'_, '_> {
    type Result = fmt::Result;

    fn visit_constant(&mut self, _: &QueryExpression, value: &Value) -> fmt::Result {
        write!(self.f, "{}", value)
    }

    fn visit_null(&mut self, _: &QueryExpression) -> fmt::Result {
        self.f.write_str("null")
    }

    fn visit_root(&mut self, _: &QueryExpression, name: &str) -> fmt::Result {
        self.f.write_str(name)
    }

    fn visit_parameter(&mut self, _: &QueryExpression, name: &str) -> fmt::Result {
        self.f.write_str(name)
    }

    fn visit_property(
        &mut self,
        _: &QueryExpression,
        instance: &QueryExpression,
        name: &str,
    ) -> fmt::Result {
        instance.accept(self)?;
        write!(self.f, ".{}", name)
    }

    fn visit_binary(
        &mut self,
        _: &QueryExpression,
        op: BinaryOperator,
        left: &QueryExpression,
        right: &QueryExpression,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        left.accept(self)?;
        write!(self.f, " {} ", op.as_str())?;
        right.accept(self)?;
        self.f.write_str(")")
    }

    fn visit_unary(
        &mut self,
        _: &QueryExpression,
        op: UnaryOperator,
        operand: &QueryExpression,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        match op {
            UnaryOperator::Negate => {
                self.f.write_str("-")?;
                operand.accept(self)?;
            }
            _ if op.is_postfix() => {
                operand.accept(self)?;
                write!(self.f, " {}", op.as_str())?;
            }
            _ => {
                write!(self.f, "{} ", op.as_str())?;
                operand.accept(self)?;
            }
        }
        self.f.write_str(")")
    }

    fn visit_as(&mut self, _: &QueryExpression, operation: &TypeOperation) -> fmt::Result {
        self.type_operation(operation)
    }

    fn visit_is_of(&mut self, _: &QueryExpression, operation: &TypeOperation) -> fmt::Result {
        self.type_operation(operation)
    }

    fn visit_cast(&mut self, _: &QueryExpression, operation: &TypeOperation) -> fmt::Result {
        self.type_operation(operation)
    }

    fn visit_of_type(&mut self, _: &QueryExpression, operation: &TypeOperation) -> fmt::Result {
        self.type_operation(operation)
    }

    fn visit_function_call(
        &mut self,
        _: &QueryExpression,
        name: &str,
        arguments: &[QueryExpression],
    ) -> fmt::Result {
        write!(self.f, "{}(", name)?;
        self.list(arguments)?;
        self.f.write_str(")")
    }

    fn visit_lambda(
        &mut self,
        _: &QueryExpression,
        parameters: &[LambdaParameter],
        body: &QueryExpression,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        for (i, parameter) in parameters.iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            write!(self.f, "{}: {}", parameter.name, parameter.ty)?;
        }
        self.f.write_str(") => ")?;
        body.accept(self)
    }

    fn visit_conditional(
        &mut self,
        _: &QueryExpression,
        condition: &QueryExpression,
        if_true: &QueryExpression,
        if_false: &QueryExpression,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        condition.accept(self)?;
        self.f.write_str(" ? ")?;
        if_true.accept(self)?;
        self.f.write_str(" : ")?;
        if_false.accept(self)?;
        self.f.write_str(")")
    }
}
