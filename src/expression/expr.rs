//! Expression tree definitions and factory operations.
//!
//! A `QueryExpression` can only be obtained from the factories in this
//! module (or `TypeOperationBuilder`), each of which validates its operands
//! and assigns the node's static result type. Nodes are never mutated after
//! construction.

use crate::expression::{
    BinaryOperator, ExpressionError, ExpressionResult, TypeOperation, TypeOperationBuilder,
    TypeOperator, UnaryOperator, Value,
};
use crate::types::QueryType;
use log::trace;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Typed parameter of a lambda expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LambdaParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: QueryType,
}

impl LambdaParameter {
    pub fn new(name: impl Into<String>, ty: QueryType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Variant-specific payload of an expression node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ExpressionKind {
    /// Literal constant value
    Constant { value: Value },

    /// Typed null literal
    Null,

    /// Named query root such as an entity set
    Root { name: String },

    /// Reference to a lambda or function parameter
    Parameter { name: String },

    /// Property access on a structural instance
    Property {
        instance: Box<QueryExpression>,
        name: String,
    },

    /// Binary operation
    Binary {
        op: BinaryOperator,
        left: Box<QueryExpression>,
        right: Box<QueryExpression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<QueryExpression>,
    },

    /// `as`, `is of`, `cast` and `of type`
    TypeOperation(TypeOperation),

    /// Call of a function with a declared return type
    FunctionCall {
        name: String,
        arguments: Vec<QueryExpression>,
    },

    /// Lambda with typed parameters
    Lambda {
        parameters: Vec<LambdaParameter>,
        body: Box<QueryExpression>,
    },

    /// Ternary conditional
    Conditional {
        condition: Box<QueryExpression>,
        if_true: Box<QueryExpression>,
        if_false: Box<QueryExpression>,
    },
}

impl ExpressionKind {
    /// Stable name of the variant, type operations split by operator
    pub fn variant_name(&self) -> &'static str {
        match self {
            ExpressionKind::Constant { .. } => "constant",
            ExpressionKind::Null => "null",
            ExpressionKind::Root { .. } => "root",
            ExpressionKind::Parameter { .. } => "parameter",
            ExpressionKind::Property { .. } => "property",
            ExpressionKind::Binary { .. } => "binary",
            ExpressionKind::Unary { .. } => "unary",
            ExpressionKind::TypeOperation(op) => match op.operator() {
                TypeOperator::As => "as",
                TypeOperator::IsOf => "is_of",
                TypeOperator::Cast => "cast",
                TypeOperator::OfType => "of_type",
            },
            ExpressionKind::FunctionCall { .. } => "function_call",
            ExpressionKind::Lambda { .. } => "lambda",
            ExpressionKind::Conditional { .. } => "conditional",
        }
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryExpression {
    #[serde(rename = "type")]
    result_type: QueryType,
    kind: ExpressionKind,
}

impl QueryExpression {
    pub(crate) fn new(result_type: QueryType, kind: ExpressionKind) -> Self {
        Self { result_type, kind }
    }

    /// Static result type assigned at construction
    pub fn result_type(&self) -> &QueryType {
        &self.result_type
    }

    pub fn kind(&self) -> &ExpressionKind {
        &self.kind
    }

    /// Direct children in evaluation order
    pub fn children(&self) -> Vec<&QueryExpression> {
        match &self.kind {
            ExpressionKind::Constant { .. }
            | ExpressionKind::Null
            | ExpressionKind::Root { .. }
            | ExpressionKind::Parameter { .. } => vec![],
            ExpressionKind::Property { instance, .. } => vec![&**instance],
            ExpressionKind::Binary { left, right, .. } => vec![&**left, &**right],
            ExpressionKind::Unary { operand, .. } => vec![&**operand],
            ExpressionKind::TypeOperation(op) => vec![op.source()],
            ExpressionKind::FunctionCall { arguments, .. } => arguments.iter().collect(),
            ExpressionKind::Lambda { body, .. } => vec![&**body],
            ExpressionKind::Conditional {
                condition,
                if_true,
                if_false,
            } => vec![&**condition, &**if_true, &**if_false],
        }
    }

    /// Number of nodes in the tree rooted here
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|c| c.node_count())
            .sum::<usize>()
    }

    /// Names of parameters referenced but not bound by a lambda in this tree,
    /// in sorted order
    pub fn free_parameters(&self) -> BTreeSet<&str> {
        let mut free = BTreeSet::new();
        collect_free_parameters(self, &mut Vec::new(), &mut free);
        free
    }

    /// Create a literal expression
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(
            QueryType::Scalar(value.scalar_type()),
            ExpressionKind::Constant { value },
        )
    }

    /// Create a null literal of the given type
    pub fn null(ty: QueryType) -> Self {
        Self::new(ty, ExpressionKind::Null)
    }

    /// Create a named query root
    pub fn root(name: impl Into<String>, ty: QueryType) -> ExpressionResult<Self> {
        let name = require_name(name.into(), "root")?;
        Ok(Self::new(ty, ExpressionKind::Root { name }))
    }

    /// Create a parameter reference
    pub fn parameter(name: impl Into<String>, ty: QueryType) -> ExpressionResult<Self> {
        let name = require_name(name.into(), "parameter")?;
        Ok(Self::new(ty, ExpressionKind::Parameter { name }))
    }

    /// Create a property access expression
    pub fn property(instance: QueryExpression, name: impl Into<String>) -> ExpressionResult<Self> {
        let name = require_name(name.into(), "property")?;
        let ty = property_type(instance.result_type(), &name)?;
        Ok(Self::new(
            ty,
            ExpressionKind::Property {
                instance: Box::new(instance),
                name,
            },
        ))
    }

    /// Create a binary operation expression
    pub fn binary(
        op: BinaryOperator,
        left: QueryExpression,
        right: QueryExpression,
    ) -> ExpressionResult<Self> {
        let ty = binary_type(op, left.result_type(), right.result_type())?;
        Ok(Self::new(
            ty,
            ExpressionKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        ))
    }

    /// Create a unary operation expression
    pub fn unary(op: UnaryOperator, operand: QueryExpression) -> ExpressionResult<Self> {
        let ty = unary_type(op, operand.result_type())?;
        Ok(Self::new(
            ty,
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
        ))
    }

    /// Create an `as` expression; the result type is `target`
    pub fn type_as(source: QueryExpression, target: QueryType) -> ExpressionResult<Self> {
        Self::type_operation(TypeOperator::As, source, target)
    }

    /// Create an `is of` type test; the result type is Boolean
    pub fn is_of(source: QueryExpression, target: QueryType) -> ExpressionResult<Self> {
        Self::type_operation(TypeOperator::IsOf, source, target)
    }

    /// Create an explicit conversion
    pub fn cast(source: QueryExpression, target: QueryType) -> ExpressionResult<Self> {
        Self::type_operation(TypeOperator::Cast, source, target)
    }

    /// Create an `of type` collection filter
    pub fn of_type(source: QueryExpression, target: QueryType) -> ExpressionResult<Self> {
        Self::type_operation(TypeOperator::OfType, source, target)
    }

    pub fn type_operation(
        operator: TypeOperator,
        source: QueryExpression,
        target: QueryType,
    ) -> ExpressionResult<Self> {
        TypeOperationBuilder::new(operator)
            .source(source)
            .target(target)
            .build()
    }

    /// Create a function call with a declared return type
    pub fn function_call(
        name: impl Into<String>,
        arguments: Vec<QueryExpression>,
        return_type: QueryType,
    ) -> ExpressionResult<Self> {
        let name = require_name(name.into(), "function call")?;
        Ok(Self::new(
            return_type,
            ExpressionKind::FunctionCall { name, arguments },
        ))
    }

    /// Create a lambda; its result type is the body's type
    pub fn lambda(
        parameters: Vec<LambdaParameter>,
        body: QueryExpression,
    ) -> ExpressionResult<Self> {
        check_parameters(&parameters)?;
        check_bound_references(&body, &parameters)?;
        Ok(Self::new(
            body.result_type().clone(),
            ExpressionKind::Lambda {
                parameters,
                body: Box::new(body),
            },
        ))
    }

    /// Create a conditional; the result type is the wider branch type
    pub fn conditional(
        condition: QueryExpression,
        if_true: QueryExpression,
        if_false: QueryExpression,
    ) -> ExpressionResult<Self> {
        let ty = conditional_type(
            condition.result_type(),
            if_true.result_type(),
            if_false.result_type(),
        )?;
        Ok(Self::new(
            ty,
            ExpressionKind::Conditional {
                condition: Box::new(condition),
                if_true: Box::new(if_true),
                if_false: Box::new(if_false),
            },
        ))
    }

    pub fn add(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Add, left, right)
    }

    pub fn subtract(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Subtract, left, right)
    }

    pub fn multiply(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Multiply, left, right)
    }

    pub fn divide(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Divide, left, right)
    }

    pub fn modulo(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Modulo, left, right)
    }

    pub fn equal_to(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::EqualTo, left, right)
    }

    pub fn not_equal_to(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::NotEqualTo, left, right)
    }

    pub fn less_than(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::LessThan, left, right)
    }

    pub fn less_than_or_equal_to(
        left: QueryExpression,
        right: QueryExpression,
    ) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::LessThanOrEqualTo, left, right)
    }

    pub fn greater_than(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::GreaterThan, left, right)
    }

    pub fn greater_than_or_equal_to(
        left: QueryExpression,
        right: QueryExpression,
    ) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::GreaterThanOrEqualTo, left, right)
    }

    pub fn and(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::And, left, right)
    }

    pub fn or(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Or, left, right)
    }

    pub fn concat(left: QueryExpression, right: QueryExpression) -> ExpressionResult<Self> {
        Self::binary(BinaryOperator::Concat, left, right)
    }

    pub fn not(operand: QueryExpression) -> ExpressionResult<Self> {
        Self::unary(UnaryOperator::Not, operand)
    }

    pub fn negate(operand: QueryExpression) -> ExpressionResult<Self> {
        Self::unary(UnaryOperator::Negate, operand)
    }

    pub fn is_null(operand: QueryExpression) -> ExpressionResult<Self> {
        Self::unary(UnaryOperator::IsNull, operand)
    }
}

fn require_name(name: String, expression: &'static str) -> ExpressionResult<String> {
    if name.is_empty() {
        return Err(ExpressionError::MissingOperand {
            expression,
            operand: "name",
        });
    }
    Ok(name)
}

pub(crate) fn property_type(instance: &QueryType, name: &str) -> ExpressionResult<QueryType> {
    if !instance.is_structural() {
        return Err(ExpressionError::NotStructural {
            ty: instance.clone(),
            context: format!("access of property {}", name),
        });
    }
    instance
        .property(name)
        .map(|p| p.ty().clone())
        .ok_or_else(|| ExpressionError::UnknownProperty {
            type_name: instance.to_string(),
            property: name.to_string(),
        })
}

pub(crate) fn binary_type(
    op: BinaryOperator,
    left: &QueryType,
    right: &QueryType,
) -> ExpressionResult<QueryType> {
    op.output_type(left, right).ok_or_else(|| {
        trace!("Rejected {} {} {}", left, op.as_str(), right);
        ExpressionError::InvalidOperandTypes {
            operator: op.as_str(),
            left_type: left.clone(),
            right_type: Some(right.clone()),
        }
    })
}

pub(crate) fn unary_type(op: UnaryOperator, operand: &QueryType) -> ExpressionResult<QueryType> {
    op.output_type(operand)
        .ok_or_else(|| ExpressionError::InvalidOperandTypes {
            operator: op.as_str(),
            left_type: operand.clone(),
            right_type: None,
        })
}

pub(crate) fn conditional_type(
    condition: &QueryType,
    if_true: &QueryType,
    if_false: &QueryType,
) -> ExpressionResult<QueryType> {
    if *condition != QueryType::BOOLEAN {
        return Err(ExpressionError::TypeMismatch {
            expected: QueryType::BOOLEAN,
            actual: condition.clone(),
            context: "conditional test".to_string(),
        });
    }
    if_true
        .common_supertype(if_false)
        .ok_or_else(|| ExpressionError::TypeMismatch {
            expected: if_true.clone(),
            actual: if_false.clone(),
            context: "conditional branches".to_string(),
        })
}

/// Check that every reference to a parameter in `bound` has the declared type
fn check_bound_references(
    expr: &QueryExpression,
    bound: &[LambdaParameter],
) -> ExpressionResult<()> {
    match expr.kind() {
        ExpressionKind::Parameter { name } => match bound.iter().find(|p| p.name == *name) {
            Some(parameter) => parameter_reference(parameter, expr.result_type()),
            None => Ok(()),
        },
        ExpressionKind::Lambda { parameters, body } => {
            let visible: Vec<LambdaParameter> = bound
                .iter()
                .filter(|outer| parameters.iter().all(|inner| inner.name != outer.name))
                .cloned()
                .collect();
            if visible.is_empty() {
                return Ok(());
            }
            check_bound_references(body, &visible)
        }
        _ => expr
            .children()
            .into_iter()
            .try_for_each(|child| check_bound_references(child, bound)),
    }
}

pub(crate) fn parameter_reference(
    parameter: &LambdaParameter,
    actual: &QueryType,
) -> ExpressionResult<()> {
    if parameter.ty != *actual {
        return Err(ExpressionError::TypeMismatch {
            expected: parameter.ty.clone(),
            actual: actual.clone(),
            context: format!("reference to parameter {}", parameter.name),
        });
    }
    Ok(())
}

fn collect_free_parameters<'e>(
    expr: &'e QueryExpression,
    bound: &mut Vec<&'e str>,
    free: &mut BTreeSet<&'e str>,
) {
    match expr.kind() {
        ExpressionKind::Parameter { name } => {
            if !bound.contains(&name.as_str()) {
                free.insert(name.as_str());
            }
        }
        ExpressionKind::Lambda { parameters, body } => {
            let depth = bound.len();
            bound.extend(parameters.iter().map(|p| p.name.as_str()));
            collect_free_parameters(body, bound, free);
            bound.truncate(depth);
        }
        _ => {
            for child in expr.children() {
                collect_free_parameters(child, bound, free);
            }
        }
    }
}

pub(crate) fn check_parameters(parameters: &[LambdaParameter]) -> ExpressionResult<()> {
    let mut seen = HashSet::new();
    for parameter in parameters {
        if parameter.name.is_empty() {
            return Err(ExpressionError::MissingOperand {
                expression: "lambda",
                operand: "parameter name",
            });
        }
        if !seen.insert(parameter.name.as_str()) {
            return Err(ExpressionError::DuplicateParameter {
                name: parameter.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityType, Property};
    use std::sync::Arc;

    fn person() -> QueryType {
        QueryType::entity(
            EntityType::new(
                "Person",
                None,
                vec![
                    Property::new("Name", QueryType::STRING),
                    Property::new("Age", QueryType::INT32),
                ],
            )
            .unwrap(),
        )
    }

    fn customer(person: &QueryType) -> QueryType {
        let base = match person {
            QueryType::Entity(entity) => Arc::clone(entity),
            _ => unreachable!(),
        };
        QueryType::entity(
            EntityType::new(
                "Customer",
                Some(base),
                vec![Property::new("CustomerId", QueryType::INT32)],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_constant_and_null() {
        let expr = QueryExpression::constant(42);
        assert_eq!(expr.result_type(), &QueryType::INT32);
        assert!(matches!(expr.kind(), ExpressionKind::Constant { .. }));

        let expr = QueryExpression::null(person());
        assert_eq!(expr.result_type(), &person());
        assert!(expr.children().is_empty());
    }

    #[test]
    fn test_empty_names_rejected() {
        assert_eq!(
            QueryExpression::root("", QueryType::INT32),
            Err(ExpressionError::MissingOperand {
                expression: "root",
                operand: "name",
            })
        );
        assert!(QueryExpression::parameter("", QueryType::INT32).is_err());
        assert!(QueryExpression::function_call("", vec![], QueryType::INT32).is_err());
    }

    #[test]
    fn test_property_access() {
        let person = person();
        let customer = customer(&person);
        let c = QueryExpression::parameter("c", customer).unwrap();

        // Inherited property
        let name = QueryExpression::property(c.clone(), "Name").unwrap();
        assert_eq!(name.result_type(), &QueryType::STRING);

        let missing = QueryExpression::property(c, "Salary");
        assert_eq!(
            missing,
            Err(ExpressionError::UnknownProperty {
                type_name: "Customer".to_string(),
                property: "Salary".to_string(),
            })
        );

        let scalar = QueryExpression::property(QueryExpression::constant(1), "Name");
        assert!(matches!(scalar, Err(ExpressionError::NotStructural { .. })));
    }

    #[test]
    fn test_binary_and_unary() {
        let sum = QueryExpression::add(
            QueryExpression::constant(1),
            QueryExpression::constant(2.5),
        )
        .unwrap();
        assert_eq!(sum.result_type(), &QueryType::DOUBLE);

        let cmp = QueryExpression::greater_than(sum, QueryExpression::constant(3)).unwrap();
        assert_eq!(cmp.result_type(), &QueryType::BOOLEAN);

        let bad = QueryExpression::and(cmp.clone(), QueryExpression::constant(1));
        assert!(matches!(
            bad,
            Err(ExpressionError::InvalidOperandTypes { operator: "AND", .. })
        ));

        let not = QueryExpression::not(cmp).unwrap();
        assert_eq!(not.result_type(), &QueryType::BOOLEAN);
        assert!(QueryExpression::negate(QueryExpression::constant("x")).is_err());
        assert_eq!(
            QueryExpression::is_null(QueryExpression::null(QueryType::STRING))
                .unwrap()
                .result_type(),
            &QueryType::BOOLEAN
        );
    }

    #[test]
    fn test_as_result_type_is_target() {
        let person = person();
        let customer = customer(&person);
        let p = QueryExpression::parameter("p", person.clone()).unwrap();

        let narrowed = QueryExpression::type_as(p.clone(), customer.clone()).unwrap();
        assert_eq!(narrowed.result_type(), &customer);

        let test = QueryExpression::is_of(p, customer.clone()).unwrap();
        assert_eq!(test.result_type(), &QueryType::BOOLEAN);
    }

    #[test]
    fn test_of_type_on_collection() {
        let person = person();
        let customer = customer(&person);
        let people =
            QueryExpression::root("People", QueryType::collection_of(person.clone())).unwrap();

        let customers = QueryExpression::of_type(people, customer.clone()).unwrap();
        assert_eq!(
            customers.result_type(),
            &QueryType::collection_of(customer)
        );
    }

    #[test]
    fn test_function_call_and_lambda() {
        let x = QueryExpression::parameter("x", QueryType::INT32).unwrap();
        let body = QueryExpression::multiply(x.clone(), x).unwrap();
        let lambda =
            QueryExpression::lambda(vec![LambdaParameter::new("x", QueryType::INT32)], body)
                .unwrap();
        assert_eq!(lambda.result_type(), &QueryType::INT32);

        let duplicate = QueryExpression::lambda(
            vec![
                LambdaParameter::new("x", QueryType::INT32),
                LambdaParameter::new("x", QueryType::STRING),
            ],
            QueryExpression::constant(1),
        );
        assert_eq!(
            duplicate,
            Err(ExpressionError::DuplicateParameter {
                name: "x".to_string()
            })
        );

        let call = QueryExpression::function_call(
            "Length",
            vec![QueryExpression::constant("abc")],
            QueryType::INT32,
        )
        .unwrap();
        assert_eq!(call.result_type(), &QueryType::INT32);
        assert_eq!(call.children().len(), 1);
    }

    #[test]
    fn test_lambda_body_must_use_declared_types() {
        // (x: Int32) => (x || "!") with x referenced as a String
        let body = QueryExpression::concat(
            QueryExpression::parameter("x", QueryType::STRING).unwrap(),
            QueryExpression::constant("!"),
        )
        .unwrap();
        let result =
            QueryExpression::lambda(vec![LambdaParameter::new("x", QueryType::INT32)], body);
        assert_eq!(
            result,
            Err(ExpressionError::TypeMismatch {
                expected: QueryType::INT32,
                actual: QueryType::STRING,
                context: "reference to parameter x".to_string(),
            })
        );
    }

    #[test]
    fn test_inner_lambda_shadows_outer_parameter() {
        // (x: Int32) => Apply((x: String) => (x || "!"))
        let inner = QueryExpression::lambda(
            vec![LambdaParameter::new("x", QueryType::STRING)],
            QueryExpression::concat(
                QueryExpression::parameter("x", QueryType::STRING).unwrap(),
                QueryExpression::constant("!"),
            )
            .unwrap(),
        )
        .unwrap();
        let call = QueryExpression::function_call("Apply", vec![inner], QueryType::STRING).unwrap();
        let outer =
            QueryExpression::lambda(vec![LambdaParameter::new("x", QueryType::INT32)], call);
        assert!(outer.is_ok());

        // A reference to the outer parameter from inside the inner lambda is checked
        let inner = QueryExpression::lambda(
            vec![LambdaParameter::new("y", QueryType::INT32)],
            QueryExpression::parameter("x", QueryType::INT64).unwrap(),
        )
        .unwrap();
        let outer =
            QueryExpression::lambda(vec![LambdaParameter::new("x", QueryType::INT32)], inner);
        assert!(matches!(outer, Err(ExpressionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_free_parameters() {
        // (y: Int32) => (y + x), plus a free z
        let lambda = QueryExpression::lambda(
            vec![LambdaParameter::new("y", QueryType::INT32)],
            QueryExpression::add(
                QueryExpression::parameter("y", QueryType::INT32).unwrap(),
                QueryExpression::parameter("x", QueryType::INT32).unwrap(),
            )
            .unwrap(),
        )
        .unwrap();
        let call = QueryExpression::function_call(
            "Apply",
            vec![lambda, QueryExpression::parameter("z", QueryType::INT32).unwrap()],
            QueryType::INT32,
        )
        .unwrap();
        assert_eq!(call.free_parameters().into_iter().collect::<Vec<_>>(), vec!["x", "z"]);
    }

    #[test]
    fn test_nan_constants_are_equal() {
        assert_eq!(
            QueryExpression::constant(f64::NAN),
            QueryExpression::constant(f64::NAN)
        );
    }

    #[test]
    fn test_conditional() {
        let cond = QueryExpression::constant(true);
        let expr = QueryExpression::conditional(
            cond.clone(),
            QueryExpression::constant(1),
            QueryExpression::constant(2i64),
        )
        .unwrap();
        assert_eq!(expr.result_type(), &QueryType::INT64);

        let bad_test = QueryExpression::conditional(
            QueryExpression::constant(1),
            QueryExpression::constant(1),
            QueryExpression::constant(2),
        );
        assert!(matches!(bad_test, Err(ExpressionError::TypeMismatch { .. })));

        let bad_branches = QueryExpression::conditional(
            cond,
            QueryExpression::constant(1),
            QueryExpression::constant("two"),
        );
        assert!(matches!(
            bad_branches,
            Err(ExpressionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_node_count() {
        let expr = QueryExpression::and(
            QueryExpression::equal_to(QueryExpression::constant(1), QueryExpression::constant(1))
                .unwrap(),
            QueryExpression::constant(true),
        )
        .unwrap();
        assert_eq!(expr.node_count(), 5);
        assert_eq!(expr.kind().variant_name(), "binary");
    }

    #[test]
    fn test_structural_equality() {
        let build = || {
            QueryExpression::type_as(
                QueryExpression::parameter("p", person()).unwrap(),
                customer(&person()),
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }
}
