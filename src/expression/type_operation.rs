//! Expressions relating a source expression to a target type.
//!
//! All four operators share the shape `<source> <keyword> <type>`; they differ
//! in which source/target pairs are legal and in the result type of the node.

use crate::expression::{ExpressionError, ExpressionKind, ExpressionResult, QueryExpression};
use crate::types::QueryType;
use log::trace;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeOperator {
    /// Treat the source as the target type; result type is the target
    As,
    /// Test whether the source is of the target type; result type is Boolean
    IsOf,
    /// Explicit conversion; result type is the target
    Cast,
    /// Filter a collection down to elements of the target type
    OfType,
}

impl TypeOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeOperator::As => "as",
            TypeOperator::IsOf => "is of",
            TypeOperator::Cast => "cast to",
            TypeOperator::OfType => "of type",
        }
    }

    /// Whether `source <keyword> target` is a legal operation
    pub fn is_legal(&self, source: &QueryType, target: &QueryType) -> bool {
        match self {
            TypeOperator::As | TypeOperator::IsOf => {
                !target.is_scalar() && source.is_related_to(target)
            }
            TypeOperator::Cast => source.can_convert_to(target),
            TypeOperator::OfType => match source.element_type() {
                Some(element) => !target.is_scalar() && element.is_related_to(target),
                None => false,
            },
        }
    }

    /// Static result type of a node applying this operator to `target`
    pub fn result_type(&self, target: &QueryType) -> QueryType {
        match self {
            TypeOperator::As | TypeOperator::Cast => target.clone(),
            TypeOperator::IsOf => QueryType::BOOLEAN,
            TypeOperator::OfType => QueryType::collection_of(target.clone()),
        }
    }

    /// Legality check plus result type
    pub fn output_type(&self, source: &QueryType, target: &QueryType) -> ExpressionResult<QueryType> {
        if self.is_legal(source, target) {
            Ok(self.result_type(target))
        } else {
            Err(ExpressionError::IllegalTypeOperation {
                operator: *self,
                source_type: source.clone(),
                target_type: target.clone(),
            })
        }
    }
}

/// Payload of a type-operation node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeOperation {
    operator: TypeOperator,
    source: Box<QueryExpression>,
    target: QueryType,
}

impl TypeOperation {
    pub fn operator(&self) -> TypeOperator {
        self.operator
    }

    pub fn source(&self) -> &QueryExpression {
        &self.source
    }

    /// The type operand
    pub fn target(&self) -> &QueryType {
        &self.target
    }
}

/// Builder for type-operation nodes whose operands may not be known up front.
///
/// `build` reports a missing operand as an error rather than producing a
/// half-formed node.
#[derive(Debug, Clone)]
pub struct TypeOperationBuilder {
    operator: TypeOperator,
    source: Option<QueryExpression>,
    target: Option<QueryType>,
}

impl TypeOperationBuilder {
    pub fn new(operator: TypeOperator) -> Self {
        Self {
            operator,
            source: None,
            target: None,
        }
    }

    pub fn source(mut self, source: QueryExpression) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: QueryType) -> Self {
        self.target = Some(target);
        self
    }

    pub fn maybe_source(mut self, source: Option<QueryExpression>) -> Self {
        self.source = source;
        self
    }

    pub fn maybe_target(mut self, target: Option<QueryType>) -> Self {
        self.target = target;
        self
    }

    pub fn build(self) -> ExpressionResult<QueryExpression> {
        let expression = self.operator.keyword();
        let source = self.source.ok_or(ExpressionError::MissingOperand {
            expression,
            operand: "source",
        })?;
        let target = self.target.ok_or(ExpressionError::MissingOperand {
            expression,
            operand: "type",
        })?;

        let result_type = self.operator.output_type(source.result_type(), &target)?;
        trace!(
            "Built type operation ({} {} {})",
            source,
            expression,
            target
        );

        Ok(QueryExpression::new(
            result_type,
            ExpressionKind::TypeOperation(TypeOperation {
                operator: self.operator,
                source: Box::new(source),
                target,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityType, Property};
    use std::sync::Arc;

    struct Fixture {
        person: QueryType,
        customer: QueryType,
        widget: QueryType,
    }

    fn fixture() -> Fixture {
        let person = Arc::new(
            EntityType::new("Person", None, vec![Property::new("Name", QueryType::STRING)])
                .unwrap(),
        );
        let customer = EntityType::new("Customer", Some(person.clone()), vec![]).unwrap();
        let widget = EntityType::new("UnrelatedWidgetType", None, vec![]).unwrap();
        Fixture {
            person: QueryType::Entity(person),
            customer: QueryType::entity(customer),
            widget: QueryType::entity(widget),
        }
    }

    #[test]
    fn test_legality() {
        let f = fixture();
        assert!(TypeOperator::As.is_legal(&f.person, &f.customer));
        assert!(TypeOperator::As.is_legal(&f.customer, &f.person));
        assert!(!TypeOperator::As.is_legal(&f.customer, &f.widget));
        assert!(!TypeOperator::As.is_legal(&QueryType::INT32, &QueryType::INT64));

        assert!(TypeOperator::IsOf.is_legal(&f.person, &f.customer));
        assert!(!TypeOperator::IsOf.is_legal(&f.person, &f.widget));

        assert!(TypeOperator::Cast.is_legal(&QueryType::DOUBLE, &QueryType::INT32));
        assert!(TypeOperator::Cast.is_legal(&f.person, &f.customer));
        assert!(!TypeOperator::Cast.is_legal(&QueryType::STRING, &QueryType::INT32));

        let people = QueryType::collection_of(f.person.clone());
        assert!(TypeOperator::OfType.is_legal(&people, &f.customer));
        assert!(!TypeOperator::OfType.is_legal(&f.person, &f.customer));
        assert!(!TypeOperator::OfType.is_legal(&people, &f.widget));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(TypeOperator::As.keyword(), "as");
        assert_eq!(TypeOperator::IsOf.keyword(), "is of");
        assert_eq!(TypeOperator::Cast.keyword(), "cast to");
        assert_eq!(TypeOperator::OfType.keyword(), "of type");
    }

    #[test]
    fn test_result_types() {
        let f = fixture();
        assert_eq!(TypeOperator::As.result_type(&f.customer), f.customer);
        assert_eq!(TypeOperator::Cast.result_type(&QueryType::INT32), QueryType::INT32);
        assert_eq!(TypeOperator::IsOf.result_type(&f.customer), QueryType::BOOLEAN);
        assert_eq!(
            TypeOperator::OfType.result_type(&f.customer),
            QueryType::collection_of(f.customer.clone())
        );
    }

    #[test]
    fn test_builder_missing_source() {
        let f = fixture();
        let result = TypeOperationBuilder::new(TypeOperator::As)
            .maybe_source(None)
            .target(f.person)
            .build();
        assert_eq!(
            result,
            Err(ExpressionError::MissingOperand {
                expression: "as",
                operand: "source",
            })
        );
    }

    #[test]
    fn test_builder_missing_target() {
        let f = fixture();
        let result = TypeOperationBuilder::new(TypeOperator::IsOf)
            .source(QueryExpression::parameter("p", f.person).unwrap())
            .build();
        assert_eq!(
            result,
            Err(ExpressionError::MissingOperand {
                expression: "is of",
                operand: "type",
            })
        );
    }

    #[test]
    fn test_builder_success() {
        let f = fixture();
        let expr = TypeOperationBuilder::new(TypeOperator::As)
            .source(QueryExpression::parameter("p", f.person.clone()).unwrap())
            .target(f.customer.clone())
            .build()
            .unwrap();

        assert_eq!(expr.result_type(), &f.customer);
        match expr.kind() {
            ExpressionKind::TypeOperation(op) => {
                assert_eq!(op.operator(), TypeOperator::As);
                assert_eq!(op.target(), &f.customer);
                assert_eq!(op.source().result_type(), &f.person);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }
}
