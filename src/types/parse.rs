//! Parsing of textual type representations.
//!
//! Accepts exactly what `QueryType`'s `Display` produces: a bare type name,
//! `Collection(<type>)` or `Ref(<entity>)`.

use crate::types::{QueryType, ScalarType, TypeError, TypeResult};

const COLLECTION: &str = "Collection";
const REFERENCE: &str = "Ref";

/// Deepest `Collection(...)`/`Ref(...)` nesting accepted
pub const MAX_TYPE_NESTING: usize = 32;

/// Parse a type name, resolving named types through `lookup`.
///
/// Scalar names are resolved before `lookup` is consulted.
pub fn parse_type_name<F>(text: &str, lookup: &F) -> TypeResult<QueryType>
where
    F: Fn(&str) -> TypeResult<QueryType>,
{
    parse_nested(text, lookup, 0)
}

fn parse_nested<F>(text: &str, lookup: &F, depth: usize) -> TypeResult<QueryType>
where
    F: Fn(&str) -> TypeResult<QueryType>,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid(text, "empty type name"));
    }

    if let Some(open) = trimmed.find('(') {
        if !trimmed.ends_with(')') {
            return Err(invalid(text, "unbalanced parentheses"));
        }
        if depth >= MAX_TYPE_NESTING {
            return Err(invalid(text, "type constructors nested too deeply"));
        }
        let constructor = trimmed[..open].trim();
        let inner = &trimmed[open + 1..trimmed.len() - 1];

        return match constructor {
            COLLECTION => Ok(QueryType::collection_of(parse_nested(inner, lookup, depth + 1)?)),
            REFERENCE => {
                let target = parse_nested(inner, lookup, depth + 1)?;
                QueryType::reference_to(&target).ok_or_else(|| TypeError::NotAnEntity {
                    name: target.to_string(),
                })
            }
            other => Err(invalid(text, &format!("unknown type constructor {}", other))),
        };
    }

    if trimmed.contains(')') {
        return Err(invalid(text, "unbalanced parentheses"));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
    {
        return Err(invalid(text, "unexpected character"));
    }

    match ScalarType::from_name(trimmed) {
        Some(scalar) => Ok(QueryType::Scalar(scalar)),
        None => lookup(trimmed),
    }
}

fn invalid(text: &str, reason: &str) -> TypeError {
    TypeError::InvalidTypeName {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}
